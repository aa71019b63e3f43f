use crate::core::client::{portal_error, AgolSession};
use crate::utils::error::{DumpError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const TOKEN_EXPIRATION_MINUTES: &str = "60";

/// Authentication strategy for the portal, resolved once before connecting.
#[derive(Debug, Clone)]
pub enum Credentials {
    Anonymous,
    Token(String),
    Login { username: String, password: String },
}

impl Credentials {
    /// Ambient default: a token taken from the `AGOL_TOKEN` environment variable.
    pub fn from_environment() -> Self {
        match env::var("AGOL_TOKEN") {
            Ok(token) if !token.is_empty() => Credentials::Token(token),
            _ => Credentials::Anonymous,
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

pub struct Connector {
    client: Client,
    portal_url: String,
    credentials: Credentials,
}

impl Connector {
    pub fn new(portal_url: &str, credentials: Credentials, insecure: bool) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("agol-dump/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(insecure)
            .build()?;

        Ok(Self {
            client,
            portal_url: portal_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Establishes the session and reports the connected host and user.
    /// Any failure here is fatal; nothing downstream catches it.
    pub async fn connect(self) -> Result<AgolSession> {
        let token = match &self.credentials {
            Credentials::Anonymous => None,
            Credentials::Token(token) => Some(token.clone()),
            Credentials::Login { username, password } => {
                Some(self.generate_token(username, password).await?)
            }
        };

        let session = AgolSession::new(self.client, &self.portal_url, token);
        let portal = session.portal_self().await?;
        let username = portal
            .user
            .map(|user| user.username)
            .unwrap_or_else(|| "anonymous".to_string());
        tracing::info!("Connected to: {} as {}", portal.portal_hostname, username);

        Ok(session)
    }

    async fn generate_token(&self, username: &str, password: &str) -> Result<String> {
        let url = format!("{}/sharing/rest/generateToken", self.portal_url);
        let params = [
            ("username", username),
            ("password", password),
            ("referer", self.portal_url.as_str()),
            ("expiration", TOKEN_EXPIRATION_MINUTES),
            ("f", "json"),
        ];

        let response = self.client.post(&url).form(&params).send().await?;
        let value: serde_json::Value = response.json().await?;
        if let Some(err) = portal_error(&value) {
            return Err(DumpError::Auth {
                message: err.to_string(),
            });
        }

        let parsed: TokenResponse = serde_json::from_value(value)?;
        Ok(parsed.token)
    }
}

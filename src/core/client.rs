use crate::core::{ItemRecord, ItemStub, PortalClient, Result};
use crate::utils::error::DumpError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

const SEARCH_PAGE_SIZE: usize = 100;

/// Authenticated handle to one portal's sharing REST API.
#[derive(Clone)]
pub struct AgolSession {
    client: Client,
    rest_url: String,
    token: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct PortalInfo {
    #[serde(rename = "portalHostname", default)]
    pub portal_hostname: String,
    #[serde(default)]
    pub user: Option<PortalUser>,
}

#[derive(Deserialize, Debug)]
pub struct PortalUser {
    pub username: String,
}

#[derive(Deserialize)]
struct SearchPage {
    #[serde(default)]
    total: i64,
    #[serde(rename = "nextStart", default = "ended_cursor")]
    next_start: i64,
    #[serde(default)]
    results: Vec<ItemStub>,
}

fn ended_cursor() -> i64 {
    -1
}

/// ArcGIS reports failures in-band: HTTP 200 with an `error` member.
pub(crate) fn portal_error(value: &Value) -> Option<DumpError> {
    let error = value.get("error")?;
    let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown portal error")
        .to_string();
    Some(DumpError::Portal { code, message })
}

impl AgolSession {
    pub fn new(client: Client, portal_url: &str, token: Option<String>) -> Self {
        Self {
            client,
            rest_url: format!("{}/sharing/rest", portal_url.trim_end_matches('/')),
            token,
        }
    }

    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value> {
        let mut request = self.client.get(url).query(&[("f", "json")]).query(query);
        if let Some(token) = &self.token {
            request = request.query(&[("token", token.as_str())]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(DumpError::Portal {
                code: i64::from(response.status().as_u16()),
                message: format!("HTTP {}", response.status()),
            });
        }

        let value: Value = response.json().await?;
        if let Some(err) = portal_error(&value) {
            return Err(err);
        }
        Ok(value)
    }

    pub async fn portal_self(&self) -> Result<PortalInfo> {
        let value = self
            .get_json(&format!("{}/portals/self", self.rest_url), &[])
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl PortalClient for AgolSession {
    async fn search_items(&self, query: &str, max_items: usize) -> Result<Vec<ItemStub>> {
        let url = format!("{}/search", self.rest_url);
        let mut stubs: Vec<ItemStub> = Vec::new();
        let mut start: i64 = 1;
        let mut total: i64 = 0;

        while stubs.len() < max_items && start > 0 {
            let num = SEARCH_PAGE_SIZE.min(max_items - stubs.len()).to_string();
            let start_param = start.to_string();
            let value = self
                .get_json(&url, &[("q", query), ("num", &num), ("start", &start_param)])
                .await?;

            let page: SearchPage = serde_json::from_value(value)?;
            total = page.total;
            if page.results.is_empty() {
                break;
            }
            stubs.extend(page.results);
            start = page.next_start;
        }

        stubs.truncate(max_items);
        if total > stubs.len() as i64 {
            tracing::debug!(
                "Catalog reports {} matching items, capped at {}",
                total,
                stubs.len()
            );
        }
        Ok(stubs)
    }

    async fn get_item(&self, id: &str) -> Result<ItemRecord> {
        let value = self
            .get_json(&format!("{}/content/items/{}", self.rest_url, id), &[])
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get_item_data(&self, id: &str) -> Result<Value> {
        let url = format!("{}/content/items/{}/data", self.rest_url, id);
        let mut request = self.client.get(&url).query(&[("f", "json")]);
        if let Some(token) = &self.token {
            request = request.query(&[("token", token.as_str())]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(DumpError::Portal {
                code: i64::from(response.status().as_u16()),
                message: format!("HTTP {}", response.status()),
            });
        }

        // Items without a data payload come back with an empty body.
        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }

        let value: Value = serde_json::from_slice(&body)?;
        if let Some(err) = portal_error(&value) {
            return Err(err);
        }
        Ok(value)
    }
}

pub mod file;

use crate::core::connect::Credentials;
use crate::core::ConfigProvider;
use crate::utils::error::{DumpError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use file::FileConfig;
use std::env;
use std::path::PathBuf;

const DEFAULT_PORTAL_URL: &str = "https://www.arcgis.com";
const DEFAULT_DELAY_SECONDS: f64 = 0.1;
const DEFAULT_MAX_ITEMS: usize = 10_000;

#[derive(Debug, Clone, Parser)]
#[command(name = "agol-dump")]
#[command(about = "Exports ArcGIS Online item metadata and data to line-delimited JSON")]
pub struct CliConfig {
    #[arg(long, help = "Optional TOML config file; CLI flags take precedence")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub portal_url: Option<String>,

    #[arg(long, help = "Catalog search query; empty matches all items")]
    pub query: Option<String>,

    #[arg(long)]
    pub output_dir: Option<String>,

    #[arg(long)]
    pub delay_seconds: Option<f64>,

    #[arg(long)]
    pub max_items: Option<usize>,

    #[arg(long)]
    pub token: Option<String>,

    #[arg(long)]
    pub username: Option<String>,

    #[arg(long, help = "Falls back to the AGOL_PASSWORD environment variable")]
    pub password: Option<String>,

    #[arg(long, help = "Accept invalid TLS certificates from the portal")]
    pub insecure: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Fully resolved run configuration: CLI flags over config file over defaults.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub portal_url: String,
    pub query: String,
    pub output_dir: String,
    pub delay_seconds: f64,
    pub max_items: usize,
    pub insecure: bool,
    pub credentials: Credentials,
}

impl ExportConfig {
    pub fn resolve(cli: CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };

        let output_dir = cli
            .output_dir
            .or(file.output.dir)
            .ok_or_else(|| DumpError::MissingConfig {
                field: "output_dir".to_string(),
            })?;

        let credentials = resolve_credentials(
            cli.token.or(file.auth.token),
            cli.username.or(file.auth.username),
            cli.password.or(file.auth.password),
        )?;

        Ok(Self {
            portal_url: cli
                .portal_url
                .or(file.portal.url)
                .unwrap_or_else(|| DEFAULT_PORTAL_URL.to_string()),
            query: cli.query.or(file.portal.query).unwrap_or_default(),
            output_dir,
            delay_seconds: cli
                .delay_seconds
                .or(file.output.delay_seconds)
                .unwrap_or(DEFAULT_DELAY_SECONDS),
            max_items: cli
                .max_items
                .or(file.portal.max_items)
                .unwrap_or(DEFAULT_MAX_ITEMS),
            insecure: cli.insecure || file.portal.insecure.unwrap_or(false),
            credentials,
        })
    }
}

fn resolve_credentials(
    token: Option<String>,
    username: Option<String>,
    password: Option<String>,
) -> Result<Credentials> {
    if let Some(token) = token {
        return Ok(Credentials::Token(token));
    }

    if let Some(username) = username {
        let password = password
            .or_else(|| env::var("AGOL_PASSWORD").ok())
            .ok_or_else(|| DumpError::MissingConfig {
                field: "password".to_string(),
            })?;
        return Ok(Credentials::Login { username, password });
    }

    Ok(Credentials::from_environment())
}

impl ConfigProvider for ExportConfig {
    fn query(&self) -> &str {
        &self.query
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn delay_seconds(&self) -> f64 {
        self.delay_seconds
    }

    fn max_items(&self) -> usize {
        self.max_items
    }
}

impl Validate for ExportConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("portal_url", &self.portal_url)?;
        validation::validate_path("output_dir", &self.output_dir)?;
        validation::validate_positive_number("max_items", self.max_items, 1)?;
        validation::validate_range("delay_seconds", self.delay_seconds, 0.0, 60.0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cli() -> CliConfig {
        CliConfig {
            config: None,
            portal_url: None,
            query: None,
            output_dir: Some("out".to_string()),
            delay_seconds: None,
            max_items: None,
            token: None,
            username: None,
            password: None,
            insecure: false,
            verbose: false,
        }
    }

    #[test]
    fn resolve_applies_defaults() {
        let config = ExportConfig::resolve(cli()).unwrap();

        assert_eq!(config.portal_url, DEFAULT_PORTAL_URL);
        assert_eq!(config.query, "");
        assert_eq!(config.delay_seconds, DEFAULT_DELAY_SECONDS);
        assert_eq!(config.max_items, DEFAULT_MAX_ITEMS);
        assert!(!config.insecure);
    }

    #[test]
    fn resolve_requires_output_dir() {
        let mut args = cli();
        args.output_dir = None;

        let result = ExportConfig::resolve(args);
        assert!(matches!(
            result,
            Err(DumpError::MissingConfig { ref field }) if field == "output_dir"
        ));
    }

    #[test]
    fn cli_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "[portal]\nurl = \"https://county.maps.arcgis.com\"\nmax_items = 500\n\n\
             [output]\ndir = \"/data/agol\"\ndelay_seconds = 0.5\n"
        )
        .unwrap();

        let mut args = cli();
        args.config = Some(file.path().to_path_buf());
        args.output_dir = None;
        args.max_items = Some(25);

        let config = ExportConfig::resolve(args).unwrap();

        assert_eq!(config.portal_url, "https://county.maps.arcgis.com");
        assert_eq!(config.output_dir, "/data/agol");
        assert_eq!(config.delay_seconds, 0.5);
        assert_eq!(config.max_items, 25);
    }

    #[test]
    fn token_takes_precedence_over_login() {
        let mut args = cli();
        args.token = Some("tok-123".to_string());
        args.username = Some("gis_admin".to_string());
        args.password = Some("hunter2".to_string());

        let config = ExportConfig::resolve(args).unwrap();
        assert!(matches!(config.credentials, Credentials::Token(ref t) if t == "tok-123"));
    }

    #[test]
    fn username_and_password_become_login_credentials() {
        let mut args = cli();
        args.username = Some("gis_admin".to_string());
        args.password = Some("hunter2".to_string());

        let config = ExportConfig::resolve(args).unwrap();
        assert!(matches!(config.credentials, Credentials::Login { .. }));
    }

    #[test]
    fn validate_rejects_out_of_range_delay() {
        let mut config = ExportConfig::resolve(cli()).unwrap();
        config.delay_seconds = 120.0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_max_items() {
        let mut config = ExportConfig::resolve(cli()).unwrap();
        config.max_items = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_http_portal_url() {
        let mut config = ExportConfig::resolve(cli()).unwrap();
        config.portal_url = "ftp://portal.example.com".to_string();

        assert!(config.validate().is_err());
    }
}

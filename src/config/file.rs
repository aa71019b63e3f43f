use crate::utils::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub portal: PortalSection,
    #[serde(default)]
    pub auth: AuthSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortalSection {
    pub url: Option<String>,
    pub query: Option<String>,
    pub max_items: Option<usize>,
    pub insecure: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthSection {
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputSection {
    pub dir: Option<String>,
    pub delay_seconds: Option<f64>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_full_config() {
        let config: FileConfig = toml::from_str(
            r#"
            [portal]
            url = "https://county.maps.arcgis.com"
            query = "owner:gis_admin"
            max_items = 500
            insecure = true

            [auth]
            username = "gis_admin"

            [output]
            dir = "/data/agol"
            delay_seconds = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(
            config.portal.url.as_deref(),
            Some("https://county.maps.arcgis.com")
        );
        assert_eq!(config.portal.max_items, Some(500));
        assert_eq!(config.portal.insecure, Some(true));
        assert_eq!(config.auth.username.as_deref(), Some("gis_admin"));
        assert_eq!(config.output.dir.as_deref(), Some("/data/agol"));
        assert_eq!(config.output.delay_seconds, Some(0.5));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.portal.url.is_none());
        assert!(config.auth.token.is_none());
        assert!(config.output.dir.is_none());
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[output]\ndir = \"out\"").unwrap();

        let config = FileConfig::from_file(file.path()).unwrap();
        assert_eq!(config.output.dir.as_deref(), Some("out"));
    }
}

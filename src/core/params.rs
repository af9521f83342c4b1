use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.kinopoisk.dev/v1.4";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Catalog client settings suitable for config files and CLI overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    /// Per-request deadline in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config("API key is empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout must be greater than 0".to_string()));
        }
        Ok(())
    }
}

/// Session driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionParams {
    /// Directory that receives the JSON and CSV exports
    pub output_dir: PathBuf,
    /// Number of search results offered for selection
    pub search_limit: usize,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl SessionParams {
    pub fn validate(&self) -> Result<()> {
        if self.search_limit == 0 {
            return Err(Error::Config(
                "search limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything a config file can set. Both halves share one flat key space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(flatten)]
    pub client: ClientConfig,
    #[serde(flatten)]
    pub session: SessionParams,
}

impl Settings {
    /// Load from a JSON file; missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {:?}: {}", path, e)))?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("invalid config {:?}: {}", path, e)))
    }

    pub fn validate(&self) -> Result<()> {
        self.client.validate()?;
        self.session.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_config_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kinofetch.json");
        std::fs::write(&path, r#"{ "api_key": "KEY", "timeout_secs": 3 }"#).unwrap();

        let settings = Settings::from_json_file(&path).unwrap();
        assert_eq!(settings.client.api_key, "KEY");
        assert_eq!(settings.client.timeout_secs, 3);
        assert_eq!(settings.client.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.session, SessionParams::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn one_file_fills_client_and_session_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kinofetch.json");
        std::fs::write(
            &path,
            r#"{ "api_key": "KEY", "search_limit": 8, "output_dir": "out" }"#,
        )
        .unwrap();

        let settings = Settings::from_json_file(&path).unwrap();
        assert_eq!(settings.client.api_key, "KEY");
        assert_eq!(settings.session.search_limit, 8);
        assert_eq!(settings.session.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn zero_search_limit_fails_validation() {
        let params = SessionParams {
            search_limit: 0,
            ..SessionParams::default()
        };
        assert!(matches!(params.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn empty_key_fails_validation() {
        let err = ClientConfig::default().validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Settings::from_json_file(&path),
            Err(Error::Config(_))
        ));
    }
}

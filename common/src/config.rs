use serde::Deserialize;
use std::{fs, path::PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CommonConfig {
    pub project_name: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BackendConfig {
    pub server_address: String,
    pub log_level: String,
    /// Origin allowed by CORS; any origin when unset
    #[serde(default)]
    pub allowed_origin: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CurrencyConfig {
    #[serde(default = "default_detect")]
    pub detect: bool,
    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_detect() -> bool {
    true
}

fn default_lookup_url() -> String {
    "https://ipapi.co/json/".to_string()
}

fn default_timeout_ms() -> u64 {
    3000
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            detect: default_detect(),
            lookup_url: default_lookup_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub common: CommonConfig,
    pub backend: BackendConfig,
    #[serde(default)]
    pub currency: CurrencyConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yml::Error),
}

impl Config {
    pub fn load(config_path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: PathBuf::from(config_path),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config = serde_yml::from_str(contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parses() {
        let yaml = r#"
common:
  project_name: shopping-bias-detector
backend:
  server_address: 127.0.0.1:8080
  log_level: debug
  allowed_origin: http://localhost:5173
currency:
  detect: false
  lookup_url: http://localhost:9999/json/
  timeout_ms: 500
"#;
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(config.common.project_name, "shopping-bias-detector");
        assert_eq!(config.backend.server_address, "127.0.0.1:8080");
        assert_eq!(
            config.backend.allowed_origin.as_deref(),
            Some("http://localhost:5173")
        );
        assert!(!config.currency.detect);
        assert_eq!(config.currency.timeout_ms, 500);
    }

    #[test]
    fn test_currency_section_defaults() {
        let yaml = r#"
common:
  project_name: p
backend:
  server_address: 0.0.0.0:8080
  log_level: info
"#;
        let config = Config::from_yaml_str(yaml).unwrap();
        assert!(config.currency.detect);
        assert_eq!(config.currency.lookup_url, "https://ipapi.co/json/");
        assert_eq!(config.currency.timeout_ms, 3000);
        assert!(config.backend.allowed_origin.is_none());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Config::load("/nonexistent/total_config.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_missing_backend_section_is_parse_error() {
        let err = Config::from_yaml_str("common:\n  project_name: p\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

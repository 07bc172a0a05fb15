//! Environment-driven configuration.

use std::path::PathBuf;

use hrms_observability::LogFormat;
use hrms_router::DEFAULT_APP_NAME;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_SESSION_PATH: &str = "hrms-session.json";

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("HRMS_API_URL must be an http(s) URL, got {0:?}")]
    InvalidApiUrl(String),
    #[error("HRMS_LOG_FORMAT must be 'json' or 'pretty', got {0:?}")]
    InvalidLogFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,
    /// Page title used when a route declares none.
    pub app_name: String,
    /// File holding the persisted session.
    pub session_path: PathBuf,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
            log_format: LogFormat::Json,
        }
    }
}

impl AppConfig {
    /// Read `HRMS_API_URL`, `HRMS_APP_NAME`, `HRMS_SESSION_PATH` and
    /// `HRMS_LOG_FORMAT`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("HRMS_API_URL") {
            let url = url.trim().trim_end_matches('/');
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidApiUrl(url.to_string()));
            }
            config.api_url = url.to_string();
        }

        if let Some(name) = lookup("HRMS_APP_NAME") {
            if name.trim().is_empty() {
                return Err(ConfigError::Empty("HRMS_APP_NAME"));
            }
            config.app_name = name.trim().to_string();
        }

        if let Some(path) = lookup("HRMS_SESSION_PATH") {
            if path.trim().is_empty() {
                return Err(ConfigError::Empty("HRMS_SESSION_PATH"));
            }
            config.session_path = PathBuf::from(path.trim());
        }

        if let Some(format) = lookup("HRMS_LOG_FORMAT") {
            config.log_format =
                LogFormat::parse(&format).ok_or(ConfigError::InvalidLogFormat(format))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_url, "http://localhost:8000/api");
        assert_eq!(config.app_name, "HRMS Application");
    }

    #[test]
    fn overrides_are_trimmed() {
        let config = AppConfig::from_lookup(lookup(&[
            ("HRMS_API_URL", "https://hr.example.com/api/"),
            ("HRMS_APP_NAME", " Acme HR "),
            ("HRMS_SESSION_PATH", "/tmp/s.json"),
            ("HRMS_LOG_FORMAT", "pretty"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "https://hr.example.com/api");
        assert_eq!(config.app_name, "Acme HR");
        assert_eq!(config.session_path, PathBuf::from("/tmp/s.json"));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[("HRMS_API_URL", "localhost:8000")])).unwrap_err(),
            ConfigError::InvalidApiUrl("localhost:8000".to_string())
        );
        assert_eq!(
            AppConfig::from_lookup(lookup(&[("HRMS_APP_NAME", "  ")])).unwrap_err(),
            ConfigError::Empty("HRMS_APP_NAME")
        );
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("HRMS_LOG_FORMAT", "xml")])),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }
}

//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `khctl.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Game server settings.
    pub api: ApiConfig,
    /// Background refresh settings.
    pub polling: PollingConfig,
    /// Login defaults.
    pub session: SessionConfig,
    /// Terminal output settings.
    pub display: DisplayConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Game server connection.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// State poller configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Milliseconds between two refreshes while logged in.
    pub interval_ms: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Username used by `:login` when none is given.
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Colour log lines by tone with ANSI escapes.
    pub color: bool,
    /// Maximum number of lines kept in the console log.
    pub log_capacity: usize,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `khctl.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("khctl.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("KH_API_BASE") {
            self.api.base_url = val;
        }
        if let Some(val) = var("KH_POLL_INTERVAL_MS")
            && let Ok(ms) = val.parse()
        {
            self.polling.interval_ms = ms;
        }
        if let Some(val) = var("KH_USERNAME") {
            self.session.username = Some(val).filter(|name| !name.is_empty());
        }
        if let Some(val) = var("KH_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.polling.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "poll interval must be non-zero".to_string(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request timeout must be non-zero".to_string(),
            ));
        }
        let base = self.api.base_url.as_str();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "api base must be an absolute http(s) URL, got {base:?}"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.polling.interval_ms)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/api".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_ms: 3000 }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            log_capacity: kh_domain::console::DEFAULT_CAPACITY,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "khctl=info,kh_app=info,kh_adapter_http_reqwest=warn".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8080/api");
        assert_eq!(config.poll_interval(), Duration::from_millis(3000));
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.session.username.is_none());
        assert!(config.display.color);
        assert_eq!(config.display.log_capacity, 2000);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.polling.interval_ms, 3000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [api]
            base_url = 'https://kh.example.com/kh/api'
            timeout_secs = 3

            [polling]
            interval_ms = 1500

            [session]
            username = 'bob'

            [display]
            color = false
            log_capacity = 100

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api.base_url, "https://kh.example.com/kh/api");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.polling.interval_ms, 1500);
        assert_eq!(config.session.username.as_deref(), Some("bob"));
        assert!(!config.display.color);
        assert_eq!(config.display.log_capacity, 100);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [polling]
            interval_ms = 500
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.polling.interval_ms, 500);
        assert_eq!(config.api.base_url, "http://127.0.0.1:8080/api");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.polling.interval_ms, 3000);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[
            ("KH_API_BASE", "http://10.0.0.5:9000/kh/api"),
            ("KH_POLL_INTERVAL_MS", "750"),
            ("KH_USERNAME", "alice"),
            ("KH_LOG", "khctl=debug"),
        ]));
        assert_eq!(config.api.base_url, "http://10.0.0.5:9000/kh/api");
        assert_eq!(config.polling.interval_ms, 750);
        assert_eq!(config.session.username.as_deref(), Some("alice"));
        assert_eq!(config.logging.filter, "khctl=debug");
    }

    #[test]
    fn should_prefer_rust_log_over_kh_log() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("KH_LOG", "info"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparseable_poll_interval() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("KH_POLL_INTERVAL_MS", "soon")]));
        assert_eq!(config.polling.interval_ms, 3000);
    }

    #[test]
    fn should_reject_zero_poll_interval() {
        let mut config = Config::default();
        config.polling.interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_relative_api_base() {
        let mut config = Config::default();
        config.api.base_url = "/kh/api".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().starts_with("invalid configuration: api base"));
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }
}

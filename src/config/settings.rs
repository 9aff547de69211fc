use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::env::{self, EnvKey};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid API base URL {value:?}: {reason}")]
    InvalidApiUrl { value: String, reason: String },

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Base address of the conversion service. Always ends with `/` so
    /// endpoint paths join underneath it.
    pub api_url: Url,
    pub poll_interval: Duration,
    /// `None` polls until the job settles.
    pub max_polls: Option<u32>,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let api_url = parse_api_url(&env::get_or(EnvKey::ApiUrl, DEFAULT_API_URL))?;

        let poll_interval_ms = env::get_parsed(EnvKey::PollIntervalMs, DEFAULT_POLL_INTERVAL_MS)
            .map_err(|value| invalid(EnvKey::PollIntervalMs, value))?;
        let max_polls = env::get_optional::<u32>(EnvKey::PollMaxAttempts)
            .map_err(|value| invalid(EnvKey::PollMaxAttempts, value))?;
        let http_timeout_secs = env::get_parsed(EnvKey::HttpTimeoutSecs, DEFAULT_HTTP_TIMEOUT_SECS)
            .map_err(|value| invalid(EnvKey::HttpTimeoutSecs, value))?;

        if poll_interval_ms == 0 {
            return Err(invalid(EnvKey::PollIntervalMs, "0".to_string()));
        }

        let mut config = Self {
            api_url,
            poll_interval: Duration::from_millis(poll_interval_ms),
            max_polls: None,
            http_timeout: Duration::from_secs(http_timeout_secs),
        };
        config.set_max_polls(max_polls)?;
        Ok(config)
    }

    /// Defaults for everything except the service address.
    pub fn with_api_url(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_polls: None,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        })
    }

    pub fn set_api_url(&mut self, api_url: &str) -> Result<(), ConfigError> {
        self.api_url = parse_api_url(api_url)?;
        Ok(())
    }

    /// `None` means unlimited. `Some(0)` is refused.
    pub fn set_max_polls(&mut self, max_polls: Option<u32>) -> Result<(), ConfigError> {
        if max_polls == Some(0) {
            return Err(invalid(EnvKey::PollMaxAttempts, "0".to_string()));
        }
        self.max_polls = max_polls;
        Ok(())
    }
}

fn invalid(key: EnvKey, value: String) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.as_str(),
        value,
    }
}

pub fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let mut url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidApiUrl {
        value: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidApiUrl {
            value: trimmed.to_string(),
            reason: format!("unsupported scheme {:?}", url.scheme()),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_url_appends_trailing_slash() {
        let url = parse_api_url("http://converter.local:8080/prefix").unwrap();
        assert_eq!(url.as_str(), "http://converter.local:8080/prefix/");

        let bare = parse_api_url("https://converter.local").unwrap();
        assert_eq!(bare.as_str(), "https://converter.local/");
    }

    #[test]
    fn test_parse_api_url_rejects_missing_scheme() {
        let err = parse_api_url("backend.example.net").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiUrl { .. }));
    }

    #[test]
    fn test_parse_api_url_rejects_other_schemes() {
        assert!(parse_api_url("ftp://converter.local").is_err());
    }

    #[test]
    fn test_with_api_url_uses_defaults() {
        let config = AppConfig::with_api_url(DEFAULT_API_URL).unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(3));
        assert_eq!(config.max_polls, None);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_set_max_polls_refuses_zero() {
        let mut config = AppConfig::with_api_url(DEFAULT_API_URL).unwrap();
        let err = config.set_max_polls(Some(0)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "POLL_MAX_ATTEMPTS", .. }
        ));
        assert_eq!(config.max_polls, None);

        config.set_max_polls(Some(5)).unwrap();
        assert_eq!(config.max_polls, Some(5));
        config.set_max_polls(None).unwrap();
        assert_eq!(config.max_polls, None);
    }
}

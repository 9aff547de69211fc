use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ApiUrl,
    PollIntervalMs,
    PollMaxAttempts,
    HttpTimeoutSecs,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ApiUrl => "CONVERTER_API_URL",
            EnvKey::PollIntervalMs => "POLL_INTERVAL_MS",
            EnvKey::PollMaxAttempts => "POLL_MAX_ATTEMPTS",
            EnvKey::HttpTimeoutSecs => "HTTP_TIMEOUT_SECS",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

/// Reads and parses a variable. Absent means `default`; present but
/// unparseable is reported so a typo doesn't silently fall back.
pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> Result<T, String> {
    match get(key) {
        Ok(val) => val.trim().parse::<T>().map_err(|_| val),
        Err(_) => Ok(default),
    }
}

/// Like [`get_parsed`] but without a default: absent (or empty) is `None`.
pub fn get_optional<T: FromStr>(key: EnvKey) -> Result<Option<T>, String> {
    match get(key) {
        Ok(val) if val.trim().is_empty() => Ok(None),
        Ok(val) => val.trim().parse::<T>().map(Some).map_err(|_| val),
        Err(_) => Ok(None),
    }
}

use std::env;
use std::str::FromStr;
use std::time::Duration;

use cardy_client::{CardyClient, DEFAULT_BASE_URL};

use crate::error::ConfigError;

pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_HEALTH_INTERVAL_SECS: u64 = 5 * 60;

/// Assistant configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub health_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            health_interval: Duration::from_secs(DEFAULT_HEALTH_INTERVAL_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("CARDY_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_ms: u64 = parse_or(
            &lookup,
            "CARDY_REQUEST_TIMEOUT_MS",
            DEFAULT_REQUEST_TIMEOUT_MS,
        )?;
        let health_secs: u64 = parse_or(
            &lookup,
            "CARDY_HEALTH_INTERVAL_SECS",
            DEFAULT_HEALTH_INTERVAL_SECS,
        )?;

        if health_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "CARDY_HEALTH_INTERVAL_SECS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_millis(timeout_ms),
            health_interval: Duration::from_secs(health_secs),
        })
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// HTTP client configured for this environment.
    pub fn client(&self) -> CardyClient {
        CardyClient::new(&self.api_base_url).with_timeout(self.request_timeout)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.health_interval, Duration::from_secs(300));
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("CARDY_API_URL", "https://bank.example.com"),
            ("CARDY_REQUEST_TIMEOUT_MS", "5000"),
            ("CARDY_HEALTH_INTERVAL_SECS", "60"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "https://bank.example.com");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.health_interval, Duration::from_secs(60));
        assert_eq!(config.client().base_url(), "https://bank.example.com");
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = Config::from_lookup(lookup_from(&[("CARDY_REQUEST_TIMEOUT_MS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("CARDY_REQUEST_TIMEOUT_MS"));

        assert!(
            Config::from_lookup(lookup_from(&[("CARDY_HEALTH_INTERVAL_SECS", "0")])).is_err()
        );
    }
}

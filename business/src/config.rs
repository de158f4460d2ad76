use std::any::Any;

use log::info;
use serde::Deserialize;
use snaily_states::{State, snapshot_clone};
use thiserror::Error;
use ustr::Ustr;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Environment variables read at startup.
#[derive(Debug, Deserialize)]
struct RawConfig {
    api_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration from the environment: {0}")]
    Env(#[from] serde_env::Error),
    #[error("API_URL must start with http:// or https://, got {0:?}")]
    InvalidApiUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading client configuration from environment variables");
        let raw: RawConfig = serde_env::from_env()?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let Some(url) = raw.api_url.filter(|url| !url.trim().is_empty()) else {
            return Ok(Self::default());
        };

        let url = url.trim().trim_end_matches('/').to_owned();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(url));
        }
        Ok(Self::new(url))
    }

    /// Versioned API root every endpoint hangs off.
    pub fn api_url(&self) -> Ustr {
        Ustr::from(&format!("{}/v1", self.api_base_url))
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl State for BusinessConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        snapshot_clone(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_vars(vars: &[(&str, &str)]) -> Result<BusinessConfig, ConfigError> {
        let raw: RawConfig = serde_env::from_iter(vars.iter().copied())?;
        BusinessConfig::from_raw(raw)
    }

    #[test]
    fn defaults_to_localhost() {
        let config = from_vars(&[]).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.api_url(), Ustr::from("http://localhost:8080/v1"));
    }

    #[test]
    fn reads_api_url_and_strips_trailing_slash() {
        let config = from_vars(&[("API_URL", "https://cad.example.com/")]).unwrap();
        assert_eq!(config.api_url(), Ustr::from("https://cad.example.com/v1"));
    }

    #[test]
    fn rejects_url_without_scheme() {
        let err = from_vars(&[("API_URL", "cad.example.com")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiUrl(_)), "got {err}");
    }
}

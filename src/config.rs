//! Engine configuration.
//!
//! The engine needs three things to reach a completions endpoint: an API
//! key, a base URL, and a model name. Loading is environment-first; callers
//! that persist their own configuration can construct [`EngineConfig`]
//! directly.

use crate::error::{EaselError, Result};

/// Default model when `EASEL_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Connection settings for the chat-completions endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub api_key: String,
    /// Base URL without the `/chat/completions` suffix.
    pub base_url: String,
    pub model: String,
}

impl EngineConfig {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Load configuration from `EASEL_API_KEY`, `EASEL_BASE_URL` and
    /// `EASEL_MODEL` (model falls back to [`DEFAULT_MODEL`]).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("EASEL_API_KEY").unwrap_or_default();
        let base_url = std::env::var("EASEL_BASE_URL").unwrap_or_default();
        let model = std::env::var("EASEL_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let config = Self {
            api_key,
            base_url,
            model,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every field is populated.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(EaselError::Configuration("api_key is empty".into()));
        }
        if self.base_url.is_empty() {
            return Err(EaselError::Configuration("base_url is empty".into()));
        }
        if self.model.is_empty() {
            return Err(EaselError::Configuration("model is empty".into()));
        }
        Ok(())
    }

    /// Base URL with any trailing slash removed.
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_complete_config() {
        let config = EngineConfig::new("sk-test", "https://api.example.com/v1", "gpt-4o");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_api_key() {
        let config = EngineConfig::new("", "https://api.example.com/v1", "gpt-4o");
        assert!(matches!(
            config.validate(),
            Err(EaselError::Configuration(_))
        ));
    }

    #[test]
    fn validate_rejects_empty_base_url() {
        let config = EngineConfig::new("sk-test", "", "gpt-4o");
        assert!(config.validate().is_err());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = EngineConfig::new("sk-test", "https://api.example.com/v1/", "gpt-4o");
        assert_eq!(config.trimmed_base_url(), "https://api.example.com/v1");
    }
}

//! Configuration for the attendance parser

use crate::error::ParserError;
use rollcall_llm::groq::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the completion service credential
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Configuration for the attendance parser
///
/// The credential is not part of this struct; it is read from
/// the environment once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Model identifier sent to the completion service
    pub model: String,

    /// Base URL of the OpenAI-compatible completion service
    pub endpoint: String,

    /// Deadline for one completion call (seconds)
    pub request_timeout_secs: u64,

    /// Longer commands skip the completion service (characters)
    pub max_command_length: usize,
}

impl ParserConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ParserError> {
        if self.model.trim().is_empty() {
            return Err(ParserError::Config("model must not be empty".to_string()));
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ParserError::Config(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ParserError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.max_command_length == 0 {
            return Err(ParserError::Config(
                "max_command_length must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ParserError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ParserError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ParserError> {
        toml::to_string_pretty(self)
            .map_err(|e| ParserError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_command_length: 1_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ParserConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = ParserConfig {
            request_timeout_secs: 0,
            ..ParserConfig::default()
        };
        assert!(matches!(config.validate(), Err(ParserError::Config(_))));
    }

    #[test]
    fn test_bad_endpoint_rejected() {
        let config = ParserConfig {
            endpoint: "api.groq.com".to_string(),
            ..ParserConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ParserConfig::from_toml("request_timeout_secs = 3").unwrap();
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_command_length, 1_000);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(ParserConfig::from_toml("model = 5").is_err());
        assert!(ParserConfig::from_toml("max_command_length = 0").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ParserConfig {
            model: "llama3-70b-8192".to_string(),
            ..ParserConfig::default()
        };
        let toml_str = config.to_toml().unwrap();
        assert_eq!(ParserConfig::from_toml(&toml_str).unwrap(), config);
    }
}

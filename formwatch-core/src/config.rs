// Context configuration

use crate::ValidationContext;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message recorded when a validator fails without one of its own
pub const DEFAULT_INVALID_MESSAGE: &str = "This field is invalid.";

/// Validation context configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Name attached to log events
    pub name: Option<String>,

    /// Message recorded when a validator returns a bare failure
    pub default_message: String,

    /// Enable debug/trace logging of mutations
    pub enable_logging: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            name: None,
            default_message: DEFAULT_INVALID_MESSAGE.to_string(),
            enable_logging: true,
        }
    }
}

impl ContextConfig {
    /// Parse a configuration from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values a context cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_message.trim().is_empty() {
            return Err(ConfigError::EmptyDefaultMessage);
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("default message must not be empty")]
    EmptyDefaultMessage,

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Validation context builder
pub struct ValidationContextBuilder {
    config: ContextConfig,
}

impl ValidationContextBuilder {
    /// Create new validation context builder
    pub fn new() -> Self {
        Self {
            config: ContextConfig::default(),
        }
    }

    /// Name the context in log events
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    /// Set the message recorded for bare failures
    pub fn default_message(mut self, message: impl Into<String>) -> Self {
        self.config.default_message = message.into();
        self
    }

    /// Enable/disable logging
    pub fn enable_logging(mut self, enabled: bool) -> Self {
        self.config.enable_logging = enabled;
        self
    }

    /// Build the context without checking the configuration
    pub fn build(self) -> ValidationContext {
        ValidationContext::with_config(self.config)
    }

    /// Build the context, rejecting an invalid configuration
    pub fn try_build(self) -> Result<ValidationContext, ConfigError> {
        self.config.validate()?;
        Ok(self.build())
    }
}

impl Default for ValidationContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

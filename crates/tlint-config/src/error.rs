//! Error types for configuration validation and loading.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config value for '{field}'{}", hint.as_ref().map(|h| format!(": {}", h)).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    // Layered loading errors (defaults + overrides + environment)
    #[error("failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Extract(Box::new(err))
    }
}

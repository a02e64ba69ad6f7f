//! Domain error types

use thiserror::Error;

/// Error when configuration fails
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

impl ConfigError {
    /// Shorthand for a validation failure on a single key
    pub fn invalid(key: &str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Error when a hook payload cannot be understood
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("{source_label} payload is empty")]
    Empty { source_label: &'static str },

    #[error("{source_label} payload is not valid JSON: {message}")]
    InvalidJson {
        source_label: &'static str,
        message: String,
    },

    #[error("{source_label} payload must be a JSON object")]
    NotAnObject { source_label: &'static str },

    #[error("{source_label} payload is missing the event type field")]
    MissingEvent { source_label: &'static str },

    #[error("{source_label} stream did not contain any JSON object lines")]
    NoObjects { source_label: &'static str },

    #[error("Failed to read {source_label} payload: {message}")]
    ReadFailed {
        source_label: &'static str,
        message: String,
    },
}

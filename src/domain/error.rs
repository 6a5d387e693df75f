//! Domain error types

use thiserror::Error;

/// Local validation failure, raised before anything is sent to the host
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid argument '{name}': {message}")]
pub struct InvalidArgument {
    pub name: String,
    pub message: String,
}

impl InvalidArgument {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Error when a wire string does not name any variant of an enumeration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: \"{input}\"")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub input: String,
}

/// Error when parsing a timeout string
#[derive(Debug, Clone, Error)]
#[error("Invalid timeout format: \"{input}\". Expected format: <number>ms, <number>s, <number>m, or <number>m<number>s (e.g., 500ms, 10s, 1m30s)")]
pub struct TimeoutParseError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
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

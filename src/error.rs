//! Error types for content readers and configuration

use thiserror::Error;

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, BlogError>;

/// Errors raised while reading content or configuration
#[derive(Error, Debug)]
pub enum BlogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Remote store returned {status}: {message}")]
    Remote { status: u16, message: String },
}

impl BlogError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

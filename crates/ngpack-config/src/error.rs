//! Error types for build option loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Options file loading errors
    #[error("options file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported options format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid value for `{field}`{}", hint_suffix(.hint))]
    InvalidValue { field: String, hint: Option<String> },

    #[error("failed to load options: {0}")]
    Load(String),

    // Schema validation errors (no filesystem checks)
    #[error("schema validation failed: {message}{}", hint_suffix(.hint))]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(hint) => format!(" ({hint})"),
        None => String::new(),
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(err.to_string())
    }
}

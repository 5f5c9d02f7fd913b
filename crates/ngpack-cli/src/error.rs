//! Error handling for the ngpack CLI.
//!
//! Commands return [`CliError`]; `main` turns it into a miette report.
//! Assembly errors keep their own diagnostic code and help text.

use miette::Report;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Options file loading or validation failed
    #[error("Configuration error: {0}")]
    Config(#[from] ngpack_config::ConfigError),

    /// The options could not be turned into a bundler configuration
    #[error(transparent)]
    Assemble(#[from] ngpack_bundler::Error),

    /// Could not determine or use a directory given on the command line
    #[error("Invalid directory: {}", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Convert a CLI error into a miette report.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Assemble(e) => Report::new(e),
        _ => miette::miette!("{}", err),
    }
}

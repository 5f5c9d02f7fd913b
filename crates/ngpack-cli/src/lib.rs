//! ngpack CLI - bundler configuration for Angular-style front-end builds.
//!
//! The binary loads build options, assembles the configuration the external
//! bundler consumes and prints it as JSON.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`commands`] - `assemble` and `check`
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - Status messages on stderr
//!
//! # Example
//!
//! ```rust
//! use ngpack_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};

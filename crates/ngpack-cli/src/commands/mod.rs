//! Command implementations.
//!
//! - [`assemble`] - Assemble and print the bundler configuration
//! - [`check`] - Validate an options file

pub mod assemble;
pub mod check;

pub use assemble::execute as assemble_execute;
pub use check::execute as check_execute;

use ngpack_config::{BuildOptions, OptionsLoader};
use std::path::Path;

use crate::error::Result;

/// Load options from `path`, with or without environment overrides.
pub(crate) fn load_options(path: &Path, env: bool) -> Result<BuildOptions> {
    let options = OptionsLoader::new().file(path).env(env).load()?;
    Ok(options)
}

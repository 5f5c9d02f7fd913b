//! Check command implementation.
//!
//! Validates an options file without touching the project.

use ngpack_config::validate_schema;

use crate::cli::CheckArgs;
use crate::commands::load_options;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Errors
///
/// Returns an error when the file cannot be loaded or fails schema
/// validation.
pub fn execute(args: CheckArgs) -> Result<()> {
    let options = load_options(&args.options, !args.no_env)?;
    validate_schema(&options)?;

    if options.main.is_none() {
        ui::warning("No `main` file set; the configuration will have no main entry");
    }

    tracing::debug!(
        scripts = options.scripts.len(),
        assets = options.assets.len(),
        budgets = options.budgets.len(),
        "options checked"
    );

    ui::success(&format!("{} is valid", args.options.display()));
    Ok(())
}

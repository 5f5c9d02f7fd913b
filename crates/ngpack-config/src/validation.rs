//! Schema validation of build options (no filesystem checks).
//!
//! Consistency rules that need resolved paths (asset destinations, script
//! bundle injection flags) are enforced by the assembler itself.

use crate::build::{AssetPattern, BuildOptions};
use crate::error::{ConfigError, Result};

/// Trait for pluggable option validation strategies
pub trait OptionsValidator {
    fn validate(&self, options: &BuildOptions) -> Result<()>;
}

/// Schema-only validation
///
/// # Example
///
/// ```
/// use ngpack_config::{BuildOptions, OptionsValidator, SchemaValidator};
///
/// let options = BuildOptions::new("src/main.ts");
/// SchemaValidator.validate(&options).unwrap();
/// ```
pub struct SchemaValidator;

impl OptionsValidator for SchemaValidator {
    fn validate(&self, options: &BuildOptions) -> Result<()> {
        if options.output_path.as_os_str().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "outputPath cannot be empty".to_string(),
                hint: Some("Set outputPath to a directory such as \"dist\"".to_string()),
            });
        }

        for script in &options.scripts {
            if script.input().as_os_str().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "script input cannot be empty".to_string(),
                    hint: Some("Remove empty entries from the 'scripts' array".to_string()),
                });
            }
        }

        for asset in &options.assets {
            let empty = match asset {
                AssetPattern::Path(path) => path.trim().is_empty(),
                AssetPattern::Detailed(object) => object.glob.trim().is_empty(),
            };
            if empty {
                return Err(ConfigError::SchemaValidation {
                    message: "asset pattern cannot be empty".to_string(),
                    hint: Some("Each asset needs a path or a glob".to_string()),
                });
            }
        }

        for budget in &options.budgets {
            if !budget.has_threshold() {
                return Err(ConfigError::SchemaValidation {
                    message: format!("budget of type {:?} sets no threshold", budget.kind),
                    hint: Some("Add maximumWarning, maximumError or a similar limit".to_string()),
                });
            }
        }

        if options.poll == Some(0) {
            return Err(ConfigError::SchemaValidation {
                message: "poll interval must be greater than zero".to_string(),
                hint: None,
            });
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(options: &BuildOptions) -> Result<()> {
    SchemaValidator.validate(options)
}

#![cfg_attr(docsrs, feature(doc_cfg))]

//! # ngpack-bundler
//!
//! Assembles the configuration an external bundler needs to compile an
//! Angular-style front-end application: entry points, global scripts, asset
//! copying, minifiers, source maps and module resolution.
//!
//! Nothing here compiles code. The assembler only decides which plugins,
//! rules and minifiers to pass on, and how overlapping settings merge.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ngpack_bundler::{ProjectContext, assemble_native};
//! use ngpack_config::BuildOptions;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = BuildOptions::new("src/main.ts").production();
//! let context = ProjectContext::new("/work/app");
//!
//! let config = assemble_native(&options, &context)?;
//! println!("{}", config.to_json_pretty()?);
//! # Ok(()) }
//! ```

pub mod assemble;
pub mod assets;
pub mod conditional;
pub mod context;
pub mod entries;
pub mod features;
pub mod hashing;
pub mod host;
pub mod minimizers;
pub mod output;
pub mod paths;
pub mod plugins;
pub mod rules;
pub mod scripts;

// Logging utilities (optional, enabled with "logging" feature)
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub use logging::{LogLevel, init_logging, init_logging_from_env};

pub use assemble::{Assembler, assemble, assemble_native};
pub use assets::{CopyFrom, CopyPattern};
pub use context::ProjectContext;
pub use entries::EntryMap;
pub use features::{BrowserFeatures, BrowserslistFeatures, LegacySupport, StaticFeatures};
pub use hashing::HashFormat;
pub use host::{FixedHost, NativeHost, ProjectHost};
pub use minimizers::{ChunkFilter, Minimizer, ScriptMinifier, StyleMinifier, TerserOptions};
pub use output::{BundlerConfig, Mode, Pattern};
pub use plugins::PluginSpec;
pub use rules::{LoaderUse, ModuleRule};
pub use scripts::ScriptBundle;

/// Error types for configuration assembly.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dependency directory could not be found from the project root.
    #[error("Cannot locate node_modules directory (searched upwards from {searched_from})")]
    DependencyDirectoryNotFound { searched_from: String },

    /// One bundle mixes injected and lazily loaded global scripts.
    #[error("The {bundle_name} bundle is mixing injected and non-injected scripts.")]
    MixedScriptInjection { bundle_name: String },

    /// An asset would be written outside of the output directory.
    #[error("An asset cannot be written to a location outside of the output path: {output}")]
    AssetOutsideOutputPath { output: String },

    /// A string asset entry does not live under the project source root.
    #[error("The {asset} asset path must start with the project source root ({source_root}).")]
    AssetOutsideSourceRoot { asset: String, source_root: String },

    /// Invalid build options.
    #[error("Invalid options: {0}")]
    Config(#[from] ngpack_config::ConfigError),
}

/// Result type alias for assembly operations.
pub type Result<T> = std::result::Result<T, Error>;

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::DependencyDirectoryNotFound { .. } => "DEPENDENCY_DIRECTORY_NOT_FOUND",
            Error::MixedScriptInjection { .. } => "MIXED_SCRIPT_INJECTION",
            Error::AssetOutsideOutputPath { .. } => "ASSET_OUTSIDE_OUTPUT_PATH",
            Error::AssetOutsideSourceRoot { .. } => "ASSET_OUTSIDE_SOURCE_ROOT",
            Error::Config(_) => "INVALID_OPTIONS",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::DependencyDirectoryNotFound { .. } => Some(Box::new(
                "Install the project dependencies before assembling the build configuration.",
            )),
            Error::MixedScriptInjection { bundle_name } => Some(Box::new(format!(
                "Give every script in the '{bundle_name}' bundle the same 'inject' value, or split them into separate bundles."
            ))),
            Error::AssetOutsideOutputPath { .. } => Some(Box::new(
                "Asset outputs are relative to the output path and must not climb above it.",
            )),
            Error::AssetOutsideSourceRoot { .. } => Some(Box::new(
                "Use the object form ({ glob, input, output }) for assets outside the source root.",
            )),
            Error::Config(_) => None,
        }
    }
}

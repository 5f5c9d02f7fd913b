//! Command-line interface definition.
//!
//! - `ngpack assemble` - Print or write the bundler configuration
//! - `ngpack check` - Validate a build options file

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// ngpack - bundler configuration for Angular-style builds
#[derive(Parser, Debug)]
#[command(
    name = "ngpack",
    version,
    about = "Assembles bundler configuration for Angular-style front-end builds",
    long_about = "ngpack turns the build options of an application (entry points, global scripts,\n\
                  assets, optimization, hashing) into the configuration object an external\n\
                  bundler consumes, and prints it as JSON."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Logs every assembly decision: legacy browser support, entry points,
    /// module aliases.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assemble the bundler configuration
    ///
    /// Loads the options file, applies NGPACK_* environment overrides and
    /// prints the resulting configuration as JSON.
    Assemble(AssembleArgs),

    /// Validate a build options file without assembling
    Check(CheckArgs),
}

/// Arguments for the assemble command
#[derive(Args, Debug, Clone)]
pub struct AssembleArgs {
    /// Build options file (JSON or TOML)
    #[arg(short, long, value_name = "FILE")]
    pub options: PathBuf,

    /// Workspace root; relative paths in the options resolve from here
    ///
    /// Defaults to the current directory.
    #[arg(long, value_name = "DIR")]
    pub workspace_root: Option<PathBuf>,

    /// Project root, relative to the workspace root
    #[arg(long, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Source root that string asset entries must live under
    ///
    /// Defaults to `src` inside the project root.
    #[arg(long, value_name = "DIR")]
    pub source_root: Option<PathBuf>,

    /// TypeScript configuration to read the target and baseUrl from
    ///
    /// Defaults to `tsconfig.json` in the project root when present.
    #[arg(long, value_name = "FILE")]
    pub tsconfig: Option<PathBuf>,

    /// Directory holding the shim files
    #[arg(long, value_name = "DIR")]
    pub shims_dir: Option<PathBuf>,

    /// Write the configuration to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Ignore NGPACK_* environment overrides
    #[arg(long)]
    pub no_env: bool,
}

/// Arguments for the check command
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Build options file (JSON or TOML)
    #[arg(short, long, value_name = "FILE")]
    pub options: PathBuf,

    /// Ignore NGPACK_* environment overrides
    #[arg(long)]
    pub no_env: bool,
}

//! Assemble command implementation.

use ngpack_bundler::{ProjectContext, assemble_native};
use ngpack_config::CompilerOptions;
use std::fs;
use std::path::PathBuf;

use crate::cli::AssembleArgs;
use crate::commands::load_options;
use crate::error::{CliError, Result};
use crate::ui;

/// Build the project context from the command-line paths.
pub fn project_context(args: &AssembleArgs) -> Result<ProjectContext> {
    let workspace_root = match &args.workspace_root {
        Some(root) => std::path::absolute(root)?,
        None => std::env::current_dir()?,
    };
    if !workspace_root.is_dir() {
        return Err(CliError::InvalidDirectory(workspace_root));
    }

    let mut context = ProjectContext::new(workspace_root);
    if let Some(root) = &args.project_root {
        context = context.project_root(root);
    }
    if !context.project_root.is_dir() {
        return Err(CliError::InvalidDirectory(context.project_root));
    }
    if let Some(dir) = &args.source_root {
        context = context.source_root(dir);
    }
    if let Some(dir) = &args.shims_dir {
        context = context.shims_dir(dir);
    }

    let tsconfig: Option<PathBuf> = match &args.tsconfig {
        Some(path) => Some(context.resolve(path)),
        None => Some(context.project_root.join("tsconfig.json")).filter(|path| path.is_file()),
    };
    if let Some(path) = tsconfig {
        context = context.compiler_options(CompilerOptions::from_tsconfig(&path)?);
    }

    Ok(context)
}

/// Execute the assemble command.
///
/// # Steps
///
/// 1. Load the options file and environment overrides
/// 2. Resolve workspace, project and shims directories
/// 3. Read the compiler options
/// 4. Assemble and print (or write) the configuration JSON
pub fn execute(args: AssembleArgs) -> Result<()> {
    let options = load_options(&args.options, !args.no_env)?;
    let context = project_context(&args)?;

    tracing::debug!(
        workspace_root = %context.workspace_root.display(),
        project_root = %context.project_root.display(),
        "assembling"
    );

    let config = assemble_native(&options, &context)?;
    let json = config.to_json_pretty()?;

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json + "\n")?;
            ui::success(&format!("Configuration written to {}", path.display()));
        }
        None => println!("{json}"),
    }

    Ok(())
}

//! ngpack - assembles bundler configuration for Angular-style builds.
//!
//! Parses arguments, sets up logging and dispatches to the commands.

use clap::Parser;
use miette::Result;
use ngpack_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init(args.no_color, args.quiet);

    let result = match args.command {
        cli::Command::Assemble(assemble_args) => commands::assemble_execute(assemble_args),
        cli::Command::Check(check_args) => commands::check_execute(check_args),
    };

    result.map_err(error::cli_error_to_miette)
}

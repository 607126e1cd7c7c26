//! twconf CLI entry point: argument parsing, logging initialization and
//! command dispatch.

use clap::Parser;
use miette::Result;
use twconf_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Check(check_args) => commands::check_execute(check_args),
        cli::Command::Show(show_args) => commands::show_execute(show_args),
    };

    result.map_err(error::cli_error_to_miette)
}

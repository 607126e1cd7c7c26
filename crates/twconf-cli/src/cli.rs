//! Command-line interface definition for twconf.
//!
//! # Command Structure
//!
//! - `twconf check` - Load, validate and report on the project's config
//! - `twconf show` - Print the loaded config as JSON or TOML

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// twconf - Inspect Tailwind CSS configuration
#[derive(Parser, Debug)]
#[command(
    name = "twconf",
    version,
    about = "Inspect and validate Tailwind CSS configuration",
    long_about = "twconf loads a project's tailwind.config.js (or its JSON/TOML/package.json\n\
                  equivalents), validates it and reports what the CSS build would see:\n\
                  content patterns, theme extensions, plugin activations and plugin options."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    ///
    /// Outputs plain text without ANSI color codes. Useful for logging to
    /// files or systems that don't support colored terminal output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available twconf subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the configuration
    ///
    /// Loads the config, checks its shape, reports how many files each
    /// content pattern matches and optionally resolves plugin activations.
    Check(CheckArgs),

    /// Print the loaded configuration
    Show(ShowArgs),
}

/// Where to find the project and its config
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Path to the config file
    ///
    /// If not provided, searches the project root for tailwind.config.{js,cjs,mjs,ts,json},
    /// tailwind.toml and package.json, in that order.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project root that content patterns are resolved against
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Resolve plugin activations against the known first-party plugins
    #[arg(long)]
    pub plugins: bool,

    /// Fail when a content pattern matches no files
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the show command
#[derive(Args, Debug, Clone, Default)]
pub struct ShowArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    #[value(name = "json")]
    Json,

    #[value(name = "toml")]
    Toml,
}

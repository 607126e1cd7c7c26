//! Show command implementation.

use crate::cli::{OutputFormat, ShowArgs};
use crate::commands::load_config;
use crate::error::Result;
use crate::settings::Settings;

/// Execute the show command, printing the loaded config to stdout.
pub fn execute(args: ShowArgs) -> Result<()> {
    let settings = Settings::load(&args.project)?;
    let (path, config) = load_config(&settings)?;
    tracing::debug!("Showing {}", path.display());

    println!("{}", render(&config, args.format)?);
    Ok(())
}

/// Render the descriptor in the requested format.
pub fn render(config: &twconf::TailwindConfig, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(config)?,
        OutputFormat::Toml => toml::to_string_pretty(config)?,
    })
}

//! Check command implementation.
//!
//! Validates the configuration without running a CSS build.

use twconf::{
    ConfigValidator, ContentMatcher, FsValidator, PluginRegistry, SchemaValidator, TailwindConfig,
};

use crate::cli::CheckArgs;
use crate::commands::load_config;
use crate::error::Result;
use crate::settings::Settings;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load the config (explicit `--config` or discovery under the root)
/// 2. Schema validation
/// 3. Count the files each content pattern matches (warn on zero, fail with `--strict`)
/// 4. Resolve plugin activations (if `--plugins`)
///
/// # Errors
///
/// Returns errors for unreadable, malformed or invalid configuration.
pub fn execute(args: CheckArgs) -> Result<()> {
    let settings = Settings::load(&args.project)?;

    ui::info("Checking configuration...");
    let (path, config) = load_config(&settings)?;
    SchemaValidator.validate(&config)?;
    ui::success(&format!("Loaded {}", path.display()));

    let content_root = settings.content_root(&path, config.content.is_relative());
    report_content(&config, &content_root)?;
    if args.strict {
        FsValidator::new(&content_root).validate(&config)?;
    }

    report_plugins(&config, args.plugins)?;

    ui::success("All checks passed!");
    Ok(())
}

fn report_content(config: &TailwindConfig, root: &std::path::Path) -> Result<()> {
    ui::info(&format!(
        "Content patterns (relative to {}):",
        root.display()
    ));

    let matcher = ContentMatcher::new(root, config.content_patterns())?;
    for (pattern, count) in matcher.matches_per_pattern()? {
        match count {
            0 => ui::warning(&format!("  {pattern} matched no files")),
            1 => ui::detail(&format!("{pattern} → 1 file")),
            n => ui::detail(&format!("{pattern} → {n} files")),
        }
    }
    for pattern in config.content_patterns().iter().filter(|p| p.starts_with('!')) {
        ui::detail(&format!("{pattern} (excluded)"));
    }
    Ok(())
}

fn report_plugins(config: &TailwindConfig, resolve: bool) -> Result<()> {
    if config.plugins.is_empty() {
        ui::info("No plugins activated");
    } else {
        let plugins = if resolve {
            PluginRegistry::default().resolve(config)?
        } else {
            config.plugins.iter().collect()
        };

        ui::info(&format!("Plugins ({}):", plugins.len()));
        for plugin in plugins {
            match &plugin.args {
                Some(args) => ui::detail(&format!("{} ({} options)", plugin.name, args.len())),
                None => ui::detail(&plugin.name),
            }
        }
    }

    if let Some(daisyui) = config.daisyui()? {
        let names = daisyui.themes.names();
        if names.is_empty() {
            ui::info("daisyUI themes: default");
        } else {
            ui::info(&format!("daisyUI themes: {}", names.join(", ")));
        }
    }

    Ok(())
}

//! CLI settings layered from defaults, environment and flags.
//!
//! Priority: flags > `TWCONF_*` environment variables > defaults.
//! These settings only say where to look; the config file itself never
//! reads the environment.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::cli::ProjectArgs;
use crate::error::Result;

/// Prefix for environment overrides (`TWCONF_ROOT`, `TWCONF_CONFIG`)
pub const ENV_PREFIX: &str = "TWCONF_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Project root; content patterns resolve against it
    pub root: PathBuf,

    /// Explicit config file, bypassing discovery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            config: None,
        }
    }
}

/// Flag values that were actually given on the command line
#[derive(Debug, Default, Serialize)]
struct FlagOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings for a command.
    pub fn load(args: &ProjectArgs) -> Result<Self> {
        let flags = FlagOverrides {
            root: args.root.clone(),
            config: args.config.clone(),
        };

        let settings: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(ENV_PREFIX).only(&["root", "config"]))
            .merge(Serialized::defaults(flags))
            .extract()
            .map_err(Box::new)?;

        tracing::debug!(
            root = %settings.root.display(),
            config = ?settings.config,
            "Resolved settings"
        );
        Ok(settings)
    }

    /// Directory content patterns are resolved against.
    ///
    /// A config with `content.relative` resolves against its own directory.
    pub fn content_root(&self, config_path: &Path, relative: bool) -> PathBuf {
        if relative {
            if let Some(parent) = config_path.parent() {
                if !parent.as_os_str().is_empty() {
                    return parent.to_path_buf();
                }
            }
        }
        self.root.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            std::env::remove_var("TWCONF_ROOT");
            std::env::remove_var("TWCONF_CONFIG");
        }
    }

    #[test]
    #[serial]
    fn defaults_without_env_or_flags() {
        clear_env();
        let settings = Settings::load(&ProjectArgs::default()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    #[serial]
    fn env_overrides_defaults() {
        clear_env();
        unsafe {
            std::env::set_var("TWCONF_ROOT", "site");
            std::env::set_var("TWCONF_CONFIG", "site/tailwind.toml");
        }
        let settings = Settings::load(&ProjectArgs::default()).unwrap();
        clear_env();

        assert_eq!(settings.root, PathBuf::from("site"));
        assert_eq!(settings.config, Some(PathBuf::from("site/tailwind.toml")));
    }

    #[test]
    #[serial]
    fn flags_override_env() {
        clear_env();
        unsafe {
            std::env::set_var("TWCONF_ROOT", "from-env");
        }
        let args = ProjectArgs {
            config: None,
            root: Some(PathBuf::from("from-flag")),
        };
        let settings = Settings::load(&args).unwrap();
        clear_env();

        assert_eq!(settings.root, PathBuf::from("from-flag"));
        assert_eq!(settings.config, None);
    }

    #[test]
    fn content_root_follows_relative_flag() {
        let settings = Settings {
            root: PathBuf::from("project"),
            config: None,
        };
        let config = Path::new("project/web/tailwind.config.js");

        assert_eq!(settings.content_root(config, false), PathBuf::from("project"));
        assert_eq!(settings.content_root(config, true), PathBuf::from("project/web"));
        assert_eq!(
            settings.content_root(Path::new("tailwind.config.js"), true),
            PathBuf::from("project")
        );
    }
}

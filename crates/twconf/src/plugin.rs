//! Plugin activations and consumer-side plugin resolution.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::descriptor::TailwindConfig;
use crate::error::{ConfigError, Result};

/// A plugin activation: `require("name")` or `require("name")({ ...args })`.
///
/// Deserializes from either a bare name or `{ "name": ..., "args": {...} }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPluginReference")]
pub struct PluginReference {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPluginReference {
    Name(String),
    Call {
        name: String,
        #[serde(default)]
        args: Option<Map<String, Value>>,
    },
}

impl From<RawPluginReference> for PluginReference {
    fn from(raw: RawPluginReference) -> Self {
        match raw {
            RawPluginReference::Name(name) => Self { name, args: None },
            RawPluginReference::Call { name, args } => Self { name, args },
        }
    }
}

impl PluginReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: None,
        }
    }

    pub fn with_args(mut self, args: Map<String, Value>) -> Self {
        self.args = Some(args);
        self
    }
}

/// Plugins shipped by Tailwind Labs plus daisyUI.
const FIRST_PARTY_PLUGINS: &[&str] = &[
    "@tailwindcss/forms",
    "@tailwindcss/typography",
    "@tailwindcss/aspect-ratio",
    "@tailwindcss/container-queries",
    "daisyui",
];

/// Set of plugin names a consumer is able to load.
///
/// The loader itself never resolves plugins; a consumer uses this to fail
/// fast with [`ConfigError::UnknownPluginReference`] before doing any work.
///
/// # Example
///
/// ```
/// use twconf::{PluginRegistry, TailwindConfig};
/// use serde_json::json;
///
/// let config = TailwindConfig::from_value(json!({
///     "content": ["index.html"],
///     "plugins": ["daisyui"]
/// })).unwrap();
///
/// let resolved = PluginRegistry::default().resolve(&config).unwrap();
/// assert_eq!(resolved[0].name, "daisyui");
/// ```
#[derive(Debug, Clone)]
pub struct PluginRegistry {
    known: FxHashSet<String>,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::with_known(FIRST_PARTY_PLUGINS.iter().copied())
    }
}

impl PluginRegistry {
    /// Registry that knows nothing.
    pub fn empty() -> Self {
        Self {
            known: FxHashSet::default(),
        }
    }

    pub fn with_known<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>) -> &mut Self {
        self.known.insert(name.into());
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    /// Check every activation (presets first, then plugins) against the
    /// registry, returning the plugin activations in declaration order.
    pub fn resolve<'a>(&self, config: &'a TailwindConfig) -> Result<Vec<&'a PluginReference>> {
        for reference in config.presets.iter().chain(&config.plugins) {
            if !self.contains(&reference.name) {
                return Err(ConfigError::UnknownPluginReference {
                    name: reference.name.clone(),
                });
            }
        }

        tracing::debug!(count = config.plugins.len(), "Resolved plugin activations");
        Ok(config.plugins.iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(plugins: Value) -> TailwindConfig {
        TailwindConfig::from_value(json!({ "content": ["a.html"], "plugins": plugins })).unwrap()
    }

    #[test]
    fn deserializes_bare_name() {
        let reference: PluginReference = serde_json::from_value(json!("daisyui")).unwrap();
        assert_eq!(reference, PluginReference::new("daisyui"));
    }

    #[test]
    fn deserializes_call_form() {
        let reference: PluginReference = serde_json::from_value(json!({
            "name": "@tailwindcss/forms",
            "args": { "strategy": "class" }
        }))
        .unwrap();
        assert_eq!(reference.name, "@tailwindcss/forms");
        assert_eq!(reference.args.unwrap()["strategy"], json!("class"));
    }

    #[test]
    fn serializes_without_empty_args() {
        let value = serde_json::to_value(PluginReference::new("daisyui")).unwrap();
        assert_eq!(value, json!({ "name": "daisyui" }));
    }

    #[test]
    fn activation_order_is_preserved() {
        let config = config(json!(["daisyui", "@tailwindcss/typography", "@tailwindcss/forms"]));
        let names: Vec<&str> = PluginRegistry::default()
            .resolve(&config)
            .unwrap()
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["daisyui", "@tailwindcss/typography", "@tailwindcss/forms"]);
    }

    #[test]
    fn unknown_plugin_is_rejected() {
        let config = config(json!(["daisyui", "tailwindcss-animate"]));
        let err = PluginRegistry::default().resolve(&config).unwrap_err();
        match err {
            ConfigError::UnknownPluginReference { name } => assert_eq!(name, "tailwindcss-animate"),
            other => panic!("expected UnknownPluginReference, got {other:?}"),
        }
    }

    #[test]
    fn registered_plugins_resolve() {
        let config = config(json!(["tailwindcss-animate"]));
        let mut registry = PluginRegistry::empty();
        assert!(registry.resolve(&config).is_err());
        registry.register("tailwindcss-animate");
        assert_eq!(registry.resolve(&config).unwrap().len(), 1);
    }
}

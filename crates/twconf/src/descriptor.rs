//! The configuration descriptor handed to the CSS build tool.
//!
//! This matches the structure of `tailwind.config.js` in Rust types. The
//! descriptor is built once by [`crate::load`] (or [`TailwindConfig::from_value`])
//! and never mutated afterwards.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};
use crate::plugin::PluginReference;
use crate::schema;
use crate::source::{self, SourceFormat};

/// Plugin-owned options record. Its inner shape is never inspected here.
pub type PluginOptions = Map<String, Value>;

/// Name under which daisyUI reads its options.
pub const DAISYUI: &str = "daisyui";

/// Tailwind CSS configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailwindConfig {
    /// Files to scan for class names
    pub content: ContentConfig,

    /// Theme customization
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Plugin activations, in declaration order
    #[serde(default)]
    pub plugins: Vec<PluginReference>,

    /// Presets layered under this config, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presets: Vec<PluginReference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<DarkMode>,

    /// Prefix added to every generated utility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub important: Option<Important>,

    /// Variant separator (`:` unless overridden)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,

    /// Classes generated regardless of content scanning
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub safelist: Vec<String>,

    /// Classes never generated, even when found in content
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocklist: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_plugins: Option<CorePlugins>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future: Option<FeatureFlags>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experimental: Option<FeatureFlags>,

    /// Legacy engine mode (`"jit"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Plugin options keyed by plugin name (e.g. `daisyui`)
    #[serde(flatten)]
    pub plugin_options: IndexMap<String, PluginOptions>,
}

/// Content sources, either a bare list or the `{ files, relative }` form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentConfig {
    Patterns(Vec<String>),
    Files {
        files: Vec<String>,
        /// Resolve patterns relative to the config file instead of the cwd
        #[serde(default)]
        relative: bool,
    },
}

impl ContentConfig {
    pub fn patterns(&self) -> &[String] {
        match self {
            Self::Patterns(patterns) => patterns,
            Self::Files { files, .. } => files,
        }
    }

    pub fn is_relative(&self) -> bool {
        matches!(self, Self::Files { relative: true, .. })
    }
}

/// Theme configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Extend the default theme, keyed by token category
    #[serde(default)]
    pub extend: IndexMap<String, Value>,

    /// Categories that replace the defaults outright
    #[serde(flatten)]
    pub overrides: IndexMap<String, Value>,
}

/// Dark mode configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DarkMode {
    Strategy(DarkModeStrategy),
    /// `["selector", "[data-theme=dark]"]`
    WithSelector(DarkModeStrategy, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkModeStrategy {
    /// Use the `prefers-color-scheme` media query
    Media,
    /// Use class-based dark mode
    Class,
    Selector,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Important {
    Flag(bool),
    Selector(String),
}

/// Core plugins to enable: an allow-list, or per-plugin toggles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorePlugins {
    List(Vec<String>),
    Toggles(IndexMap<String, bool>),
}

impl CorePlugins {
    /// Whether the core plugin `name` is enabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        match self {
            Self::List(enabled) => enabled.iter().any(|p| p == name),
            Self::Toggles(toggles) => toggles.get(name).copied().unwrap_or(true),
        }
    }
}

/// `future` / `experimental` flags: individual flags or `"all"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureFlags {
    All(AllFlags),
    Flags(IndexMap<String, Value>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllFlags {
    All,
}

impl TailwindConfig {
    /// Create from a value tree (for programmatic config or already-parsed sources)
    ///
    /// # Example
    ///
    /// ```
    /// use twconf::TailwindConfig;
    /// use serde_json::json;
    ///
    /// let value = json!({
    ///     "content": ["./static-files/**/*.{html,js}"],
    ///     "theme": { "extend": {} },
    ///     "plugins": ["daisyui"],
    ///     "daisyui": { "themes": ["light", "dark", "cupcake"] }
    /// });
    ///
    /// let config = TailwindConfig::from_value(value).unwrap();
    /// assert_eq!(config.content_patterns(), ["./static-files/**/*.{html,js}"]);
    /// ```
    pub fn from_value(mut value: Value) -> Result<Self> {
        schema::check_shape(&value)?;
        schema::strip_nulls(&mut value);

        serde_json::from_value(value).map_err(|e| ConfigError::malformed("config", e.to_string()))
    }

    /// Parse a config from source text. `name` is used in diagnostics.
    pub fn from_source(source: &str, format: SourceFormat, name: &str) -> Result<Self> {
        let value = source::parse_source(source, format, name)?;
        Self::from_value(value)
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::malformed("config", e.to_string()))
    }

    pub fn content_patterns(&self) -> &[String] {
        self.content.patterns()
    }

    pub fn theme_extensions(&self) -> &IndexMap<String, Value> {
        &self.theme.extend
    }

    pub fn plugin_activations(&self) -> &[PluginReference] {
        &self.plugins
    }

    /// Raw options record for `plugin`, if the config has one.
    pub fn plugin_options(&self, plugin: &str) -> Option<&PluginOptions> {
        self.plugin_options.get(plugin)
    }

    /// Deserialize the options record for `plugin` into a plugin-specific type.
    ///
    /// Returns `Ok(None)` when the config carries no options for `plugin`.
    pub fn plugin_options_as<T: DeserializeOwned>(&self, plugin: &str) -> Result<Option<T>> {
        let Some(options) = self.plugin_options(plugin) else {
            return Ok(None);
        };

        serde_json::from_value(Value::Object(options.clone()))
            .map(Some)
            .map_err(|e| ConfigError::malformed(plugin, e.to_string()))
    }

    /// Typed view of the `daisyui` options record.
    pub fn daisyui(&self) -> Result<Option<DaisyUiOptions>> {
        self.plugin_options_as(DAISYUI)
    }
}

/// Options read by the daisyUI plugin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaisyUiOptions {
    /// Themes to include, in order; the first is the default
    #[serde(default)]
    pub themes: DaisyUiThemes,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utils: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_root: Option<String>,
}

/// `themes` accepts `true` (all built-in), `false` (only light/dark) or a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DaisyUiThemes {
    All(bool),
    List(Vec<DaisyUiTheme>),
}

impl Default for DaisyUiThemes {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl DaisyUiThemes {
    /// Theme names in declaration order (custom themes contribute their keys).
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::All(_) => Vec::new(),
            Self::List(themes) => themes.iter().flat_map(DaisyUiTheme::names).collect(),
        }
    }
}

/// Either a built-in theme name or an inline `{ name: { ...colors } }` theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DaisyUiTheme {
    Named(String),
    Custom(IndexMap<String, Value>),
}

impl DaisyUiTheme {
    fn names(&self) -> Vec<&str> {
        match self {
            Self::Named(name) => vec![name.as_str()],
            Self::Custom(themes) => themes.keys().map(String::as_str).collect(),
        }
    }
}

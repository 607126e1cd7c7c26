//! Shape checks run on the raw value tree before typed deserialization.
//!
//! serde reports type mismatches without a usable field path once untagged
//! and flattened types are involved, so the expected shape is checked here
//! first and the first offending field is reported by its dotted path
//! (`theme.extend`, `plugins[1].args`, ...).

use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

/// Top-level fields with a fixed meaning. Every other top-level key is a
/// plugin options record.
pub const KNOWN_FIELDS: &[&str] = &[
    "content",
    "theme",
    "plugins",
    "presets",
    "darkMode",
    "prefix",
    "important",
    "separator",
    "safelist",
    "blocklist",
    "corePlugins",
    "future",
    "experimental",
    "mode",
];

const DARK_MODE_STRATEGIES: &[&str] = &["media", "class", "selector"];

/// Check that `value` has the shape of a configuration record.
pub fn check_shape(value: &Value) -> Result<()> {
    let root = value.as_object().ok_or_else(|| {
        ConfigError::malformed(
            "<root>",
            format!("expected the config to be an object, found {}", kind(value)),
        )
    })?;

    check_content(root.get("content"))?;

    if let Some(theme) = present(root, "theme") {
        let theme = expect_object("theme", theme)?;
        if let Some(extend) = present(theme, "extend") {
            expect_object("theme.extend", extend)?;
        }
    }

    for field in ["plugins", "presets"] {
        if let Some(list) = present(root, field) {
            let Value::Array(items) = list else {
                return Err(expected(field, "an array of plugin references", list));
            };
            for (index, item) in items.iter().enumerate() {
                check_plugin_reference(&format!("{field}[{index}]"), item)?;
            }
        }
    }

    if let Some(mode) = present(root, "darkMode") {
        check_dark_mode(mode)?;
    }

    for field in ["prefix", "separator"] {
        if let Some(value) = present(root, field) {
            if !value.is_string() {
                return Err(expected(field, "a string", value));
            }
        }
    }

    if let Some(important) = present(root, "important") {
        if !(important.is_boolean() || important.is_string()) {
            return Err(expected("important", "a boolean or a selector string", important));
        }
    }

    for field in ["safelist", "blocklist"] {
        if let Some(list) = present(root, field) {
            check_string_list(field, list, false)?;
        }
    }

    if let Some(core_plugins) = present(root, "corePlugins") {
        check_core_plugins(core_plugins)?;
    }

    for field in ["future", "experimental"] {
        if let Some(flags) = present(root, field) {
            match flags {
                Value::Object(_) => {}
                Value::String(preset) if preset == "all" => {}
                other => return Err(expected(field, "an object of flags or \"all\"", other)),
            }
        }
    }

    if let Some(mode) = present(root, "mode") {
        if !mode.is_string() {
            return Err(expected("mode", "a string", mode));
        }
    }

    for (key, options) in root {
        if KNOWN_FIELDS.contains(&key.as_str()) || options.is_null() {
            continue;
        }
        if !options.is_object() {
            return Err(ConfigError::malformed(
                key.as_str(),
                format!(
                    "plugin options must be an object, found {}",
                    kind(options)
                ),
            ));
        }
    }

    Ok(())
}

fn check_content(content: Option<&Value>) -> Result<()> {
    match content {
        None | Some(Value::Null) => Err(ConfigError::malformed(
            "content",
            "missing required field; list the files to scan for class names",
        )),
        Some(list @ Value::Array(_)) => check_string_list("content", list, true),
        Some(Value::Object(object)) => {
            match object.get("files") {
                Some(files) => check_string_list("content.files", files, true)?,
                None => {
                    return Err(ConfigError::malformed(
                        "content.files",
                        "missing required field",
                    ));
                }
            }
            if let Some(relative) = present(object, "relative") {
                if !relative.is_boolean() {
                    return Err(expected("content.relative", "a boolean", relative));
                }
            }
            let unsupported = object
                .iter()
                .find(|(k, v)| !v.is_null() && !matches!(k.as_str(), "files" | "relative"));
            if let Some((key, _)) = unsupported {
                return Err(ConfigError::malformed(
                    format!("content.{key}"),
                    "only `files` and `relative` are supported; custom extractors and transforms need a JavaScript runtime",
                ));
            }
            Ok(())
        }
        Some(other) => Err(expected("content", "an array of glob patterns", other)),
    }
}

fn check_string_list(field: &str, value: &Value, non_empty: bool) -> Result<()> {
    let Value::Array(items) = value else {
        return Err(expected(field, "an array of strings", value));
    };
    if non_empty && items.is_empty() {
        return Err(ConfigError::malformed(
            field,
            "must contain at least one pattern",
        ));
    }
    for (index, item) in items.iter().enumerate() {
        if !item.is_string() {
            return Err(expected(&format!("{field}[{index}]"), "a string", item));
        }
    }
    Ok(())
}

fn check_plugin_reference(field: &str, value: &Value) -> Result<()> {
    match value {
        Value::String(name) if !name.trim().is_empty() => Ok(()),
        Value::String(_) => Err(ConfigError::malformed(field, "plugin name cannot be empty")),
        Value::Object(reference) => {
            match reference.get("name") {
                Some(Value::String(name)) if !name.trim().is_empty() => {}
                Some(Value::String(_)) => {
                    return Err(ConfigError::malformed(
                        format!("{field}.name"),
                        "plugin name cannot be empty",
                    ));
                }
                Some(other) => return Err(expected(&format!("{field}.name"), "a string", other)),
                None => {
                    return Err(ConfigError::malformed(
                        format!("{field}.name"),
                        "missing required field",
                    ));
                }
            }
            if let Some(args) = present(reference, "args") {
                expect_object(&format!("{field}.args"), args)?;
            }
            if let Some(extra) = reference.keys().find(|k| !matches!(k.as_str(), "name" | "args")) {
                return Err(ConfigError::malformed(
                    format!("{field}.{extra}"),
                    "plugin references only accept `name` and `args`",
                ));
            }
            Ok(())
        }
        other => Err(expected(field, "a plugin name or { name, args }", other)),
    }
}

// Either a list of enabled core plugins or `{ name: bool }` toggles
fn check_core_plugins(value: &Value) -> Result<()> {
    match value {
        list @ Value::Array(_) => check_string_list("corePlugins", list, false),
        Value::Object(toggles) => {
            for (name, enabled) in toggles {
                if !enabled.is_boolean() {
                    return Err(expected(&format!("corePlugins.{name}"), "a boolean", enabled));
                }
            }
            Ok(())
        }
        other => Err(expected("corePlugins", "an array or an object of booleans", other)),
    }
}

fn check_dark_mode(mode: &Value) -> Result<()> {
    let strategy_ok = |s: &str| DARK_MODE_STRATEGIES.contains(&s);
    match mode {
        Value::String(s) if strategy_ok(s.as_str()) => Ok(()),
        Value::Array(parts) => match parts.as_slice() {
            [Value::String(s), Value::String(_)] if s.as_str() != "media" && strategy_ok(s.as_str()) => {
                Ok(())
            }
            _ => Err(ConfigError::malformed(
                "darkMode",
                "expected [\"class\" | \"selector\", <selector>]",
            )),
        },
        other => Err(expected(
            "darkMode",
            "one of \"media\", \"class\", \"selector\"",
            other,
        )),
    }
}

/// Drop `null` entries that stand for "absent" so typed defaults apply.
pub fn strip_nulls(value: &mut Value) {
    let Some(root) = value.as_object_mut() else {
        return;
    };
    root.retain(|_, v| !v.is_null());
    for nested in ["theme", "content"] {
        if let Some(Value::Object(object)) = root.get_mut(nested) {
            object.retain(|_, v| !v.is_null());
        }
    }
}

fn present<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

fn expect_object<'a>(field: &str, value: &'a Value) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| expected(field, "an object", value))
}

fn expected(field: &str, what: &str, found: &Value) -> ConfigError {
    ConfigError::malformed(field, format!("expected {what}, found {}", kind(found)))
}

/// Human-readable JSON type name.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_of(value: Value) -> String {
        check_shape(&value)
            .unwrap_err()
            .field()
            .expect("error names a field")
            .to_string()
    }

    #[test]
    fn accepts_minimal_config() {
        check_shape(&json!({ "content": ["index.html"] })).unwrap();
    }

    #[test]
    fn accepts_full_config() {
        check_shape(&json!({
            "content": { "files": ["./src/**/*.html"], "relative": true },
            "theme": { "extend": { "colors": { "brand": "#123456" } }, "screens": {} },
            "plugins": ["daisyui", { "name": "@tailwindcss/forms", "args": { "strategy": "class" } }],
            "presets": [],
            "darkMode": ["selector", "[data-theme=dark]"],
            "prefix": "tw-",
            "important": "#app",
            "separator": "_",
            "safelist": ["bg-red-500"],
            "blocklist": ["container"],
            "corePlugins": { "preflight": false },
            "future": { "hoverOnlyWhenSupported": true },
            "experimental": "all",
            "mode": "jit",
            "daisyui": { "themes": ["light"] }
        }))
        .unwrap();
    }

    #[test]
    fn tailwind_fields_are_not_plugin_options() {
        check_shape(&json!({ "content": ["a.html"], "corePlugins": ["preflight"] })).unwrap();
        check_shape(&json!({ "content": ["a.html"], "blocklist": ["container"] })).unwrap();
        check_shape(&json!({ "content": ["a.html"], "future": "all" })).unwrap();
    }

    #[test]
    fn rejects_malformed_tailwind_fields() {
        assert_eq!(
            field_of(json!({ "content": ["a"], "corePlugins": { "preflight": "no" } })),
            "corePlugins.preflight"
        );
        assert_eq!(field_of(json!({ "content": ["a"], "corePlugins": "preflight" })), "corePlugins");
        assert_eq!(field_of(json!({ "content": ["a"], "blocklist": [1] })), "blocklist[0]");
        assert_eq!(field_of(json!({ "content": ["a"], "future": "some" })), "future");
        assert_eq!(field_of(json!({ "content": ["a"], "experimental": [] })), "experimental");
        assert_eq!(field_of(json!({ "content": ["a"], "mode": 3 })), "mode");
    }

    #[test]
    fn rejects_unsupported_content_keys() {
        assert_eq!(
            field_of(json!({ "content": { "files": ["a.html"], "extract": { "md": "x" } } })),
            "content.extract"
        );
        assert_eq!(
            field_of(json!({ "content": { "files": ["a.html"], "transform": {} } })),
            "content.transform"
        );
    }

    #[test]
    fn rejects_missing_content() {
        assert_eq!(field_of(json!({ "theme": {} })), "content");
        assert_eq!(field_of(json!({ "content": null })), "content");
    }

    #[test]
    fn rejects_empty_content() {
        assert_eq!(field_of(json!({ "content": [] })), "content");
        assert_eq!(field_of(json!({ "content": { "files": [] } })), "content.files");
    }

    #[test]
    fn rejects_non_string_patterns() {
        assert_eq!(field_of(json!({ "content": ["a.html", 3] })), "content[1]");
    }

    #[test]
    fn rejects_non_object_root() {
        assert_eq!(field_of(json!(["content"])), "<root>");
    }

    #[test]
    fn rejects_non_object_theme_extend() {
        assert_eq!(
            field_of(json!({ "content": ["a"], "theme": { "extend": [] } })),
            "theme.extend"
        );
        assert_eq!(field_of(json!({ "content": ["a"], "theme": "dark" })), "theme");
    }

    #[test]
    fn rejects_malformed_plugin_references() {
        assert_eq!(field_of(json!({ "content": ["a"], "plugins": "daisyui" })), "plugins");
        assert_eq!(field_of(json!({ "content": ["a"], "plugins": [""] })), "plugins[0]");
        assert_eq!(
            field_of(json!({ "content": ["a"], "plugins": ["x", { "args": {} }] })),
            "plugins[1].name"
        );
        assert_eq!(
            field_of(json!({ "content": ["a"], "plugins": [{ "name": "x", "args": 1 }] })),
            "plugins[0].args"
        );
        assert_eq!(
            field_of(json!({ "content": ["a"], "presets": [{ "name": "x", "handler": 1 }] })),
            "presets[0].handler"
        );
    }

    #[test]
    fn rejects_non_object_plugin_options() {
        assert_eq!(field_of(json!({ "content": ["a"], "daisyui": ["light"] })), "daisyui");
    }

    #[test]
    fn rejects_unknown_dark_mode() {
        assert_eq!(field_of(json!({ "content": ["a"], "darkMode": "auto" })), "darkMode");
        assert_eq!(
            field_of(json!({ "content": ["a"], "darkMode": ["media", ".dark"] })),
            "darkMode"
        );
    }

    #[test]
    fn null_optional_fields_are_absent() {
        let mut value = json!({
            "content": ["a"],
            "theme": { "extend": null },
            "plugins": null,
            "daisyui": null
        });
        check_shape(&value).unwrap();
        strip_nulls(&mut value);
        assert_eq!(value, json!({ "content": ["a"], "theme": {} }));
    }
}

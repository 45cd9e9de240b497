//! Base settings loading from configuration files.
//!
//! Deployment-independent settings (secret key, time zone, static root, ...)
//! may live in a TOML or JSON file. The environment initializers then run on
//! top of the loaded base.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Deep-merge a TOML or JSON file over the defaults.
//! 3. Apply environment overrides from an [`EnvSnapshot`].
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `SECRET_KEY` | `secret_key` |
//! | `LOG_LEVEL` | `log_level` |
//! | `LANGUAGE_CODE` | `language_code` |
//! | `TIME_ZONE` | `time_zone` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use portal_conf_core::env::EnvSnapshot;
//! use portal_conf_core::settings_loader;
//!
//! let env = EnvSnapshot::from_process_env();
//! let mut settings = settings_loader::from_file("config/portal.toml").unwrap();
//! settings_loader::apply_env_overrides(&mut settings, &env);
//! ```

use std::path::Path;

use crate::env::EnvSnapshot;
use crate::error::{ConfError, ConfResult};
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
pub fn from_toml_str(toml_str: &str) -> ConfResult<Settings> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| ConfError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_into_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> ConfResult<Settings> {
    from_toml_str(&read_file(path.as_ref(), "TOML")?)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> ConfResult<Settings> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| ConfError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_into_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> ConfResult<Settings> {
    from_json_str(&read_file(path.as_ref(), "JSON")?)
}

/// Loads settings from a file, picking the format from its extension.
///
/// `.json` files are parsed as JSON; everything else as TOML.
pub fn from_file(path: impl AsRef<Path>) -> ConfResult<Settings> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        from_json_file(path)
    } else {
        from_toml_file(path)
    }
}

/// Applies environment overrides to a settings struct.
///
/// Only non-blank values override; a blank variable keeps the file value.
pub fn apply_env_overrides(settings: &mut Settings, env: &EnvSnapshot) {
    if let Some(val) = env.get_non_empty("SECRET_KEY") {
        settings.secret_key = val.to_string();
    }

    if let Some(val) = env.get_non_empty("LOG_LEVEL") {
        settings.log_level = val.to_string();
    }

    if let Some(val) = env.get_non_empty("LANGUAGE_CODE") {
        settings.language_code = val.to_string();
    }

    if let Some(val) = env.get_non_empty("TIME_ZONE") {
        settings.time_zone = val.to_string();
    }
}

// ============================================================
// Helpers
// ============================================================

/// Read failures are [`ConfError::IoError`]; only parse failures are
/// configuration errors.
fn read_file(path: &Path, format: &str) -> ConfResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        ConfError::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to read {format} file '{}': {e}", path.display()),
        ))
    })
}

fn merge_into_defaults(value: serde_json::Value, format: &str) -> ConfResult<Settings> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        ConfError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        ConfError::ConfigurationError(format!("Failed to deserialize settings from {format}: {e}"))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

//! Startup configuration.
//!
//! The profile comes from the page query (`?profile=turntable`), falling back
//! to a `"profile"` key in the canvas `data-config` JSON, then to the default.
//! Every other key in `data-config` is merged field by field over the chosen
//! preset, so `{"extrude": {"depth": 30}}` changes the depth and nothing else.

use serde_json::{Map, Value};
use viewer::{Profile, ViewerConfig};

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Error returned while reading startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown profile {0:?}")]
    UnknownProfile(String),
    #[error("invalid config JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// The `profile` parameter of a URL query string, if any.
///
/// Accepts the query with or without its leading `?`.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownProfile`] when the parameter names no known
/// profile.
pub fn profile_from_query(query: &str) -> Result<Option<Profile>, ConfigError> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let Some(value) = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(key, value)| (key == "profile").then_some(value))
    else {
        return Ok(None);
    };
    Profile::from_name(value).map(Some).ok_or_else(|| ConfigError::UnknownProfile(value.to_owned()))
}

/// Parse `data-config` text into a JSON object.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidJson`] when the text is not a JSON object.
pub fn parse_overrides(text: &str) -> Result<Map<String, Value>, ConfigError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::InvalidJson(serde::de::Error::custom(format!(
            "expected an object, found {other}"
        )))),
    }
}

/// The profile named by a `"profile"` key in `overrides`, if any.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownProfile`] when the key is present but names
/// no known profile.
pub fn profile_from_overrides(overrides: &Map<String, Value>) -> Result<Option<Profile>, ConfigError> {
    match overrides.get("profile") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(name)) => {
            Profile::from_name(name).map(Some).ok_or_else(|| ConfigError::UnknownProfile(name.clone()))
        }
        Some(other) => Err(ConfigError::UnknownProfile(other.to_string())),
    }
}

/// Merge `overrides` over `base`, recursing into nested objects.
///
/// The `profile` key is ignored; the preset has already been chosen.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidJson`] when a merged field has the wrong type.
pub fn apply_overrides(base: &ViewerConfig, overrides: &Map<String, Value>) -> Result<ViewerConfig, ConfigError> {
    let mut merged = serde_json::to_value(base)?;
    let mut overrides = overrides.clone();
    overrides.remove("profile");
    merge(&mut merged, Value::Object(overrides));
    let mut config: ViewerConfig = serde_json::from_value(merged)?;
    config.profile = base.profile;
    Ok(config)
}

fn merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                merge(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Build the startup [`ViewerConfig`] from the page query and the optional
/// `data-config` attribute.
///
/// Never fails: an unknown profile or malformed override is logged and the
/// nearest valid configuration is used instead.
#[must_use]
pub fn resolve(query: &str, data_config: Option<&str>) -> ViewerConfig {
    let overrides = match data_config.map(str::trim).filter(|text| !text.is_empty()).map(parse_overrides) {
        Some(Ok(map)) => map,
        Some(Err(err)) => {
            tracing::warn!(%err, "ignoring data-config");
            Map::new()
        }
        None => Map::new(),
    };

    let from_query = profile_from_query(query).unwrap_or_else(|err| {
        tracing::warn!(%err, "falling back to default profile");
        None
    });
    let from_overrides = profile_from_overrides(&overrides).unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring data-config profile");
        None
    });
    let profile = from_query.or(from_overrides).unwrap_or_default();
    let preset = ViewerConfig::for_profile(profile);

    match apply_overrides(&preset, &overrides) {
        Ok(config) => {
            tracing::info!(profile = profile.name(), overrides = overrides.len(), "resolved viewer config");
            config
        }
        Err(err) => {
            tracing::warn!(%err, profile = profile.name(), "ignoring data-config overrides");
            preset
        }
    }
}

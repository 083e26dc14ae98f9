//! Configuration surface of the policy pipeline.
//!
//! Options can be built in code or loaded from a TOML or JSON document.
//! Documents are read leniently: a value of the wrong shape is logged and
//! ignored instead of failing the whole load, so a typo in one option never
//! costs the user their diagnostics.

use super::stage::{DescriptorFilter, DisplayFilter, SkipPredicate};
use crate::utils::error::ConfigError;
use log::{debug, warn};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A list option: either add entries or clear all of them
#[derive(Clone)]
pub enum Setting<T> {
    /// Add these entries to the existing ones
    Add(T),

    /// Remove every entry (`false` in a document)
    Clear,
}

/// Options recognized by `Pipeline::config`
#[derive(Clone, Default)]
pub struct ConfigOptions {
    pub skip_packages: Option<Setting<Vec<String>>>,
    pub skip_paths: Option<Setting<Vec<String>>>,
    pub skip: Option<Setting<Vec<SkipPredicate>>>,
    pub max_items: Option<usize>,
    pub skip_node_files: Option<bool>,
    pub filters: Option<Setting<Vec<DisplayFilter>>>,
    pub parsed_error_filters: Option<Setting<Vec<DescriptorFilter>>>,
    pub aliases: Option<Setting<Vec<(String, String)>>>,
    pub colors: Option<bool>,
}

impl ConfigOptions {
    /// Load options from a file
    ///
    /// `.json` files are read as JSON, everything else as TOML.
    ///
    /// # Errors
    /// * `ConfigError::ReadFailed` - If file cannot be read
    /// * `ConfigError::TomlParseFailed` / `JsonParseFailed` - If the document is malformed
    /// * `ConfigError::InvalidFormat` - If the document is not a table
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        debug!("Loading config from {}", path.display());

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_toml_str(&contents),
        }
    }

    /// Parse options from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let value: Value = toml::from_str(contents)?;
        Self::from_value(&value)
    }

    /// Parse options from JSON text
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(contents)?;
        Self::from_value(&value)
    }

    /// Interpret a parsed document
    ///
    /// Keys are accepted in camelCase (`skipPackages`) or snake_case
    /// (`skip_packages`). Unknown keys and ill-typed values are ignored.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let Value::Object(table) = value else {
            return Err(ConfigError::InvalidFormat(format!(
                "expected a table of options, found {}",
                value
            )));
        };

        let mut options = Self::default();

        for (key, value) in table {
            match key.as_str() {
                "skipPackages" | "skip_packages" => {
                    options.skip_packages = string_list(key, value);
                }
                "skipPaths" | "skip_paths" => {
                    options.skip_paths = string_list(key, value);
                }
                "skip" => options.skip = clear_only(key, value),
                "filters" => options.filters = clear_only(key, value),
                "parsedErrorFilters" | "parsed_error_filters" => {
                    options.parsed_error_filters = clear_only(key, value);
                }
                "maxItems" | "max_items" => options.max_items = positive_count(key, value),
                "skipNodeFiles" | "skip_node_files" => {
                    options.skip_node_files = flag(key, value);
                }
                "aliases" => options.aliases = alias_map(key, value),
                "colors" => options.colors = flag(key, value),
                _ => debug!("Ignoring unknown config option: {}", key),
            }
        }

        Ok(options)
    }
}

/// `false` or a list of strings
fn string_list(key: &str, value: &Value) -> Option<Setting<Vec<String>>> {
    match value {
        Value::Bool(false) => Some(Setting::Clear),
        Value::Array(items) => {
            let names: Option<Vec<String>> = items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect();
            if names.is_none() {
                warn!("Ignoring {}: every entry must be a string", key);
            }
            names.map(Setting::Add)
        }
        other => {
            warn!("Ignoring {}: expected a list or false, found {}", key, other);
            None
        }
    }
}

/// Callback options can only be cleared from a document
fn clear_only<T>(key: &str, value: &Value) -> Option<Setting<T>> {
    match value {
        Value::Bool(false) => Some(Setting::Clear),
        other => {
            warn!("Ignoring {}: callbacks cannot be set from a document ({})", key, other);
            None
        }
    }
}

/// A positive count; fractions are floored
fn positive_count(key: &str, value: &Value) -> Option<usize> {
    match value.as_f64() {
        Some(n) if n >= 1.0 => Some(n.floor() as usize),
        _ => {
            warn!("Ignoring {}: expected a positive number, found {}", key, value);
            None
        }
    }
}

fn flag(key: &str, value: &Value) -> Option<bool> {
    let flag = value.as_bool();
    if flag.is_none() {
        warn!("Ignoring {}: expected a boolean, found {}", key, value);
    }
    flag
}

/// `false` or a table of pattern -> replacement
fn alias_map(key: &str, value: &Value) -> Option<Setting<Vec<(String, String)>>> {
    match value {
        Value::Bool(false) => Some(Setting::Clear),
        Value::Object(map) => Some(Setting::Add(
            map.iter()
                .filter_map(|(pattern, replacement)| match replacement.as_str() {
                    Some(replacement) => Some((pattern.clone(), replacement.to_string())),
                    None => {
                        warn!("Ignoring alias {:?}: replacement must be a string", pattern);
                        None
                    }
                })
                .collect(),
        )),
        other => {
            warn!("Ignoring {}: expected a table or false, found {}", key, other);
            None
        }
    }
}

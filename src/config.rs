//! App Configuration
//!
//! Everything tunable at mount time. Every field has a default, so an empty
//! object (or no config at all) gives the stock app.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::error::ConfigError;
use crate::store::DEFAULT_STORAGE_KEY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// localStorage key holding the serialized collection
    pub storage_key: String,
    /// Selector of the element the app mounts into
    pub root_selector: String,
    /// Refuse to start on corrupt stored data instead of starting empty
    pub strict_load: bool,
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
    pub labels: Labels,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            root_selector: "#root".to_string(),
            strict_load: false,
            log_level: "info".to_string(),
            labels: Labels::default(),
        }
    }
}

/// User-facing strings rendered by the view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Labels {
    pub title: String,
    pub input_placeholder: String,
    pub submit: String,
    pub delete: String,
    /// Shown instead of rows when the list is empty
    pub empty: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            title: "Todos".to_string(),
            input_placeholder: "Add todo".to_string(),
            submit: "Submit".to_string(),
            delete: "Delete".to_string(),
            empty: "Nothing to do! Add a task?".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a plain JS object; `undefined` and `null` give the defaults
    pub fn from_js(value: JsValue) -> Result<Self, ConfigError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value).map_err(|e| ConfigError::Js(e.to_string()))
    }

    /// Parsed `log_level`, `Info` when unrecognised
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.storage_key, "todos");
        assert_eq!(config.labels.empty, "Nothing to do! Add a task?");
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_json(
            r#"{"storageKey":"work","strictLoad":true,"labels":{"title":"Work"}}"#,
        )
        .unwrap();
        assert_eq!(config.storage_key, "work");
        assert!(config.strict_load);
        assert_eq!(config.labels.title, "Work");
        assert_eq!(config.labels.delete, "Delete");
        assert_eq!(config.root_selector, "#root");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(AppConfig::from_json("[1,2]"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_log_level() {
        let mut config = AppConfig::default();
        assert_eq!(config.log_level(), log::Level::Info);
        config.log_level = "debug".to_string();
        assert_eq!(config.log_level(), log::Level::Debug);
        config.log_level = "loud".to_string();
        assert_eq!(config.log_level(), log::Level::Info);
    }
}

//! Host configuration file (cantor.toml): which plugins to enable and
//! per-plugin settings overrides.

use cantor_core::SettingsMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Full host config.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HostConfig {
    /// Plugin ids to enable after loading. Empty means enable everything.
    #[serde(default)]
    pub enabled: Vec<String>,
    /// Per-plugin settings override tables, keyed by plugin id.
    #[serde(default)]
    pub settings: HashMap<String, toml::value::Table>,
}

impl HostConfig {
    /// Load from TOML string.
    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        let config: HostConfig = toml::from_str(s)?;
        Ok(config)
    }

    /// Load from file path.
    pub fn load_path(path: &Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml(&s)
    }

    /// The settings override table for one plugin, converted to the JSON
    /// settings wire format.
    pub fn settings_for(&self, plugin_id: &str) -> Option<SettingsMap> {
        self.settings.get(plugin_id).map(|table| {
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_json(v)))
                .collect()
        })
    }
}

fn toml_to_json(value: &toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::from(s.clone()),
        toml::Value::Integer(i) => serde_json::Value::from(*i),
        toml::Value::Float(f) => serde_json::Value::from(*f),
        toml::Value::Boolean(b) => serde_json::Value::from(*b),
        toml::Value::Datetime(dt) => serde_json::Value::from(dt.to_string()),
        toml::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_json(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_CONFIG: &str = r#"
enabled = ["harmonic_v1"]
"#;

    #[test]
    fn from_toml_minimal() {
        let config = HostConfig::from_toml(MINIMAL_CONFIG).unwrap();
        assert_eq!(config.enabled, ["harmonic_v1"]);
        assert!(config.settings.is_empty());
    }

    #[test]
    fn from_toml_empty_is_defaults() {
        let config = HostConfig::from_toml("").unwrap();
        assert!(config.enabled.is_empty());
        assert!(config.settings.is_empty());
    }

    #[test]
    fn from_toml_with_settings_tables() {
        let s = r#"
enabled = ["harmonic_v1"]

[settings.harmonic_v1]
locale = "fr_FR"
voice = "ff_sylvie"
speed = 0.8
"#;
        let config = HostConfig::from_toml(s).unwrap();
        let map = config.settings_for("harmonic_v1").unwrap();
        assert_eq!(map["locale"], "fr_FR");
        assert_eq!(map["speed"], 0.8);
        assert!(config.settings_for("other_v1").is_none());
    }

    #[test]
    fn from_toml_invalid_fails() {
        assert!(HostConfig::from_toml("enabled = [").is_err());
        assert!(HostConfig::from_toml("enabled = 1").is_err());
    }

    #[test]
    fn toml_values_convert_to_json() {
        let s = r#"
[settings.p_v1]
flag = true
count = 3
items = ["a", "b"]
"#;
        let config = HostConfig::from_toml(s).unwrap();
        let map = config.settings_for("p_v1").unwrap();
        assert_eq!(map["flag"], true);
        assert_eq!(map["count"], 3);
        assert_eq!(map["items"], serde_json::json!(["a", "b"]));
    }
}

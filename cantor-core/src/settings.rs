//! Settings contract: immutable validated value objects plus the schema
//! entries that describe them to configuration UIs.

use serde::Serialize;
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// JSON-compatible mapping: the sole interchange format for settings.
///
/// Accepted by `TtsPlugin::make_settings` and produced by
/// `TtsSettings::to_dict`. Hosts persist this to config files or expose it
/// over an API.
pub type SettingsMap = serde_json::Map<String, serde_json::Value>;

/// Common interface for all TTS backend settings.
///
/// Implementations are immutable value objects: every field is valid at all
/// times (validate-on-construct), and "updating" settings means building a
/// new instance via the owning plugin's factory, never mutating in place.
pub trait TtsSettings: fmt::Debug + Send + Sync {
    /// The locale for spoken audio language, in underscore or hyphen form.
    fn locale(&self) -> &str;

    /// Export all settings as a mapping of only JSON-serializable values.
    ///
    /// Enums render as their string value, paths as strings. Feeding the
    /// result back through the owning plugin's `make_settings` must
    /// reconstruct an equal instance.
    fn to_dict(&self) -> SettingsMap;

    /// Downcast support so backends can type-check foreign settings.
    fn as_any(&self) -> &dyn Any;

    /// Concrete type name, used in type-mismatch error messages.
    fn type_name(&self) -> &'static str;

    /// Structural equality: same concrete type and all field values equal.
    fn eq_settings(&self, other: &dyn TtsSettings) -> bool;
}

impl PartialEq for dyn TtsSettings {
    fn eq(&self, other: &Self) -> bool {
        self.eq_settings(other)
    }
}

/// The primitive type of one setting, as rendered in the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
    Str,
    Int,
    Float,
}

/// Describes one named setting: its type, bounds and allowed values.
///
/// Schema is data, not behavior: one immutable entry per settings field,
/// constructed once per backend family. Consumers use these to build
/// configuration UIs without backend-specific knowledge. For strings,
/// `min`/`max` bound the length; for numbers, the value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecEntry {
    pub value_type: SettingType,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Closed set of allowed values, rendered as strings. Think enums.
    pub values: Option<BTreeSet<String>>,
}

impl SpecEntry {
    pub fn new(value_type: SettingType) -> Self {
        Self {
            value_type,
            min: None,
            max: None,
            values: None,
        }
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// Mapping from setting name to its schema entry, in deterministic order.
pub type SettingsSpec = BTreeMap<String, SpecEntry>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_entry_builder() {
        let entry = SpecEntry::new(SettingType::Float).with_min(0.1).with_max(1.0);
        assert_eq!(entry.value_type, SettingType::Float);
        assert_eq!(entry.min, Some(0.1));
        assert_eq!(entry.max, Some(1.0));
        assert!(entry.values.is_none());
    }

    #[test]
    fn spec_entry_values_set() {
        let entry = SpecEntry::new(SettingType::Str).with_values(["en", "fr"]);
        let values = entry.values.unwrap();
        assert!(values.contains("en"));
        assert!(values.contains("fr"));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn spec_entry_serializes_to_plain_data() {
        let entry = SpecEntry::new(SettingType::Int).with_min(1.0);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["value_type"], "int");
        assert_eq!(json["min"], 1.0);
        assert!(json["values"].is_null());
    }
}

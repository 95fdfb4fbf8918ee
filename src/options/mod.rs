//! Option lists for choice fields
//!
//! Options are either primitives (`"red"`, `3`) or objects. Object options are
//! read through an [`OptionAccessor`]: the configured `optionValue` /
//! `optionLabel` keys first, then the `value`/`label` convention, then
//! `id`/`name`.

mod loader;
mod source;

use serde_json::Value;

pub use loader::{LoadState, OptionLoader};
pub use source::{FnOptions, HttpOptions, OptionSource, StaticOptions};

use crate::model::OptionConfig;

/// Reads keys and labels out of options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionAccessor {
    value_key: Option<String>,
    label_key: Option<String>,
    data_key: Option<String>,
}

impl OptionAccessor {
    pub fn new(value_key: Option<&str>, label_key: Option<&str>) -> Self {
        Self {
            value_key: value_key.map(str::to_string),
            label_key: label_key.map(str::to_string),
            data_key: None,
        }
    }

    pub fn from_config(config: &OptionConfig) -> Self {
        Self {
            value_key: config.option_value.clone(),
            label_key: config.option_label.clone(),
            data_key: config.data_key.clone(),
        }
    }

    /// Whether an explicit `optionValue` key is configured
    pub fn has_value_key(&self) -> bool {
        self.value_key.is_some()
    }

    /// The raw value an option stands for. Primitives stand for themselves.
    pub fn value_of<'v>(&self, option: &'v Value) -> Option<&'v Value> {
        match option {
            Value::Null => None,
            Value::Object(map) => {
                let primary = self
                    .value_key
                    .as_deref()
                    .or(self.data_key.as_deref())
                    .unwrap_or("value");
                [primary, "value", "id"]
                    .into_iter()
                    .find_map(|key| map.get(key).filter(|v| !v.is_null()))
            }
            other => Some(other),
        }
    }

    /// String key identifying an option; empty when it has none
    pub fn key_of(&self, option: &Value) -> String {
        self.value_of(option).map(display_value).unwrap_or_default()
    }

    pub fn label_of(&self, option: &Value) -> String {
        match option {
            Value::Null => String::new(),
            Value::Object(map) => {
                let primary = self.label_key.as_deref().unwrap_or("label");
                [primary, "label", "name"]
                    .into_iter()
                    .find_map(|key| map.get(key).filter(|v| !v.is_null()))
                    .map(display_value)
                    .unwrap_or_default()
            }
            other => display_value(other),
        }
    }

    /// Option whose key equals `key`
    pub fn find<'o>(&self, options: &'o [Value], key: &str) -> Option<&'o Value> {
        options.iter().find(|option| self.key_of(option) == key)
    }

    /// Key of the option a stored value refers to, for showing the current
    /// selection (e.g. when editing an existing record)
    pub fn selected_key(&self, current: Option<&Value>, options: &[Value]) -> String {
        let current = match current {
            None | Some(Value::Null) => return String::new(),
            Some(current) => current,
        };

        if self.has_value_key() && !current.is_object() && !current.is_array() {
            return display_value(current);
        }

        if current.is_object() {
            let key = self.key_of(current);
            if !key.is_empty() {
                return key;
            }
        }

        let wanted = display_value(current);
        self.find(options, &wanted)
            .map(|option| self.key_of(option))
            .unwrap_or(wanted)
    }
}

/// Text form of a value as shown to users and used for option keys
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                n.to_string()
            } else {
                n.as_f64().map(|f| f.to_string()).unwrap_or_default()
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

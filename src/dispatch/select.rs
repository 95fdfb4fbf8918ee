//! Single- and multi-choice selectors

use serde_json::Value;

use crate::error::BindError;
use crate::model::{OptionConfig, ReturnType};
use crate::options::{display_value, OptionAccessor};

/// Dropdown / options selector
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectControl {
    pub accessor: OptionAccessor,
    pub clearable: bool,
    pub filter: bool,
    pub empty_message: Option<String>,
}

impl SelectControl {
    pub fn from_config(config: Option<&OptionConfig>) -> Self {
        match config {
            Some(config) => Self {
                accessor: OptionAccessor::from_config(config),
                clearable: config.clearable,
                filter: config.filter,
                empty_message: config.empty_message.clone(),
            },
            None => Self::default(),
        }
    }

    /// Value stored when the option keyed `key` is picked.
    ///
    /// The option's resolved value is stored: the value at `optionValue`, or
    /// `value` then `id` for object options. With an explicit `optionValue` an
    /// option missing from the list stores the key itself; without one it is
    /// refused. An empty key clears the selection.
    pub fn bind(&self, field: &str, key: &str, options: &[Value]) -> Result<Value, BindError> {
        if key.is_empty() {
            return Ok(Value::Null);
        }

        match self.accessor.find(options, key) {
            Some(option) => Ok(self
                .accessor
                .value_of(option)
                .cloned()
                .unwrap_or_else(|| Value::String(key.to_string()))),
            None if self.accessor.has_value_key() => Ok(Value::String(key.to_string())),
            None => Err(BindError::UnknownOption {
                field: field.to_string(),
                key: key.to_string(),
            }),
        }
    }
}

/// Multi-select bound to an array of option values or option objects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiSelectControl {
    pub accessor: OptionAccessor,
    pub return_type: ReturnType,
    pub max_selections: Option<usize>,
}

impl MultiSelectControl {
    /// `returnType` wins; a field `datatype` of `object` selects option objects
    pub fn from_config(config: Option<&OptionConfig>, datatype: Option<&str>) -> Self {
        let datatype_default = match datatype {
            Some(kind) if kind.eq_ignore_ascii_case("object") => ReturnType::Object,
            _ => ReturnType::String,
        };
        Self {
            accessor: config.map(OptionAccessor::from_config).unwrap_or_default(),
            return_type: config
                .and_then(|c| c.return_type)
                .unwrap_or(datatype_default),
            max_selections: config.and_then(|c| c.max_selections),
        }
    }

    /// Keys of the currently stored selections
    pub fn selected_keys(&self, current: Option<&Value>) -> Vec<String> {
        match current {
            Some(Value::Array(items)) => items.iter().map(|item| self.key_of_item(item)).collect(),
            _ => Vec::new(),
        }
    }

    fn key_of_item(&self, item: &Value) -> String {
        if item.is_object() {
            self.accessor.key_of(item)
        } else {
            display_value(item)
        }
    }

    fn item(&self, field: &str, key: &str, options: &[Value]) -> Result<Value, BindError> {
        let option = self
            .accessor
            .find(options, key)
            .ok_or_else(|| BindError::UnknownOption {
                field: field.to_string(),
                key: key.to_string(),
            })?;
        Ok(match self.return_type {
            ReturnType::Object => option.clone(),
            ReturnType::String => self
                .accessor
                .value_of(option)
                .cloned()
                .unwrap_or_else(|| Value::String(key.to_string())),
        })
    }

    fn check_limit(&self, field: &str, count: usize) -> Result<(), BindError> {
        match self.max_selections {
            Some(limit) if count > limit => Err(BindError::SelectionLimit {
                field: field.to_string(),
                limit,
            }),
            _ => Ok(()),
        }
    }

    /// Add the option keyed `key`, or remove it when already selected
    pub fn toggle(
        &self,
        field: &str,
        key: &str,
        current: Option<&Value>,
        options: &[Value],
    ) -> Result<Value, BindError> {
        let mut items = match current {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };

        if let Some(pos) = items.iter().position(|item| self.key_of_item(item) == key) {
            items.remove(pos);
            return Ok(Value::Array(items));
        }

        self.check_limit(field, items.len() + 1)?;
        items.push(self.item(field, key, options)?);
        Ok(Value::Array(items))
    }

    /// Replace the selection with `keys`, in order, ignoring repeats
    pub fn select_many(
        &self,
        field: &str,
        keys: &[String],
        options: &[Value],
    ) -> Result<Value, BindError> {
        let mut seen: Vec<&str> = Vec::with_capacity(keys.len());
        for key in keys {
            if !seen.contains(&key.as_str()) {
                seen.push(key);
            }
        }
        self.check_limit(field, seen.len())?;

        seen.into_iter()
            .map(|key| self.item(field, key, options))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn people() -> Vec<Value> {
        vec![json!({"id": 1, "name": "Alpha"}), json!({"id": 2, "name": "Beta"})]
    }

    #[test]
    fn test_select_without_value_key_binds_resolved_id() {
        let control = SelectControl::default();
        assert_eq!(control.bind("owner", "2", &people()).unwrap(), json!(2));
        let keyed = vec![json!({"value": "gb", "id": 44, "label": "United Kingdom"})];
        assert_eq!(control.bind("country", "gb", &keyed).unwrap(), json!("gb"));
        assert_eq!(control.bind("owner", "", &people()).unwrap(), Value::Null);
        assert!(matches!(
            control.bind("owner", "9", &people()),
            Err(BindError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_select_with_value_key_binds_typed_value() {
        let config = OptionConfig {
            option_value: Some("id".into()),
            option_label: Some("name".into()),
            ..Default::default()
        };
        let control = SelectControl::from_config(Some(&config));
        assert_eq!(control.bind("owner", "1", &people()).unwrap(), json!(1));
        // options not loaded yet
        assert_eq!(control.bind("owner", "7", &[]).unwrap(), json!("7"));
    }

    #[test]
    fn test_primitive_options() {
        let control = SelectControl::default();
        let options = vec![json!("red"), json!("green")];
        assert_eq!(control.bind("colour", "green", &options).unwrap(), json!("green"));
    }

    #[test]
    fn test_multi_toggle_values() {
        let control = MultiSelectControl::default();
        let opts = people();
        let once = control.toggle("team", "1", None, &opts).unwrap();
        assert_eq!(once, json!([1]));
        let twice = control.toggle("team", "2", Some(&once), &opts).unwrap();
        assert_eq!(twice, json!([1, 2]));
        let removed = control.toggle("team", "1", Some(&twice), &opts).unwrap();
        assert_eq!(removed, json!([2]));
        assert_eq!(control.selected_keys(Some(&removed)), vec!["2".to_string()]);
    }

    #[test]
    fn test_multi_object_return_type() {
        let control = MultiSelectControl::from_config(None, Some("object"));
        assert_eq!(control.return_type, ReturnType::Object);
        let value = control
            .select_many("team", &["2".into(), "1".into(), "2".into()], &people())
            .unwrap();
        assert_eq!(
            value,
            json!([{"id": 2, "name": "Beta"}, {"id": 1, "name": "Alpha"}])
        );
        assert_eq!(control.selected_keys(Some(&value)), vec!["2", "1"]);
    }

    #[test]
    fn test_multi_selection_limit() {
        let config = OptionConfig {
            max_selections: Some(1),
            return_type: Some(ReturnType::String),
            ..Default::default()
        };
        let control = MultiSelectControl::from_config(Some(&config), Some("object"));
        assert_eq!(control.return_type, ReturnType::String);

        let one = control.toggle("team", "1", None, &people()).unwrap();
        assert!(matches!(
            control.toggle("team", "2", Some(&one), &people()),
            Err(BindError::SelectionLimit { limit: 1, .. })
        ));
        assert!(control
            .select_many("team", &["1".into(), "2".into()], &people())
            .is_err());
    }
}

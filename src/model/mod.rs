//! Field schema model
//!
//! Plain data describing a form: its fields, their types, validation rules
//! and visibility conditions. Field lists are authored as JSON or YAML and
//! deserialized straight into [`FieldDescriptor`].

mod condition;
mod config;
mod input_type;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use condition::{
    Condition, ConditionGroup, ConditionGroups, ConditionsRule, Operator, Visibility,
};
pub use config::{
    DateConfig, DateDataType, DateMode, NumberConfig, NumberMode, OptionConfig, PhoneConfig,
    ReturnType, TextAreaConfig, UrlConfig,
};
pub use input_type::InputType;

/// Boolean hint where an explicit `null` means `false`
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

/// Current form values keyed by field name. A missing key means "no value".
pub type FormValueMap = BTreeMap<String, Value>;

/// Declared validation constraints of a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    #[serde(default, deserialize_with = "flag")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Regular expression source text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// One form field's declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Unique key of the field within its list
    pub name: String,
    #[serde(rename = "type", default)]
    pub input_type: InputType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    /// Declared default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Free-form data type hint; `object` switches multi-selects to option objects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub is_loading: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_rules: Option<ValidationRules>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_conditions: Option<Visibility>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option: Option<OptionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_select: Option<OptionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<PhoneConfig>,
    #[serde(default, alias = "textarea", skip_serializing_if = "Option::is_none")]
    pub text_area: Option<TextAreaConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<NumberConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<UrlConfig>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, input_type: InputType) -> Self {
        Self {
            name: name.into(),
            input_type,
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.validation_rules = Some(rules);
        self
    }

    pub fn required(mut self) -> Self {
        self.validation_rules
            .get_or_insert_with(ValidationRules::default)
            .required = true;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility_conditions = Some(visibility);
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_options(mut self, config: OptionConfig) -> Self {
        match self.input_type {
            InputType::MultiSelect | InputType::PMultiSelect => self.multi_select = Some(config),
            _ => self.option = Some(config),
        }
        self
    }

    /// Label used in messages: the declared label, or the name when none is set
    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.name,
        }
    }

    pub fn is_required(&self) -> bool {
        self.validation_rules
            .as_ref()
            .map(|rules| rules.required)
            .unwrap_or(false)
    }

    /// Option configuration relevant to this field's type
    pub fn option_config(&self) -> Option<&OptionConfig> {
        match self.input_type {
            InputType::MultiSelect | InputType::PMultiSelect => {
                self.multi_select.as_ref().or(self.option.as_ref())
            }
            _ => self.option.as_ref(),
        }
    }
}

//! Type-specific sub-configuration carried by a field descriptor

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shape of the value a multi-select binds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReturnType {
    /// Array of option objects
    Object,
    /// Array of primitive option values
    #[default]
    String,
}

/// Option list configuration shared by `dropdown`/`options` (`option`) and
/// `multi-select` (`multiSelect`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OptionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<ReturnType>,
    #[serde(default, deserialize_with = "super::flag")]
    pub clearable: bool,
    #[serde(default, deserialize_with = "super::flag")]
    pub filter: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    /// Upper bound on the number of selections a multi-select accepts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<usize>,

    // Remote loading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Route parameter name -> query parameter name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub url_param_map: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query_params: BTreeMap<String, Value>,
    /// JSON pointer to the option array inside the response body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_path: Option<String>,
}

/// Date picker selection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateMode {
    #[default]
    Single,
    Range,
    Multiple,
}

/// What a date field stores in the value map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateDataType {
    /// The formatted string
    #[default]
    String,
    /// ISO-8601 date (or date-time when `showTime` is set)
    Date,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DateConfig {
    #[serde(default)]
    pub mode: DateMode,
    #[serde(default)]
    pub data_type: DateDataType,
    /// date-fns style pattern, e.g. `yyyy-MM-dd`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, deserialize_with = "super::flag")]
    pub show_time: bool,
    #[serde(default, deserialize_with = "super::flag")]
    pub disable_today: bool,
    #[serde(default, deserialize_with = "super::flag")]
    pub disable_past_dates: bool,
    #[serde(default, deserialize_with = "super::flag")]
    pub disable_future_dates: bool,
    /// Weekday numbers, Sunday = 0
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_days: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PhoneConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TextAreaConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NumberMode {
    #[default]
    Decimal,
    Integer,
    Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NumberConfig {
    #[serde(default)]
    pub mode: NumberMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UrlConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

//! Visibility condition declarations (data only; evaluation lives in `crate::visibility`)

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison applied to the dependent field's current value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "answered")]
    Answered,
    #[serde(rename = "exists")]
    Exists,
    #[serde(rename = "not_answered")]
    NotAnswered,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Neq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
}

/// How the results of a group's conditions are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConditionsRule {
    /// Logical AND
    #[default]
    All,
    /// Logical OR
    Any,
}

/// One visibility test against another field's value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Name of the dependent field. Falls back to the group's `parentFieldName`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub expression: Operator,
    /// Expected value; ignored by the answered/exists/not_answered tests.
    /// `None` stands for an undeclared value, which differs from `null`.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
}

impl Condition {
    pub fn new(name: impl Into<String>, expression: Operator, value: Option<Value>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            expression,
            value,
        }
    }
}

/// A group of conditions joined by one combinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConditionGroup {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub conditions_rule: ConditionsRule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_field_name: Option<String>,
    /// When the dependent value is an object, test this key of it instead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_key: Option<String>,
}

/// Several groups joined by an outer combinator (older declaration shape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConditionGroups {
    #[serde(default)]
    pub visible_conditions: ConditionsRule,
    /// Required, so that a single-group object never parses as this shape
    pub visibilities: Vec<ConditionGroup>,
}

/// A field's `visibilityConditions` declaration, in either accepted shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Visibility {
    Groups(ConditionGroups),
    Group(ConditionGroup),
}

impl Visibility {
    /// Every group declared, in order
    pub fn groups(&self) -> &[ConditionGroup] {
        match self {
            Visibility::Group(group) => std::slice::from_ref(group),
            Visibility::Groups(groups) => &groups.visibilities,
        }
    }
}

/// Keeps an explicit `null` as `Some(Value::Null)` instead of collapsing it to `None`
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

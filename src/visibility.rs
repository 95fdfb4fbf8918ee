//! Visibility evaluation
//!
//! Decides which fields are shown for the current value map. Evaluation is a
//! pure function of the field list and the values: it reads nothing else and
//! mutates nothing, so it is re-run in full after every change.
//!
//! A condition that names an unknown field sees "no value" for it. That is
//! reported once, as a warning, when the evaluator is built.

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;
use tracing::warn;

use crate::model::{
    Condition, ConditionGroup, ConditionsRule, FieldDescriptor, FormValueMap, Operator,
    Visibility,
};

/// Field name -> visible, for one value map
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibilityMap {
    visible: BTreeMap<String, bool>,
}

impl VisibilityMap {
    /// Fields not in the map are visible
    pub fn is_visible(&self, name: &str) -> bool {
        self.visible.get(name).copied().unwrap_or(true)
    }

    pub fn hidden(&self) -> impl Iterator<Item = &str> {
        self.visible
            .iter()
            .filter(|(_, visible)| !**visible)
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.visible.iter().map(|(name, visible)| (name.as_str(), *visible))
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

/// Evaluates visibility for one field list
#[derive(Debug, Clone, Copy)]
pub struct VisibilityEvaluator<'a> {
    fields: &'a [FieldDescriptor],
}

impl<'a> VisibilityEvaluator<'a> {
    /// Build an evaluator, warning about conditions that reference unknown
    /// fields or the field they belong to
    pub fn new(fields: &'a [FieldDescriptor]) -> Self {
        let known: HashSet<&str> = fields.iter().map(|f| f.name.as_str()).collect();

        for field in fields {
            let Some(visibility) = &field.visibility_conditions else {
                continue;
            };
            for group in visibility.groups() {
                for condition in &group.conditions {
                    let Some(dependent) = dependent_name(condition, group) else {
                        warn!(
                            field = %field.name,
                            "visibility condition has no dependent field name; it sees no value"
                        );
                        continue;
                    };
                    if dependent == field.name {
                        warn!(field = %field.name, "visibility condition references its own field");
                    } else if !known.contains(dependent) {
                        warn!(
                            field = %field.name,
                            dependent = %dependent,
                            "visibility condition references a field that is not in the list"
                        );
                    }
                }
            }
        }

        Self { fields }
    }

    pub fn fields(&self) -> &'a [FieldDescriptor] {
        self.fields
    }

    /// Whether `field_name` is visible for `values`. Unknown names are visible.
    pub fn is_visible(&self, field_name: &str, values: &FormValueMap) -> bool {
        self.fields
            .iter()
            .find(|f| f.name == field_name)
            .map(|f| field_is_visible(f, values))
            .unwrap_or(true)
    }

    /// Visibility of every field in the list
    pub fn visibility_map(&self, values: &FormValueMap) -> VisibilityMap {
        VisibilityMap {
            visible: self
                .fields
                .iter()
                .map(|f| (f.name.clone(), field_is_visible(f, values)))
                .collect(),
        }
    }
}

/// Visibility of a single field; fields without conditions are always visible
pub fn field_is_visible(field: &FieldDescriptor, values: &FormValueMap) -> bool {
    match &field.visibility_conditions {
        None => true,
        Some(visibility) => evaluate_visibility(visibility, values),
    }
}

pub fn evaluate_visibility(visibility: &Visibility, values: &FormValueMap) -> bool {
    match visibility {
        Visibility::Group(group) => evaluate_group(group, values),
        Visibility::Groups(groups) => {
            if groups.visibilities.is_empty() {
                return true;
            }
            let results = groups
                .visibilities
                .iter()
                .map(|group| evaluate_group(group, values));
            combine(groups.visible_conditions, results)
        }
    }
}

/// Evaluate one group. An empty condition list is visible under either rule.
pub fn evaluate_group(group: &ConditionGroup, values: &FormValueMap) -> bool {
    if group.conditions.is_empty() {
        return true;
    }
    let results = group.conditions.iter().map(|condition| {
        let dependent = dependent_name(condition, group)
            .and_then(|name| values.get(name))
            .map(|value| project(value, group.object_key.as_deref()));
        evaluate_condition(condition, dependent.flatten())
    });
    combine(group.conditions_rule, results)
}

/// Test one condition against the dependent field's value (`None` = no value)
pub fn evaluate_condition(condition: &Condition, dependent: Option<&Value>) -> bool {
    let expected = condition.value.as_ref();
    match condition.expression {
        Operator::Answered | Operator::Exists => is_answered(dependent),
        Operator::NotAnswered => !is_answered(dependent),
        Operator::Eq => strict_equals(dependent, expected),
        Operator::Neq => !strict_equals(dependent, expected),
        Operator::Gt => to_number(dependent) > to_number(expected),
        Operator::Gte => to_number(dependent) >= to_number(expected),
        Operator::Lt => to_number(dependent) < to_number(expected),
        Operator::Lte => to_number(dependent) <= to_number(expected),
    }
}

/// Present, not null and not the empty string
pub fn is_answered(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Type-sensitive equality: `"1"` and `1` differ, a missing value differs from
/// `null`, numbers compare by numeric value. Arrays and objects compare by content.
pub fn strict_equals(left: Option<&Value>, right: Option<&Value>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => a == b,
            _ => false,
        },
        _ => false,
    }
}

/// Numeric coercion used by the ordering operators. Anything that is not
/// numeric becomes NaN, which makes every ordering comparison false.
pub fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_numeric_text(s),
        Some(Value::Array(items)) => match items.as_slice() {
            [] => 0.0,
            [single] => match single {
                Value::Null => 0.0,
                // "true"/"false" as text are not numeric
                Value::Bool(_) | Value::Object(_) => f64::NAN,
                other => to_number(Some(other)),
            },
            _ => f64::NAN,
        },
        Some(Value::Object(_)) => f64::NAN,
    }
}

fn parse_numeric_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|v| v as f64)
                .unwrap_or(f64::NAN);
        }
    }
    // Rust's float parser also accepts "inf" and "nan"
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

fn dependent_name<'c>(condition: &'c Condition, group: &'c ConditionGroup) -> Option<&'c str> {
    condition
        .name
        .as_deref()
        .or(group.parent_field_name.as_deref())
}

fn project<'v>(value: &'v Value, object_key: Option<&str>) -> Option<&'v Value> {
    match (value, object_key) {
        (Value::Object(map), Some(key)) => map.get(key),
        _ => Some(value),
    }
}

fn combine(rule: ConditionsRule, mut results: impl Iterator<Item = bool>) -> bool {
    match rule {
        ConditionsRule::All => results.all(|r| r),
        ConditionsRule::Any => results.any(|r| r),
    }
}

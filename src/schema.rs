//! Validation schema generation
//!
//! [`generate_schema`] turns a field list into a [`ValidationSchema`]: one
//! validator per field, chosen by the field's type and configured from its
//! validation rules. The schema is built once per field list and then checks
//! value maps, producing one human-readable message per failing field.
//!
//! Optional fields accept a missing value, `null` and the empty string.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::SchemaError;
use crate::model::{FieldDescriptor, FormValueMap, InputType, ValidationRules};
use crate::visibility::VisibilityMap;

/// Field name -> first failing message
pub type FieldErrors = BTreeMap<String, String>;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .unwrap()
});

/// Type-specific check applied by a [`FieldValidator`]
#[derive(Debug, Clone)]
pub enum Rule {
    /// Trimmed string with optional length and pattern constraints
    Text {
        min_length: Option<usize>,
        max_length: Option<usize>,
        pattern: Option<Regex>,
    },
    Email,
    Phone {
        pattern: Option<Regex>,
    },
    Url,
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    /// A date string (or a cleared value when optional)
    Date,
    /// Single choice; any non-empty value
    Choice,
    /// Sequence of selections
    MultiSelect,
    /// Always optional; missing means `false`
    Boolean,
    /// Types without dedicated validation
    Any,
}

/// The validator derived for one field
#[derive(Debug, Clone)]
pub struct FieldValidator {
    name: String,
    label: String,
    required: bool,
    rule: Rule,
}

impl FieldValidator {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Check one value (`None` = missing). Returns the failure message.
    pub fn check(&self, value: Option<&Value>) -> Result<(), String> {
        let label = &self.label;
        let value = value.filter(|v| !v.is_null());

        match &self.rule {
            Rule::Text {
                min_length,
                max_length,
                pattern,
            } => {
                let Some(text) = self.string_or_missing(value, "must be text")? else {
                    return Ok(());
                };
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return self.empty();
                }
                let length = trimmed.chars().count();
                if let Some(min) = min_length {
                    if length < *min {
                        return Err(format!("{label} must be at least {min} characters"));
                    }
                }
                if let Some(max) = max_length {
                    if length > *max {
                        return Err(format!("{label} must be at most {max} characters"));
                    }
                }
                if let Some(re) = pattern {
                    if !re.is_match(trimmed) {
                        return Err(format!("{label} has invalid format"));
                    }
                }
                Ok(())
            }
            Rule::Email => {
                let Some(text) = self.string_or_missing(value, "must be a valid email")? else {
                    return Ok(());
                };
                if text.trim().is_empty() {
                    return self.empty();
                }
                if !is_email(text) {
                    return Err(format!("{label} must be a valid email"));
                }
                Ok(())
            }
            Rule::Phone { pattern } => {
                let Some(text) =
                    self.string_or_missing(value, "must be a valid phone number")?
                else {
                    return Ok(());
                };
                if text.trim().is_empty() {
                    return self.empty();
                }
                if let Some(re) = pattern {
                    if !re.is_match(text) {
                        return Err(format!("{label} must be a valid phone number"));
                    }
                }
                Ok(())
            }
            Rule::Url => {
                let Some(text) = self.string_or_missing(value, "must be a valid URL")? else {
                    return Ok(());
                };
                if text.trim().is_empty() {
                    return self.empty();
                }
                if url::Url::parse(text).is_err() {
                    return Err(format!("{label} must be a valid URL"));
                }
                Ok(())
            }
            Rule::Number { min, max } => {
                let Some(value) = value else {
                    return self.empty();
                };
                let Some(number) = value.as_f64() else {
                    return Err(format!("{label} must be a number"));
                };
                if let Some(min) = min {
                    if number < *min {
                        return Err(format!("{label} must be at least {min}"));
                    }
                }
                if let Some(max) = max {
                    if number > *max {
                        return Err(format!("{label} must be at most {max}"));
                    }
                }
                Ok(())
            }
            Rule::Date => match value {
                None => self.empty(),
                Some(Value::String(text)) if text.trim().is_empty() => self.empty(),
                Some(Value::String(_)) => Ok(()),
                // range and multiple modes
                Some(Value::Array(items)) if items.is_empty() => self.empty(),
                Some(Value::Array(items)) if items.iter().all(Value::is_string) => Ok(()),
                Some(_) => Err(format!("{label} must be a valid date")),
            },
            Rule::Choice => {
                if self.required && !has_content(value, true) {
                    return Err(format!("{label} is required"));
                }
                Ok(())
            }
            Rule::MultiSelect => match value {
                None => self.no_selection(),
                Some(Value::Array(items)) if items.is_empty() => self.no_selection(),
                Some(Value::Array(_)) => Ok(()),
                Some(_) => Err(format!("{label} must be a list of selections")),
            },
            Rule::Boolean => match value {
                None | Some(Value::Bool(_)) => Ok(()),
                Some(_) => Err(format!("{label} must be true or false")),
            },
            Rule::Any => {
                if self.required && !has_content(value, false) {
                    return Err(format!("{label} is required"));
                }
                Ok(())
            }
        }
    }

    fn string_or_missing<'v>(
        &self,
        value: Option<&'v Value>,
        type_message: &str,
    ) -> Result<Option<&'v str>, String> {
        match value {
            None => self.empty().map(|_| None),
            Some(Value::String(text)) => Ok(Some(text)),
            Some(_) => Err(format!("{} {}", self.label, type_message)),
        }
    }

    fn empty(&self) -> Result<(), String> {
        if self.required {
            Err(format!("{} is required", self.label))
        } else {
            Ok(())
        }
    }

    fn no_selection(&self) -> Result<(), String> {
        if self.required {
            Err(format!("{} requires at least one selection", self.label))
        } else {
            Ok(())
        }
    }
}

/// Runtime-checkable schema for one field list
#[derive(Debug, Clone, Default)]
pub struct ValidationSchema {
    validators: Vec<FieldValidator>,
}

impl ValidationSchema {
    pub fn get(&self, name: &str) -> Option<&FieldValidator> {
        self.validators.iter().find(|v| v.name == name)
    }

    pub fn validators(&self) -> &[FieldValidator] {
        &self.validators
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Check one field. Fields without a validator always pass.
    pub fn validate_field(&self, name: &str, values: &FormValueMap) -> Result<(), String> {
        match self.get(name) {
            Some(validator) => validator.check(values.get(name)),
            None => Ok(()),
        }
    }

    /// Check every field in the schema
    pub fn validate(&self, values: &FormValueMap) -> FieldErrors {
        self.collect_errors(values, |_| true)
    }

    /// Check only the fields currently visible; hidden fields never fail
    pub fn validate_visible(&self, values: &FormValueMap, visibility: &VisibilityMap) -> FieldErrors {
        self.collect_errors(values, |name| visibility.is_visible(name))
    }

    fn collect_errors(&self, values: &FormValueMap, include: impl Fn(&str) -> bool) -> FieldErrors {
        self.validators
            .iter()
            .filter(|v| include(&v.name))
            .filter_map(|v| {
                v.check(values.get(&v.name))
                    .err()
                    .map(|message| (v.name.clone(), message))
            })
            .collect()
    }
}

/// Build the validation schema for a field list.
///
/// Fails on the first field with an invalid `pattern` or a duplicated name.
pub fn generate_schema(fields: &[FieldDescriptor]) -> Result<ValidationSchema, SchemaError> {
    let mut seen = HashSet::new();
    let mut validators = Vec::with_capacity(fields.len());

    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                field: field.name.clone(),
            });
        }
        validators.push(build_validator(field)?);
    }

    debug!(fields = validators.len(), "generated validation schema");
    Ok(ValidationSchema { validators })
}

fn build_validator(field: &FieldDescriptor) -> Result<FieldValidator, SchemaError> {
    let default_rules = ValidationRules::default();
    let rules = field.validation_rules.as_ref().unwrap_or(&default_rules);

    let rule = match &field.input_type {
        InputType::Text | InputType::TextArea => Rule::Text {
            min_length: rules.min_length,
            max_length: rules.max_length,
            pattern: compile_pattern(field, rules.pattern.as_deref())?,
        },
        InputType::Email => Rule::Email,
        InputType::Phone => Rule::Phone {
            pattern: compile_pattern(field, rules.pattern.as_deref().filter(|p| !p.is_empty()))?,
        },
        InputType::Url => Rule::Url,
        InputType::Number => Rule::Number {
            min: rules.min,
            max: rules.max,
        },
        InputType::Date => Rule::Date,
        InputType::Dropdown | InputType::Options => Rule::Choice,
        InputType::MultiSelect | InputType::PMultiSelect => Rule::MultiSelect,
        InputType::Boolean | InputType::Checkbox => Rule::Boolean,
        InputType::Section
        | InputType::Template
        | InputType::Autocomplete
        | InputType::MaskInput
        | InputType::TextEditor
        | InputType::File
        | InputType::Radio
        | InputType::Hidden
        | InputType::Unsupported(_)
        | InputType::Missing => Rule::Any,
    };

    Ok(FieldValidator {
        name: field.name.clone(),
        label: field.display_label().to_string(),
        required: rules.required && !matches!(rule, Rule::Boolean),
        rule,
    })
}

fn compile_pattern(
    field: &FieldDescriptor,
    pattern: Option<&str>,
) -> Result<Option<Regex>, SchemaError> {
    pattern
        .map(|source| {
            Regex::new(source).map_err(|e| SchemaError::InvalidPattern {
                field: field.name.clone(),
                pattern: source.to_string(),
                message: e.to_string(),
            })
        })
        .transpose()
}

fn is_email(text: &str) -> bool {
    !text.starts_with('.') && !text.contains("..") && EMAIL_RE.is_match(text)
}

/// Non-empty test used by required choice fields. `objects_only` treats empty
/// objects as empty (choices); otherwise empty arrays are what count as empty.
fn has_content(value: Option<&Value>, objects_only: bool) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Object(map)) => !(objects_only && map.is_empty()),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

//! Field renderer dispatch
//!
//! Every field type maps to exactly one [`FieldControl`]. A control turns a
//! [`FieldInput`] change event into the value stored in the form, and describes
//! how the field should be presented ([`RenderedField`]). Types without an
//! editing behavior become [`FieldControl::Unsupported`], which renders a
//! placeholder instead of failing the whole form.

mod date;
mod phone;
mod select;

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

pub use date::{date_fns_to_chrono, DateControl, DateEmission, DateInput, DatePolicy, DatePredicate};
pub use phone::{dial_code, DialCodeFormatter, PhoneFormatter};
pub use select::{MultiSelectControl, SelectControl};

use crate::config::EngineConfig;
use crate::error::BindError;
use crate::model::{FieldDescriptor, InputType, NumberConfig, NumberMode};
use crate::options::{display_value, OptionAccessor};

static LIVE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)([a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}(/.*)?$").unwrap()
});

pub const URL_WARNING: &str = "Enter a valid URL (example: https://example.com)";

const DEFAULT_TEXT_AREA_ROWS: u32 = 4;

/// A change event coming from the host UI
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// Raw text typed into a text-like input
    Text(String),
    /// Checkbox state; `None` is the indeterminate state
    Checked(Option<bool>),
    /// Key of the picked option (empty clears)
    Select(String),
    /// Add or remove one option of a multi-select
    Toggle(String),
    /// Replace a multi-select's selection
    SelectMany(Vec<String>),
    Date(DateInput),
    File(Option<FileInput>),
    /// Remove the value entirely
    Clear,
}

/// Metadata of a picked file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInput {
    pub name: String,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Result of binding a change: the value to store (`None` removes it) and,
/// for dates, the text shown to the user
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bound {
    pub value: Option<Value>,
    pub formatted: Option<String>,
}

impl Bound {
    fn value(value: Value) -> Self {
        Self {
            value: Some(value),
            formatted: None,
        }
    }

    fn cleared() -> Self {
        Self::default()
    }
}

/// What a bind needs besides the event itself
#[derive(Clone, Copy)]
pub struct BindContext<'a> {
    pub current: Option<&'a Value>,
    pub options: &'a [Value],
    pub today: NaiveDate,
    pub date_predicate: Option<&'a DatePredicate>,
    pub phone: &'a dyn PhoneFormatter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Number { integer: bool },
    Email,
    File,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumberFormat {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhoneControl {
    pub default_country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextAreaControl {
    pub rows: u32,
    pub max_length: Option<usize>,
}

impl TextAreaControl {
    /// Cut `text` down to the maximum length, counted in characters
    pub fn clamp(&self, text: String) -> String {
        match self.max_length {
            Some(max) if text.chars().count() > max => text.chars().take(max).collect(),
            _ => text,
        }
    }
}

/// Concrete editing behavior of a field
#[derive(Debug, Clone)]
pub enum FieldControl {
    Input(InputKind, NumberFormat),
    Select(SelectControl),
    MultiSelect(MultiSelectControl),
    Phone(PhoneControl),
    Date(DateControl),
    Checkbox,
    TextArea(TextAreaControl),
    Url,
    Unsupported { type_name: String },
}

/// Pick the control for a field
pub fn dispatch(field: &FieldDescriptor, config: &EngineConfig) -> FieldControl {
    match &field.input_type {
        InputType::Text => FieldControl::Input(InputKind::Text, NumberFormat::default()),
        InputType::Email => FieldControl::Input(InputKind::Email, NumberFormat::default()),
        InputType::File => FieldControl::Input(InputKind::File, NumberFormat::default()),
        InputType::Number => number_control(field.number.as_ref()),
        InputType::Dropdown | InputType::Options => {
            FieldControl::Select(SelectControl::from_config(field.option_config()))
        }
        InputType::MultiSelect | InputType::PMultiSelect => FieldControl::MultiSelect(
            MultiSelectControl::from_config(field.option_config(), field.datatype.as_deref()),
        ),
        InputType::Phone => FieldControl::Phone(PhoneControl {
            default_country: field
                .phone
                .as_ref()
                .and_then(|p| p.default_country.clone())
                .unwrap_or_else(|| config.default_phone_country.clone()),
        }),
        InputType::Date => FieldControl::Date(DateControl::from_config(
            field.date.as_ref(),
            &config.default_date_format,
        )),
        InputType::Boolean | InputType::Checkbox => FieldControl::Checkbox,
        InputType::TextArea => FieldControl::TextArea(TextAreaControl {
            rows: field
                .text_area
                .as_ref()
                .and_then(|t| t.rows)
                .unwrap_or(DEFAULT_TEXT_AREA_ROWS),
            max_length: field.validation_rules.as_ref().and_then(|r| r.max_length),
        }),
        InputType::Url => FieldControl::Url,
        InputType::Section
        | InputType::Template
        | InputType::Autocomplete
        | InputType::MaskInput
        | InputType::TextEditor
        | InputType::Radio
        | InputType::Hidden
        | InputType::Unsupported(_)
        | InputType::Missing => FieldControl::Unsupported {
            type_name: field.input_type.as_str().to_string(),
        },
    }
}

fn number_control(config: Option<&NumberConfig>) -> FieldControl {
    let config = config.cloned().unwrap_or_default();
    let prefix = match (&config.prefix, config.mode, &config.currency) {
        (Some(prefix), _, _) => Some(prefix.clone()),
        (None, NumberMode::Currency, Some(currency)) => Some(currency.clone()),
        _ => None,
    };
    FieldControl::Input(
        InputKind::Number {
            integer: config.mode == NumberMode::Integer,
        },
        NumberFormat {
            prefix,
            suffix: config.suffix,
        },
    )
}

impl FieldControl {
    pub fn is_supported(&self) -> bool {
        !matches!(self, FieldControl::Unsupported { .. })
    }

    fn mismatch(field: &str, expected: &'static str) -> BindError {
        BindError::InputMismatch {
            field: field.to_string(),
            expected,
        }
    }

    /// Turn a change event into the value to store for `field`
    pub fn bind(
        &self,
        field: &str,
        input: FieldInput,
        ctx: &BindContext<'_>,
    ) -> Result<Bound, BindError> {
        if let FieldControl::Unsupported { type_name } = self {
            return Err(BindError::Unsupported {
                field: field.to_string(),
                type_name: type_name.clone(),
            });
        }
        if matches!(input, FieldInput::Clear) {
            return Ok(match self {
                FieldControl::Checkbox => Bound::value(Value::Bool(false)),
                _ => Bound::cleared(),
            });
        }

        match (self, input) {
            (FieldControl::Input(InputKind::Text | InputKind::Email, _), FieldInput::Text(text))
            | (FieldControl::Url, FieldInput::Text(text)) => {
                Ok(Bound::value(Value::String(text)))
            }
            (FieldControl::Input(InputKind::Number { integer }, format), FieldInput::Text(text)) => {
                bind_number(field, &text, *integer, format)
            }
            (FieldControl::Input(InputKind::File, _), FieldInput::File(file)) => Ok(match file {
                Some(file) => Bound::value(serde_json::to_value(file).unwrap_or(Value::Null)),
                None => Bound::cleared(),
            }),
            (FieldControl::Select(control), FieldInput::Select(key)) => {
                control.bind(field, &key, ctx.options).map(Bound::value)
            }
            (FieldControl::MultiSelect(control), FieldInput::Toggle(key)) => control
                .toggle(field, &key, ctx.current, ctx.options)
                .map(Bound::value),
            (FieldControl::MultiSelect(control), FieldInput::SelectMany(keys)) => control
                .select_many(field, &keys, ctx.options)
                .map(Bound::value),
            (FieldControl::Phone(control), FieldInput::Text(raw)) => {
                let formatted = ctx.phone.format(&raw, &control.default_country);
                Ok(if formatted.is_empty() {
                    Bound::cleared()
                } else {
                    Bound::value(Value::String(formatted))
                })
            }
            (FieldControl::Date(control), FieldInput::Date(input)) => {
                date_bound(control, field, input, ctx)
            }
            (FieldControl::Date(control), FieldInput::Text(text)) => {
                if text.trim().is_empty() {
                    return Ok(Bound::cleared());
                }
                date_bound(control, field, DateInput::Text(text), ctx)
            }
            (FieldControl::Checkbox, FieldInput::Checked(checked)) => {
                Ok(Bound::value(Value::Bool(checked.unwrap_or(false))))
            }
            (FieldControl::TextArea(control), FieldInput::Text(text)) => {
                Ok(Bound::value(Value::String(control.clamp(text))))
            }
            (control, _) => Err(Self::mismatch(field, control.expected_input())),
        }
    }

    fn expected_input(&self) -> &'static str {
        match self {
            FieldControl::Input(InputKind::File, _) => "file",
            FieldControl::Input(..) | FieldControl::Url | FieldControl::TextArea(_) => "text",
            FieldControl::Phone(_) => "phone number",
            FieldControl::Select(_) => "option",
            FieldControl::MultiSelect(_) => "multiple option",
            FieldControl::Date(_) => "date",
            FieldControl::Checkbox => "checkbox",
            FieldControl::Unsupported { .. } => "no",
        }
    }

    /// Presentation of `field` given its current state
    pub fn render(&self, field: &FieldDescriptor, state: &RenderState<'_>) -> RenderedField {
        let label = field
            .label
            .clone()
            .filter(|label| !label.is_empty())
            .filter(|_| !field.input_type.is_boolean());

        let placeholder = match self {
            FieldControl::Select(_) => placeholder_or_label(field, "Select"),
            FieldControl::MultiSelect(_) => placeholder_or_label(field, "Select options"),
            FieldControl::Phone(_) => placeholder_or_label(field, "Enter phone number"),
            FieldControl::Date(_) => placeholder_or_label(field, "Pick a date"),
            FieldControl::Url => field
                .url
                .as_ref()
                .and_then(|u| u.placeholder.clone())
                .unwrap_or_else(|| placeholder_or_label(field, "")),
            FieldControl::Unsupported { type_name } => {
                format!("Unsupported field type: {type_name}")
            }
            _ => placeholder_or_label(field, ""),
        };

        let (options, selected) = match self {
            FieldControl::Select(control) => (
                list_options(&control.accessor, state.options),
                Some(control.accessor.selected_key(state.value, state.options))
                    .filter(|key| !key.is_empty())
                    .into_iter()
                    .collect(),
            ),
            FieldControl::MultiSelect(control) => (
                list_options(&control.accessor, state.options),
                control.selected_keys(state.value),
            ),
            _ => (Vec::new(), Vec::new()),
        };

        let display = match (self, state.value) {
            (_, None) | (_, Some(Value::Null)) => String::new(),
            (FieldControl::Input(InputKind::Number { .. }, format), Some(value)) => format!(
                "{}{}{}",
                format.prefix.as_deref().unwrap_or_default(),
                display_value(value),
                format.suffix.as_deref().unwrap_or_default()
            ),
            (_, Some(value)) => display_value(value),
        };

        let warning = match (self, state.value) {
            (FieldControl::Url, Some(Value::String(text))) if !text.is_empty() => {
                url_warning(text).map(str::to_string)
            }
            _ => None,
        };

        let rows = match self {
            FieldControl::TextArea(control) => Some(control.rows),
            _ => None,
        };

        RenderedField {
            name: field.name.clone(),
            kind: self.kind(),
            label,
            required: field.is_required(),
            placeholder,
            disabled: field.disabled || state.loading || !self.is_supported(),
            loading: state.loading,
            description: field.description.clone(),
            help_text: field.help_text.clone(),
            display,
            error: state.error.map(str::to_string),
            warning,
            options,
            selected,
            rows,
            class_name: field.class_name.clone(),
        }
    }

    pub fn kind(&self) -> ControlKind {
        match self {
            FieldControl::Input(InputKind::Text, _) => ControlKind::Text,
            FieldControl::Input(InputKind::Number { .. }, _) => ControlKind::Number,
            FieldControl::Input(InputKind::Email, _) => ControlKind::Email,
            FieldControl::Input(InputKind::File, _) => ControlKind::File,
            FieldControl::Select(_) => ControlKind::Select,
            FieldControl::MultiSelect(_) => ControlKind::MultiSelect,
            FieldControl::Phone(_) => ControlKind::Phone,
            FieldControl::Date(_) => ControlKind::Date,
            FieldControl::Checkbox => ControlKind::Checkbox,
            FieldControl::TextArea(_) => ControlKind::TextArea,
            FieldControl::Url => ControlKind::Url,
            FieldControl::Unsupported { .. } => ControlKind::Unsupported,
        }
    }
}

/// Declared placeholder, then the label, then `fallback`
fn placeholder_or_label(field: &FieldDescriptor, fallback: &str) -> String {
    [&field.placeholder, &field.label]
        .into_iter()
        .flatten()
        .find(|text| !text.is_empty())
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

fn date_bound(
    control: &DateControl,
    field: &str,
    input: DateInput,
    ctx: &BindContext<'_>,
) -> Result<Bound, BindError> {
    let emission = control.select(field, input, ctx.today, ctx.date_predicate)?;
    Ok(Bound {
        value: Some(emission.value),
        formatted: Some(emission.formatted),
    })
}

/// Empty input means no value. Text that is not a number is kept as typed so
/// validation reports it.
fn bind_number(
    field: &str,
    raw: &str,
    integer: bool,
    format: &NumberFormat,
) -> Result<Bound, BindError> {
    let mut text = raw.trim();
    if let Some(prefix) = format.prefix.as_deref() {
        text = text.strip_prefix(prefix).unwrap_or(text).trim();
    }
    if let Some(suffix) = format.suffix.as_deref() {
        text = text.strip_suffix(suffix).unwrap_or(text).trim();
    }
    if text.is_empty() {
        return Ok(Bound::cleared());
    }

    let cleaned = text.replace(',', "");
    let Ok(number) = cleaned.parse::<f64>() else {
        return Ok(Bound::value(Value::String(raw.to_string())));
    };
    if !number.is_finite() {
        return Ok(Bound::value(Value::String(raw.to_string())));
    }

    if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        return Ok(Bound::value(Value::Number(Number::from(number as i64))));
    }
    if integer {
        return Err(BindError::InputMismatch {
            field: field.to_string(),
            expected: "a whole number",
        });
    }
    Ok(Bound::value(
        Number::from_f64(number)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(raw.to_string())),
    ))
}

/// Inline warning for a non-empty URL value that does not look like a web address
pub fn url_warning(text: &str) -> Option<&'static str> {
    (!text.is_empty() && !LIVE_URL_RE.is_match(text)).then_some(URL_WARNING)
}

fn list_options(accessor: &OptionAccessor, options: &[Value]) -> Vec<RenderedOption> {
    options
        .iter()
        .filter(|option| !option.is_null())
        .map(|option| RenderedOption {
            key: accessor.key_of(option),
            label: accessor.label_of(option),
        })
        .collect()
}

/// Current state of one field, as needed for rendering
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderState<'a> {
    pub value: Option<&'a Value>,
    pub options: &'a [Value],
    pub error: Option<&'a str>,
    pub loading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlKind {
    Text,
    Number,
    Email,
    File,
    Select,
    MultiSelect,
    Phone,
    Date,
    Checkbox,
    TextArea,
    Url,
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedOption {
    pub key: String,
    pub label: String,
}

/// Host-facing description of one visible field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedField {
    pub name: String,
    pub kind: ControlKind,
    /// Heading above the control; checkboxes carry their label inline instead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub required: bool,
    pub placeholder: String,
    pub disabled: bool,
    pub loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    /// Current value as text
    pub display: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<RenderedOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OptionConfig, TextAreaConfig, ValidationRules};
    use serde_json::json;

    fn engine() -> EngineConfig {
        EngineConfig {
            api_base_url: None,
            http_timeout: None,
            default_phone_country: "IN".into(),
            default_date_format: "yyyy-MM-dd".into(),
            user_agent: "test".into(),
        }
    }

    fn bind(field: &FieldDescriptor, input: FieldInput) -> Result<Bound, BindError> {
        bind_with(field, input, None, &[])
    }

    fn bind_with(
        field: &FieldDescriptor,
        input: FieldInput,
        current: Option<&Value>,
        options: &[Value],
    ) -> Result<Bound, BindError> {
        let ctx = BindContext {
            current,
            options,
            today: NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
            date_predicate: None,
            phone: &DialCodeFormatter,
        };
        dispatch(field, &engine()).bind(&field.name, input, &ctx)
    }

    #[test]
    fn test_every_type_dispatches() {
        let cases = [
            ("text", ControlKind::Text),
            ("number", ControlKind::Number),
            ("email", ControlKind::Email),
            ("file", ControlKind::File),
            ("dropdown", ControlKind::Select),
            ("options", ControlKind::Select),
            ("multi-select", ControlKind::MultiSelect),
            ("p-multiSelect", ControlKind::MultiSelect),
            ("phone", ControlKind::Phone),
            ("date", ControlKind::Date),
            ("boolean", ControlKind::Checkbox),
            ("checkbox", ControlKind::Checkbox),
            ("textarea", ControlKind::TextArea),
            ("url", ControlKind::Url),
            ("radio", ControlKind::Unsupported),
            ("signature", ControlKind::Unsupported),
        ];
        for (tag, kind) in cases {
            let field = FieldDescriptor::new("f", tag.parse().unwrap());
            assert_eq!(dispatch(&field, &engine()).kind(), kind, "type {tag}");
        }
    }

    #[test]
    fn test_number_coercion() {
        let field = FieldDescriptor::new("age", InputType::Number);
        assert_eq!(bind(&field, FieldInput::Text("".into())).unwrap().value, None);
        assert_eq!(bind(&field, FieldInput::Text("  ".into())).unwrap().value, None);
        assert_eq!(
            bind(&field, FieldInput::Text("42".into())).unwrap().value,
            Some(json!(42))
        );
        assert_eq!(
            bind(&field, FieldInput::Text("0".into())).unwrap().value,
            Some(json!(0))
        );
        assert_eq!(
            bind(&field, FieldInput::Text("2.5".into())).unwrap().value,
            Some(json!(2.5))
        );
        assert_eq!(
            bind(&field, FieldInput::Text("abc".into())).unwrap().value,
            Some(json!("abc"))
        );
    }

    #[test]
    fn test_integer_and_currency_numbers() {
        let mut field = FieldDescriptor::new("qty", InputType::Number);
        field.number = Some(NumberConfig {
            mode: NumberMode::Integer,
            ..Default::default()
        });
        assert!(matches!(
            bind(&field, FieldInput::Text("1.5".into())),
            Err(BindError::InputMismatch { .. })
        ));

        field.number = Some(NumberConfig {
            mode: NumberMode::Currency,
            currency: Some("$".into()),
            ..Default::default()
        });
        assert_eq!(
            bind(&field, FieldInput::Text("$1,250.50".into())).unwrap().value,
            Some(json!(1250.5))
        );
    }

    #[test]
    fn test_checkbox_tri_state() {
        let field = FieldDescriptor::new("agree", InputType::Boolean);
        assert_eq!(
            bind(&field, FieldInput::Checked(None)).unwrap().value,
            Some(json!(false))
        );
        assert_eq!(
            bind(&field, FieldInput::Checked(Some(true))).unwrap().value,
            Some(json!(true))
        );
        assert_eq!(bind(&field, FieldInput::Clear).unwrap().value, Some(json!(false)));
    }

    #[test]
    fn test_text_area_clamps_length() {
        let mut field = FieldDescriptor::new("bio", InputType::TextArea).with_rules(ValidationRules {
            max_length: Some(5),
            ..Default::default()
        });
        field.text_area = Some(TextAreaConfig { rows: Some(8) });
        assert_eq!(
            bind(&field, FieldInput::Text("héllo world".into())).unwrap().value,
            Some(json!("héllo"))
        );
        let rendered = dispatch(&field, &engine()).render(&field, &RenderState::default());
        assert_eq!(rendered.rows, Some(8));
    }

    #[test]
    fn test_phone_uses_formatter_and_country() {
        let mut field = FieldDescriptor::new("mobile", InputType::Phone);
        assert_eq!(
            bind(&field, FieldInput::Text("98765 43210".into())).unwrap().value,
            Some(json!("+919876543210"))
        );
        field.phone = Some(crate::model::PhoneConfig {
            default_country: Some("GB".into()),
        });
        assert_eq!(
            bind(&field, FieldInput::Text("07700 900123".into())).unwrap().value,
            Some(json!("+447700900123"))
        );
        assert_eq!(bind(&field, FieldInput::Text("".into())).unwrap().value, None);
    }

    #[test]
    fn test_date_emits_value_and_text() {
        let field = FieldDescriptor::new("start", InputType::Date);
        let day = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let bound = bind(&field, FieldInput::Date(DateInput::day(day))).unwrap();
        assert_eq!(bound.value, Some(json!("2024-07-01")));
        assert_eq!(bound.formatted.as_deref(), Some("2024-07-01"));
    }

    #[test]
    fn test_select_binding_through_dispatch() {
        let field = FieldDescriptor::new("owner", InputType::Dropdown).with_options(OptionConfig {
            options: Some(vec![json!({"id": 1, "name": "Alpha"})]),
            ..Default::default()
        });
        let options = field.option_config().unwrap().options.clone().unwrap();
        let bound = bind_with(&field, FieldInput::Select("1".into()), None, &options).unwrap();
        assert_eq!(bound.value, Some(json!(1)));
    }

    #[test]
    fn test_mismatched_input_is_refused() {
        let field = FieldDescriptor::new("agree", InputType::Checkbox);
        assert!(matches!(
            bind(&field, FieldInput::Text("yes".into())),
            Err(BindError::InputMismatch { .. })
        ));
    }

    #[test]
    fn test_unsupported_renders_placeholder() {
        let field = FieldDescriptor::new("sig", "signature".parse().unwrap());
        let control = dispatch(&field, &engine());
        assert!(matches!(
            bind(&field, FieldInput::Text("x".into())),
            Err(BindError::Unsupported { .. })
        ));
        let rendered = control.render(&field, &RenderState::default());
        assert_eq!(rendered.placeholder, "Unsupported field type: signature");
        assert!(rendered.disabled);
    }

    #[test]
    fn test_url_live_warning() {
        assert_eq!(url_warning(""), None);
        assert_eq!(url_warning("https://example.com/a"), None);
        assert_eq!(url_warning("example"), Some(URL_WARNING));

        let field = FieldDescriptor::new("site", InputType::Url);
        let control = dispatch(&field, &engine());
        let value = json!("htp:/bad");
        let rendered = control.render(
            &field,
            &RenderState {
                value: Some(&value),
                ..Default::default()
            },
        );
        assert_eq!(rendered.warning.as_deref(), Some(URL_WARNING));
        assert_eq!(rendered.display, "htp:/bad");
    }

    #[test]
    fn test_render_labels_and_placeholders() {
        let text = FieldDescriptor::new("name", InputType::Text)
            .with_label("Full name")
            .required();
        let rendered = dispatch(&text, &engine()).render(&text, &RenderState::default());
        assert_eq!(rendered.label.as_deref(), Some("Full name"));
        assert_eq!(rendered.placeholder, "Full name");
        assert!(rendered.required);

        let flag = FieldDescriptor::new("agree", InputType::Boolean).with_label("I agree");
        let rendered = dispatch(&flag, &engine()).render(&flag, &RenderState::default());
        assert_eq!(rendered.label, None);

        let select = FieldDescriptor::new("owner", InputType::Dropdown);
        let options = vec![json!({"id": 1, "name": "Alpha"}), json!({"id": 2, "name": "Beta"})];
        let current = json!({"id": 2, "name": "Beta"});
        let rendered = dispatch(&select, &engine()).render(
            &select,
            &RenderState {
                value: Some(&current),
                options: &options,
                loading: true,
                ..Default::default()
            },
        );
        assert_eq!(rendered.placeholder, "Select");
        assert_eq!(rendered.options[0].label, "Alpha");

        let labelled = FieldDescriptor::new("mobile", InputType::Phone).with_label("Mobile");
        let rendered = dispatch(&labelled, &engine()).render(&labelled, &RenderState::default());
        assert_eq!(rendered.placeholder, "Mobile");
        let bare = FieldDescriptor::new("mobile", InputType::Phone);
        let rendered = dispatch(&bare, &engine()).render(&bare, &RenderState::default());
        assert_eq!(rendered.placeholder, "Enter phone number");
        let dated = FieldDescriptor::new("start", InputType::Date).with_label("Start");
        let rendered = dispatch(&dated, &engine()).render(&dated, &RenderState::default());
        assert_eq!(rendered.placeholder, "Start");
        assert_eq!(rendered.selected, vec!["2".to_string()]);
        assert!(rendered.disabled);
    }
}

//! Field type tags
//!
//! Field lists arrive as JSON/YAML with a free-form `type` string. It is parsed
//! once into the closed [`InputType`] enum so that every consumer (schema
//! generation, renderer dispatch) matches exhaustively and a new tag cannot
//! fall through silently.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Declared type of a form field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum InputType {
    Section,
    Template,
    Text,
    Number,
    Date,
    Email,
    Autocomplete,
    /// `p-multiSelect`, the older spelling of `multi-select`
    PMultiSelect,
    Options,
    /// `text-area`, also accepted as `textarea`
    TextArea,
    MaskInput,
    TextEditor,
    File,
    Radio,
    Checkbox,
    Hidden,
    MultiSelect,
    Dropdown,
    Phone,
    Url,
    Boolean,
    /// Any tag not listed above, kept verbatim for the placeholder text
    Unsupported(String),
    /// No `type` declared
    #[default]
    Missing,
}

impl InputType {
    /// The canonical tag for this type
    pub fn as_str(&self) -> &str {
        match self {
            InputType::Section => "section",
            InputType::Template => "template",
            InputType::Text => "text",
            InputType::Number => "number",
            InputType::Date => "date",
            InputType::Email => "email",
            InputType::Autocomplete => "autocomplete",
            InputType::PMultiSelect => "p-multiSelect",
            InputType::Options => "options",
            InputType::TextArea => "text-area",
            InputType::MaskInput => "mask-input",
            InputType::TextEditor => "text-editor",
            InputType::File => "file",
            InputType::Radio => "radio",
            InputType::Checkbox => "checkbox",
            InputType::Hidden => "hidden",
            InputType::MultiSelect => "multi-select",
            InputType::Dropdown => "dropdown",
            InputType::Phone => "phone",
            InputType::Url => "url",
            InputType::Boolean => "boolean",
            InputType::Unsupported(tag) => tag,
            InputType::Missing => "",
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, InputType::Boolean | InputType::Checkbox)
    }
}

impl FromStr for InputType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "section" => InputType::Section,
            "template" => InputType::Template,
            "text" => InputType::Text,
            "number" => InputType::Number,
            "date" => InputType::Date,
            "email" => InputType::Email,
            "autocomplete" => InputType::Autocomplete,
            "p-multiSelect" => InputType::PMultiSelect,
            "options" => InputType::Options,
            "text-area" | "textarea" => InputType::TextArea,
            "mask-input" => InputType::MaskInput,
            "text-editor" => InputType::TextEditor,
            "file" => InputType::File,
            "radio" => InputType::Radio,
            "checkbox" => InputType::Checkbox,
            "hidden" => InputType::Hidden,
            "multi-select" => InputType::MultiSelect,
            "dropdown" => InputType::Dropdown,
            "phone" => InputType::Phone,
            "url" => InputType::Url,
            "boolean" => InputType::Boolean,
            "" => InputType::Missing,
            other => InputType::Unsupported(other.to_string()),
        })
    }
}

impl From<String> for InputType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(parsed) => parsed,
            Err(never) => match never {},
        }
    }
}

impl From<InputType> for String {
    fn from(value: InputType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

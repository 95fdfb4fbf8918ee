//! Error types for the form engine
//!
//! Each concern gets its own `thiserror` enum so callers can match on the
//! category they care about. `FormError` wraps them all for callers that just
//! want to propagate with `?`.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the form engine
#[derive(Error, Debug)]
pub enum FormError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Binding error: {0}")]
    Bind(#[from] BindError),

    #[error("Submit error: {0}")]
    Submit(#[from] SubmitError),

    #[error("Option loading error: {0}")]
    Options(#[from] OptionLoadError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Misconfigured field declarations, detected while building a validation schema.
///
/// These indicate an authoring mistake, not a user error, and abort schema
/// generation for the whole field list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Field '{field}' declares an invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        field: String,
        pattern: String,
        message: String,
    },

    #[error("Field name '{field}' is declared more than once")]
    DuplicateField { field: String },
}

impl SchemaError {
    /// Name of the field that caused the failure
    pub fn field(&self) -> &str {
        match self {
            SchemaError::InvalidPattern { field, .. } => field,
            SchemaError::DuplicateField { field } => field,
        }
    }
}

/// A change event that a field's control cannot accept.
///
/// The form value map is left untouched when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    #[error("Unsupported field type '{type_name}' for field '{field}'")]
    Unsupported { field: String, type_name: String },

    #[error("Field '{field}' expects {expected} input")]
    InputMismatch { field: String, expected: &'static str },

    #[error("Date {date} is disabled for field '{field}'")]
    DateDisabled { field: String, date: String },

    #[error("Field '{field}' received an unparseable date '{input}'")]
    InvalidDate { field: String, input: String },

    #[error("Field '{field}' is not part of this form")]
    UnknownField { field: String },

    #[error("Field '{field}' accepts at most {limit} selections")]
    SelectionLimit { field: String, limit: usize },

    #[error("Field '{field}' has no option '{key}'")]
    UnknownOption { field: String, key: String },
}

/// Failure reported by the external submit collaborator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("{0}")]
    Collaborator(String),
}

/// Remote option list failures; always recovered as an empty option list by the loader
#[derive(Error, Debug)]
pub enum OptionLoadError {
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Options endpoint {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Options endpoint {url} returned invalid JSON: {message}")]
    Decode { url: String, message: String },

    #[error("Options response has no array at '{path}'")]
    Shape { path: String },

    #[error("Invalid options URL '{url}': {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Errors loading field lists or engine configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported field list format '{extension}' (expected json, yaml or yml)")]
    UnsupportedFormat { extension: String },
}

pub type Result<T, E = FormError> = std::result::Result<T, E>;

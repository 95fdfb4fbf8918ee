//! Form Engine - schema-driven dynamic forms
//!
//! Turns a declarative list of field descriptors into a working form: a
//! validation schema built once per field list, a visibility map recomputed
//! on every change, one input control per field type, and a session that
//! seeds, tracks, validates and submits the values.
//!
//! ## Data flow
//! Field list -> Validation schema (once) + Visibility (every change)
//! -> Field controls (visible fields) -> Form session -> submit collaborator
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use form_engine::{FieldDescriptor, FieldInput, FormSession, FormValueMap, InputType, SubmitAttempt};
//!
//! let fields = vec![FieldDescriptor::new("email", InputType::Email).required()];
//! let mut session = FormSession::new(&fields, FormValueMap::new()).unwrap();
//! session.on_change("email", FieldInput::Text("ada@example.com".into())).unwrap();
//! assert!(matches!(session.begin_submit(), SubmitAttempt::Ready(_)));
//! ```

// Core error handling
pub mod error;

// Field list declarations
pub mod model;

// Engine settings and field list loading
pub mod config;

// Validation schema generation
pub mod schema;

// Visibility conditions
pub mod visibility;

// Option lists: accessors, sources and one-shot loading
pub mod options;

// Field type -> input control
pub mod dispatch;

// Editing session
pub mod form;

pub use config::{load_fields, EngineConfig};
pub use dispatch::{
    dispatch, Bound, DateInput, FieldControl, FieldInput, PhoneFormatter, RenderedField,
};
pub use error::{BindError, ConfigError, FormError, OptionLoadError, SchemaError, SubmitError};
pub use form::{
    FormSession, SubmitAttempt, SubmitHandler, SubmitOutcome, SubmitTicket,
};
pub use model::{
    Condition, ConditionGroup, ConditionsRule, FieldDescriptor, FormValueMap, InputType,
    Operator, ValidationRules, Visibility,
};
pub use options::{OptionAccessor, OptionLoader, OptionSource};
pub use schema::{generate_schema, FieldErrors, ValidationSchema};
pub use visibility::{VisibilityEvaluator, VisibilityMap};

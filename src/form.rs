//! Form session orchestration
//!
//! A [`FormSession`] owns the editing state for one field list: values, touched
//! fields, errors, visibility, per-field option loaders and the submit gate.
//! The validation schema and field controls are derived once per field list
//! and reused for every change.
//!
//! Submission is two-phase so that a host sharing the session can observe the
//! pending state while its collaborator runs:
//!
//! ```text
//! begin_submit() -> Ready(ticket) -> host calls collaborator -> finish_submit(ticket, result)
//! ```
//!
//! [`FormSession::submit`] runs both phases against a [`SubmitHandler`].

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::dispatch::{
    dispatch, BindContext, Bound, DatePredicate, DialCodeFormatter, FieldControl, FieldInput,
    PhoneFormatter, RenderState, RenderedField,
};
use crate::error::{BindError, SchemaError, SubmitError};
use crate::model::{FieldDescriptor, FormValueMap};
use crate::options::{OptionLoader, OptionSource};
use crate::schema::{generate_schema, FieldErrors, ValidationSchema};
use crate::visibility::{VisibilityEvaluator, VisibilityMap};

/// External collaborator that receives the normalized payload
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    async fn submit(&self, payload: &FormValueMap) -> anyhow::Result<()>;
}

/// Proof that a submit passed validation; hand it back to
/// [`FormSession::finish_submit`]
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket {
    id: u64,
    payload: FormValueMap,
}

impl SubmitTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Normalized values to hand to the collaborator
    pub fn payload(&self) -> &FormValueMap {
        &self.payload
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAttempt {
    Ready(SubmitTicket),
    /// A submit is already in flight; nothing happened
    AlreadyPending,
    /// Validation failed; the collaborator must not be called
    Invalid(FieldErrors),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted,
    AlreadyPending,
    Invalid(FieldErrors),
}

/// Editing state for one field list
pub struct FormSession<'a> {
    id: Uuid,
    fields: &'a [FieldDescriptor],
    config: EngineConfig,

    schema: ValidationSchema,
    evaluator: VisibilityEvaluator<'a>,
    controls: Vec<FieldControl>,
    schema_builds: usize,

    initial: FormValueMap,
    values: FormValueMap,
    formatted: BTreeMap<String, String>,
    touched: BTreeSet<String>,
    errors: FieldErrors,
    visibility: VisibilityMap,

    submit_attempted: bool,
    pending: Option<u64>,
    next_ticket: u64,
    submit_error: Option<String>,
    open: bool,
    close_on_save: bool,

    phone: Box<dyn PhoneFormatter>,
    date_predicates: BTreeMap<String, DatePredicate>,
    loaders: BTreeMap<String, OptionLoader>,
    today: Option<NaiveDate>,
}

impl<'a> FormSession<'a> {
    /// Open a session with configuration read from the environment
    pub fn new(fields: &'a [FieldDescriptor], initial: FormValueMap) -> Result<Self, SchemaError> {
        Self::with_config(fields, initial, EngineConfig::default())
    }

    pub fn with_config(
        fields: &'a [FieldDescriptor],
        initial: FormValueMap,
        config: EngineConfig,
    ) -> Result<Self, SchemaError> {
        let schema = generate_schema(fields)?;
        let controls = fields.iter().map(|f| dispatch(f, &config)).collect();
        let values = seed_values(fields, &initial);
        let evaluator = VisibilityEvaluator::new(fields);
        let visibility = evaluator.visibility_map(&values);

        let session = Self {
            id: Uuid::new_v4(),
            fields,
            config,
            schema,
            evaluator,
            controls,
            schema_builds: 1,
            initial,
            values,
            formatted: BTreeMap::new(),
            touched: BTreeSet::new(),
            errors: FieldErrors::new(),
            visibility,
            submit_attempted: false,
            pending: None,
            next_ticket: 1,
            submit_error: None,
            open: true,
            close_on_save: false,
            phone: Box::new(DialCodeFormatter),
            date_predicates: BTreeMap::new(),
            loaders: BTreeMap::new(),
            today: None,
        };
        debug!(session = %session.id, fields = fields.len(), "form session opened");
        Ok(session)
    }

    // ── Collaborators and settings ──

    pub fn set_phone_formatter(&mut self, formatter: Box<dyn PhoneFormatter>) {
        self.phone = formatter;
    }

    /// Extra "is this date disabled" hook for one date field
    pub fn set_date_predicate(&mut self, field: impl Into<String>, predicate: DatePredicate) {
        self.date_predicates.insert(field.into(), predicate);
    }

    /// Close (and reset) the session after a successful submit
    pub fn set_close_on_save(&mut self, close_on_save: bool) {
        self.close_on_save = close_on_save;
    }

    /// Pin the date used by the date policy (defaults to the local date)
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = Some(today);
    }

    // ── Accessors ──

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn fields(&self) -> &'a [FieldDescriptor] {
        self.fields
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn schema(&self) -> &ValidationSchema {
        &self.schema
    }

    /// How many times the schema has been generated for this session
    pub fn schema_builds(&self) -> usize {
        self.schema_builds
    }

    pub fn values(&self) -> &FormValueMap {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Display text of the last date selection of `name`
    pub fn formatted(&self, name: &str) -> Option<&str> {
        self.formatted.get(name).map(String::as_str)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    pub fn visibility(&self) -> &VisibilityMap {
        &self.visibility
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.visibility.is_visible(name)
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Swap in a field list. The schema and controls are rebuilt only when the
    /// list is a different slice; current values are kept and new defaults
    /// are filled in.
    pub fn set_fields(&mut self, fields: &'a [FieldDescriptor]) -> Result<bool, SchemaError> {
        if std::ptr::eq(self.fields, fields) {
            return Ok(false);
        }

        self.schema = generate_schema(fields)?;
        self.evaluator = VisibilityEvaluator::new(fields);
        self.controls = fields.iter().map(|f| dispatch(f, &self.config)).collect();
        self.schema_builds += 1;
        self.fields = fields;
        self.loaders.clear();

        for (name, value) in seed_values(fields, &self.initial) {
            self.values.entry(name).or_insert(value);
        }
        debug!(session = %self.id, fields = fields.len(), "field list replaced");
        self.recompute();
        Ok(true)
    }

    // ── Editing ──

    fn index_of(&self, name: &str) -> Result<usize, BindError> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| BindError::UnknownField {
                field: name.to_string(),
            })
    }

    /// Set a field's value directly, bypassing its control
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<(), BindError> {
        self.index_of(name)?;
        self.values.insert(name.to_string(), value);
        self.formatted.remove(name);
        self.recompute();
        Ok(())
    }

    pub fn clear_value(&mut self, name: &str) -> Result<(), BindError> {
        self.index_of(name)?;
        self.values.remove(name);
        self.formatted.remove(name);
        self.recompute();
        Ok(())
    }

    /// Route a change event through the field's control and store the result.
    /// A refused event leaves the values untouched.
    pub fn on_change(&mut self, name: &str, input: FieldInput) -> Result<Bound, BindError> {
        let index = self.index_of(name)?;
        let fields = self.fields;
        let field = &fields[index];
        let today = self
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let bound = {
            let ctx = BindContext {
                current: self.values.get(name),
                options: self.options_for(name),
                today,
                date_predicate: self.date_predicates.get(name),
                phone: self.phone.as_ref(),
            };
            self.controls[index].bind(&field.name, input, &ctx)
        };
        let bound = match bound {
            Ok(bound) => bound,
            Err(e) => {
                debug!(session = %self.id, field = name, error = %e, "change refused");
                return Err(e);
            }
        };

        match &bound.value {
            Some(value) => self.values.insert(name.to_string(), value.clone()),
            None => self.values.remove(name),
        };
        match &bound.formatted {
            Some(text) => self.formatted.insert(name.to_string(), text.clone()),
            None => self.formatted.remove(name),
        };
        self.recompute();
        Ok(bound)
    }

    /// Mark a field as touched; it is validated from now on
    pub fn blur(&mut self, name: &str) {
        if self.touched.insert(name.to_string()) {
            self.refresh_errors();
        }
    }

    fn recompute(&mut self) {
        self.visibility = self.evaluator.visibility_map(&self.values);
        self.refresh_errors();
    }

    /// Errors for visible fields that were touched, or all visible fields once
    /// a submit was attempted. Untouched fields are not checked before that.
    fn refresh_errors(&mut self) {
        if !self.submit_attempted && self.touched.is_empty() {
            self.errors.clear();
            return;
        }

        let payload = normalize(&self.values);
        if self.submit_attempted {
            self.errors = self.schema.validate_visible(&payload, &self.visibility);
            return;
        }
        self.errors = self
            .touched
            .iter()
            .filter(|name| self.visibility.is_visible(name))
            .filter_map(|name| {
                self.schema
                    .validate_field(name, &payload)
                    .err()
                    .map(|message| (name.clone(), message))
            })
            .collect();
    }

    /// Values as they would be submitted: strings trimmed, empty strings as null
    pub fn normalized_values(&self) -> FormValueMap {
        normalize(&self.values)
    }

    // ── Submit ──

    /// Validate and, when valid, mark a submit as pending
    pub fn begin_submit(&mut self) -> SubmitAttempt {
        if self.pending.is_some() {
            debug!(session = %self.id, "submit ignored; one is already pending");
            return SubmitAttempt::AlreadyPending;
        }

        self.submit_attempted = true;
        self.submit_error = None;
        let payload = normalize(&self.values);
        self.errors = self.schema.validate_visible(&payload, &self.visibility);

        if !self.errors.is_empty() {
            info!(
                session = %self.id,
                failing = self.errors.len(),
                "submit blocked by validation errors"
            );
            return SubmitAttempt::Invalid(self.errors.clone());
        }

        let id = self.next_ticket;
        self.next_ticket += 1;
        self.pending = Some(id);
        debug!(session = %self.id, ticket = id, "submit pending");
        SubmitAttempt::Ready(SubmitTicket { id, payload })
    }

    /// Record the collaborator's result for a ticket from [`Self::begin_submit`]
    pub fn finish_submit(
        &mut self,
        ticket: &SubmitTicket,
        result: anyhow::Result<()>,
    ) -> Result<(), SubmitError> {
        let current = self.pending == Some(ticket.id);
        if current {
            self.pending = None;
        } else {
            warn!(session = %self.id, ticket = ticket.id, "result for a submit that is not pending");
        }

        match result {
            Ok(()) if !current => Ok(()),
            Ok(()) => {
                info!(session = %self.id, "form submitted");
                if self.close_on_save {
                    self.close();
                }
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                warn!(session = %self.id, error = %message, "submit collaborator failed");
                self.submit_error = Some(message.clone());
                Err(SubmitError::Collaborator(message))
            }
        }
    }

    /// Validate, call `handler` with the normalized payload, and record the result
    pub async fn submit(
        &mut self,
        handler: &dyn SubmitHandler,
    ) -> Result<SubmitOutcome, SubmitError> {
        let ticket = match self.begin_submit() {
            SubmitAttempt::Ready(ticket) => ticket,
            SubmitAttempt::AlreadyPending => return Ok(SubmitOutcome::AlreadyPending),
            SubmitAttempt::Invalid(errors) => return Ok(SubmitOutcome::Invalid(errors)),
        };
        let result = handler.submit(ticket.payload()).await;
        self.finish_submit(&ticket, result)?;
        Ok(SubmitOutcome::Submitted)
    }

    // ── Lifecycle ──

    /// Discard edits and start over from the defaults and initial values.
    /// A submit in flight stays pending until its result is recorded.
    pub fn reset(&mut self) {
        self.values = seed_values(self.fields, &self.initial);
        self.formatted.clear();
        self.touched.clear();
        self.submit_attempted = false;
        self.submit_error = None;
        self.recompute();
        debug!(session = %self.id, "form reset");
    }

    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            self.reset();
            debug!(session = %self.id, "form closed");
        }
    }

    pub fn open(&mut self) {
        if !self.open {
            self.reset();
            self.open = true;
        }
    }

    /// Open again with new initial values (e.g. a different record to edit)
    pub fn reopen(&mut self, initial: FormValueMap) {
        self.initial = initial;
        self.open = true;
        self.reset();
    }

    // ── Options ──

    /// Options currently available to `name`: loaded ones when a loader has
    /// run, otherwise the inline list from the field's config
    pub fn options_for(&self, name: &str) -> &[Value] {
        if let Some(loader) = self.loaders.get(name) {
            return loader.options();
        }
        self.fields
            .iter()
            .find(|f| f.name == name)
            .and_then(|f| f.option_config())
            .and_then(|c| c.options.as_deref())
            .unwrap_or_default()
    }

    pub fn is_loading(&self, name: &str) -> bool {
        let declared = self
            .fields
            .iter()
            .any(|f| f.name == name && f.is_loading);
        declared || self.loaders.get(name).is_some_and(OptionLoader::is_loading)
    }

    pub fn loader(&self, name: &str) -> Option<&OptionLoader> {
        self.loaders.get(name)
    }

    /// Load the options of `name` from `source`, once per source identity
    pub async fn load_options(
        &mut self,
        name: &str,
        source: &dyn OptionSource,
    ) -> Result<&[Value], BindError> {
        self.index_of(name)?;
        let loader = self.loaders.entry(name.to_string()).or_default();
        Ok(loader.ensure_loaded(source).await)
    }

    // ── Rendering ──

    /// Render every visible field, in declaration order
    pub fn render(&self) -> Vec<RenderedField> {
        self.fields
            .iter()
            .zip(&self.controls)
            .filter(|(field, _)| self.visibility.is_visible(&field.name))
            .map(|(field, control)| {
                control.render(
                    field,
                    &RenderState {
                        value: self.values.get(&field.name),
                        options: self.options_for(&field.name),
                        error: self.error(&field.name),
                        loading: self.is_loading(&field.name),
                    },
                )
            })
            .collect()
    }
}

/// Starting values: booleans false, then declared defaults, then initial
/// values. A null initial value does not replace a default.
pub fn seed_values(fields: &[FieldDescriptor], initial: &FormValueMap) -> FormValueMap {
    let mut values = FormValueMap::new();
    for field in fields {
        if field.input_type.is_boolean() {
            values.insert(field.name.clone(), Value::Bool(false));
        }
        if let Some(default) = &field.value {
            values.insert(field.name.clone(), default.clone());
        }
    }
    for (name, value) in initial {
        if value.is_null() && values.contains_key(name) {
            continue;
        }
        values.insert(name.clone(), value.clone());
    }
    values
}

/// Trim top-level strings; empty strings become null
pub fn normalize(values: &FormValueMap) -> FormValueMap {
    values
        .iter()
        .map(|(name, value)| {
            let value = match value {
                Value::String(text) => {
                    let trimmed = text.trim();
                    if trimmed.is_empty() {
                        Value::Null
                    } else {
                        Value::String(trimmed.to_string())
                    }
                }
                other => other.clone(),
            };
            (name.clone(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, ConditionGroup, InputType, Operator, Visibility};
    use serde_json::json;

    fn test_config() -> EngineConfig {
        EngineConfig {
            api_base_url: None,
            http_timeout: None,
            default_phone_country: "IN".into(),
            default_date_format: "yyyy-MM-dd".into(),
            user_agent: "test".into(),
        }
    }

    fn car_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("hasCar", InputType::Boolean),
            FieldDescriptor::new("carModel", InputType::Text)
                .with_label("Car model")
                .required()
                .with_visibility(Visibility::Group(ConditionGroup {
                    conditions: vec![Condition::new("hasCar", Operator::Eq, Some(json!(true)))],
                    ..Default::default()
                })),
        ]
    }

    #[test]
    fn test_seeding_priority() {
        let fields = vec![
            FieldDescriptor::new("a", InputType::Text).with_default(json!("declared")),
            FieldDescriptor::new("b", InputType::Text).with_default(json!("keep")),
            FieldDescriptor::new("flag", InputType::Checkbox),
        ];
        let initial = FormValueMap::from([
            ("a".to_string(), json!("initial")),
            ("b".to_string(), Value::Null),
            ("extra".to_string(), json!(7)),
        ]);
        let values = seed_values(&fields, &initial);
        assert_eq!(values["a"], json!("initial"));
        assert_eq!(values["b"], json!("keep"));
        assert_eq!(values["flag"], json!(false));
        assert_eq!(values["extra"], json!(7));
    }

    #[test]
    fn test_normalize_trims_and_nulls() {
        let values = FormValueMap::from([
            ("a".to_string(), json!("  hi ")),
            ("b".to_string(), json!("   ")),
            ("c".to_string(), json!(3)),
        ]);
        let out = normalize(&values);
        assert_eq!(out["a"], json!("hi"));
        assert_eq!(out["b"], Value::Null);
        assert_eq!(out["c"], json!(3));
    }

    #[test]
    fn test_errors_only_after_touch_or_submit() {
        let fields = car_fields();
        let mut session = FormSession::with_config(&fields, FormValueMap::new(), test_config()).unwrap();
        session.on_change("hasCar", FieldInput::Checked(Some(true))).unwrap();
        assert!(session.errors().is_empty());

        session.blur("carModel");
        assert_eq!(session.error("carModel"), Some("Car model is required"));

        session.on_change("carModel", FieldInput::Text("Civic".into())).unwrap();
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_hidden_field_errors_disappear() {
        let fields = car_fields();
        let mut session = FormSession::with_config(&fields, FormValueMap::new(), test_config()).unwrap();
        session.on_change("hasCar", FieldInput::Checked(Some(true))).unwrap();
        assert!(matches!(session.begin_submit(), SubmitAttempt::Invalid(_)));
        assert!(session.error("carModel").is_some());

        session.on_change("hasCar", FieldInput::Checked(Some(false))).unwrap();
        assert!(!session.is_visible("carModel"));
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_pending_gate() {
        let fields = vec![FieldDescriptor::new("note", InputType::Text)];
        let mut session = FormSession::with_config(&fields, FormValueMap::new(), test_config()).unwrap();
        let SubmitAttempt::Ready(ticket) = session.begin_submit() else {
            panic!("expected a ready submit");
        };
        assert!(session.is_submitting());
        assert_eq!(session.begin_submit(), SubmitAttempt::AlreadyPending);

        let err = session
            .finish_submit(&ticket, Err(anyhow::anyhow!("server said no")))
            .unwrap_err();
        assert_eq!(err, SubmitError::Collaborator("server said no".into()));
        assert!(!session.is_submitting());
        assert_eq!(session.submit_error(), Some("server said no"));
        assert!(session.is_open());
    }

    #[test]
    fn test_reset_does_not_cancel_inflight_submit() {
        let fields = vec![FieldDescriptor::new("note", InputType::Text)];
        let mut session = FormSession::with_config(&fields, FormValueMap::new(), test_config()).unwrap();
        let SubmitAttempt::Ready(first) = session.begin_submit() else {
            panic!("expected a ready submit");
        };

        session.reset();
        assert!(session.is_submitting());
        assert_eq!(session.begin_submit(), SubmitAttempt::AlreadyPending);
        session.close();
        session.open();
        assert_eq!(session.begin_submit(), SubmitAttempt::AlreadyPending);

        let err = session
            .finish_submit(&first, Err(anyhow::anyhow!("server down")))
            .unwrap_err();
        assert_eq!(err, SubmitError::Collaborator("server down".into()));
        assert_eq!(session.submit_error(), Some("server down"));
        assert!(matches!(session.begin_submit(), SubmitAttempt::Ready(_)));
    }

    #[test]
    fn test_failure_for_unknown_ticket_is_still_reported() {
        let fields = vec![FieldDescriptor::new("note", InputType::Text)];
        let mut session = FormSession::with_config(&fields, FormValueMap::new(), test_config()).unwrap();
        let SubmitAttempt::Ready(current) = session.begin_submit() else {
            panic!("expected a ready submit");
        };
        let other = SubmitTicket {
            id: current.id() + 10,
            payload: FormValueMap::new(),
        };

        assert_eq!(session.finish_submit(&other, Ok(())), Ok(()));
        assert!(session.is_submitting());

        let err = session
            .finish_submit(&other, Err(anyhow::anyhow!("timeout")))
            .unwrap_err();
        assert_eq!(err, SubmitError::Collaborator("timeout".into()));
        assert_eq!(session.submit_error(), Some("timeout"));
        assert!(session.is_submitting());

        session.finish_submit(&current, Ok(())).unwrap();
        assert!(!session.is_submitting());
    }

    #[test]
    fn test_only_touched_fields_are_checked_before_submit() {
        let fields = vec![
            FieldDescriptor::new("first", InputType::Text).with_label("First").required(),
            FieldDescriptor::new("last", InputType::Text).with_label("Last").required(),
        ];
        let mut session = FormSession::with_config(&fields, FormValueMap::new(), test_config()).unwrap();
        session.on_change("last", FieldInput::Text("".into())).unwrap();
        assert!(session.errors().is_empty());

        session.blur("first");
        assert_eq!(
            session.errors().keys().collect::<Vec<_>>(),
            vec!["first"]
        );

        assert!(matches!(session.begin_submit(), SubmitAttempt::Invalid(_)));
        assert_eq!(session.errors().len(), 2);

        session.reset();
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_set_fields_rebuilds_only_on_new_list() {
        let first = car_fields();
        let second = vec![FieldDescriptor::new("other", InputType::Number).with_default(json!(1))];
        let mut session = FormSession::with_config(&first, FormValueMap::new(), test_config()).unwrap();

        assert!(!session.set_fields(&first).unwrap());
        assert_eq!(session.schema_builds(), 1);

        assert!(session.set_fields(&second).unwrap());
        assert_eq!(session.schema_builds(), 2);
        assert_eq!(session.value("other"), Some(&json!(1)));
    }

    #[test]
    fn test_unknown_field_change() {
        let fields = car_fields();
        let mut session = FormSession::with_config(&fields, FormValueMap::new(), test_config()).unwrap();
        assert!(matches!(
            session.on_change("nope", FieldInput::Text("x".into())),
            Err(BindError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_close_and_reopen_discards_edits() {
        let fields = vec![FieldDescriptor::new("name", InputType::Text).with_default(json!("Ada"))];
        let mut session = FormSession::with_config(&fields, FormValueMap::new(), test_config()).unwrap();
        session.on_change("name", FieldInput::Text("Grace".into())).unwrap();
        session.close();
        assert!(!session.is_open());
        session.open();
        assert_eq!(session.value("name"), Some(&json!("Ada")));

        session.reopen(FormValueMap::from([("name".to_string(), json!("Linus"))]));
        assert_eq!(session.value("name"), Some(&json!("Linus")));
    }

    #[test]
    fn test_render_skips_hidden_fields() {
        let fields = car_fields();
        let session = FormSession::with_config(&fields, FormValueMap::new(), test_config()).unwrap();
        let rendered = session.render();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].name, "hasCar");
    }
}

//! # Form Session
//!
//! The add/edit "dialog" of the table, without the dialog. A [`FormSession`] holds
//! at most one in-flight [`Draft`], either for a new record or for an existing one.
//!
//! ## Lifecycle
//!
//! ```text
//!   begin_create() ──┐                       ┌── commit() ok ──▶ closed
//!                    ├──▶ open (draft) ──────┤
//!   begin_edit(r) ───┘        ▲              ├── commit() invalid ──┐
//!                             └──────────────┼──────────────────────┘
//!                                            └── cancel() ──▶ closed
//! ```
//!
//! A failed commit leaves the draft open so the caller can show the field errors
//! and let the user correct them. Beginning a new form replaces any open one.
//!
//! Drafts carry structured values (`NaiveDate`, `f64`). Converting raw user input
//! is the presentation layer's job; the `set_*_text` helpers cover the common case
//! and clear the field when the text does not parse, which validation then reports
//! as missing.

use crate::error::{DataTableError, Result};
use crate::model::{parse_date, Field, Record, RecordFields, RecordId};
use crate::store::RecordStore;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use tracing::debug;

const REQUIRED: &str = "is required";
const NOT_A_NUMBER: &str = "must be a number";
const NEGATIVE: &str = "must be greater than or equal to 0";

/// In-progress field values for a create or edit action.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Draft {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub value: Option<f64>,
}

impl Draft {
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            date: Some(record.date),
            value: Some(record.value),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
    }

    /// Returns false (and clears the date) when `text` is not `YYYY-MM-DD`.
    pub fn set_date_text(&mut self, text: &str) -> bool {
        self.date = parse_date(text);
        self.date.is_some()
    }

    pub fn set_value(&mut self, value: Option<f64>) {
        self.value = value;
    }

    /// Returns false (and clears the value) when `text` is not a number.
    pub fn set_value_text(&mut self, text: &str) -> bool {
        self.value = text.trim().parse::<f64>().ok();
        self.value.is_some()
    }

    /// Sets one field from raw text.
    pub fn set_text(&mut self, field: Field, text: &str) -> bool {
        match field {
            Field::Name => {
                self.set_name(text);
                true
            }
            Field::Date => self.set_date_text(text),
            Field::Value => self.set_value_text(text),
        }
    }

    pub fn validate(&self) -> std::result::Result<RecordFields, ValidationErrors> {
        validate(self)
    }
}

/// Checks presence, type and non-negativity. Every failing field is reported.
pub fn validate(draft: &Draft) -> std::result::Result<RecordFields, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if draft.name.trim().is_empty() {
        errors.push(Field::Name, REQUIRED);
    }
    if draft.date.is_none() {
        errors.push(Field::Date, REQUIRED);
    }
    match draft.value {
        None => errors.push(Field::Value, REQUIRED),
        Some(v) if !v.is_finite() => errors.push(Field::Value, NOT_A_NUMBER),
        Some(v) if v < 0.0 => errors.push(Field::Value, NEGATIVE),
        Some(_) => {}
    }

    match (draft.date, draft.value) {
        // -0 is stored as 0 so it shows and searches as "0".
        (Some(date), Some(value)) if errors.is_empty() => Ok(RecordFields::new_unchecked(
            draft.name.clone(),
            date,
            if value == 0.0 { 0.0 } else { value },
        )),
        _ => Err(errors),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Field-level errors that block a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: Field, message: &str) {
        self.errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |e| e.field == field)
    }

    pub fn has_error(&self, field: Field) -> bool {
        self.for_field(field).next().is_some()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Creating,
    Editing(RecordId),
}

/// What a successful commit did to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Committed {
    Created(Record),
    Updated(Record),
}

impl Committed {
    pub fn record(&self) -> &Record {
        match self {
            Committed::Created(r) | Committed::Updated(r) => r,
        }
    }
}

#[derive(Debug)]
struct OpenForm {
    mode: FormMode,
    draft: Draft,
}

#[derive(Debug, Default)]
pub struct FormSession {
    open: Option<OpenForm>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_create(&mut self) {
        debug!("form opened for a new record");
        self.open = Some(OpenForm {
            mode: FormMode::Creating,
            draft: Draft::default(),
        });
    }

    pub fn begin_edit(&mut self, record: &Record) {
        debug!(id = %record.id, "form opened for editing");
        self.open = Some(OpenForm {
            mode: FormMode::Editing(record.id),
            draft: Draft::from_record(record),
        });
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn mode(&self) -> Option<FormMode> {
        self.open.as_ref().map(|f| f.mode)
    }

    pub fn target(&self) -> Option<RecordId> {
        match self.mode()? {
            FormMode::Editing(id) => Some(id),
            FormMode::Creating => None,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.open.as_ref().map(|f| &f.draft)
    }

    pub fn draft_mut(&mut self) -> Result<&mut Draft> {
        self.open
            .as_mut()
            .map(|f| &mut f.draft)
            .ok_or(DataTableError::NoActiveForm)
    }

    pub fn validate(&self) -> Result<RecordFields> {
        let open = self.open.as_ref().ok_or(DataTableError::NoActiveForm)?;
        Ok(open.draft.validate()?)
    }

    /// Validates the draft and writes it to `store`: an update when editing,
    /// a create otherwise. The session closes only on success.
    pub fn commit<S: RecordStore + ?Sized>(&mut self, store: &mut S) -> Result<Committed> {
        let open = self.open.as_ref().ok_or(DataTableError::NoActiveForm)?;
        let fields = open.draft.validate()?;
        let committed = match open.mode {
            FormMode::Editing(id) => Committed::Updated(store.update(id, fields)?),
            FormMode::Creating => Committed::Created(store.create(fields)),
        };
        debug!(id = %committed.record().id, "form committed");
        self.open = None;
        Ok(committed)
    }

    /// Discards the draft. Returns whether a form was open.
    pub fn cancel(&mut self) -> bool {
        let was_open = self.open.take().is_some();
        if was_open {
            debug!("form cancelled");
        }
        was_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(name: &str, date: Option<NaiveDate>, value: Option<f64>) -> Draft {
        Draft {
            name: name.to_string(),
            date,
            value,
        }
    }

    #[test]
    fn test_empty_name_is_the_only_error() {
        let errors = draft("", Some(date(2024, 1, 1)), Some(3.0))
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has_error(Field::Name));
        assert_eq!(errors.to_string(), "name is required");
    }

    #[test]
    fn test_whitespace_name_is_required() {
        let errors = draft("   ", Some(date(2024, 1, 1)), Some(3.0))
            .validate()
            .unwrap_err();
        assert!(errors.has_error(Field::Name));
    }

    #[test]
    fn test_empty_draft_reports_every_field() {
        let errors = Draft::default().validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::Name, Field::Date, Field::Value]);
        assert!(errors.iter().all(|e| e.message == REQUIRED));
    }

    #[test]
    fn test_negative_value_is_rejected() {
        let errors = draft("Bob", Some(date(2024, 1, 1)), Some(-0.5))
            .validate()
            .unwrap_err();
        let messages: Vec<_> = errors.for_field(Field::Value).collect();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message, NEGATIVE);
    }

    #[test]
    fn test_non_finite_value_is_rejected() {
        let errors = draft("Bob", Some(date(2024, 1, 1)), Some(f64::NAN))
            .validate()
            .unwrap_err();
        assert_eq!(errors.for_field(Field::Value).next().unwrap().message, NOT_A_NUMBER);
    }

    #[test]
    fn test_zero_value_and_untrimmed_name_are_kept_verbatim() {
        let fields = draft(" Bob ", Some(date(2024, 1, 1)), Some(0.0))
            .validate()
            .unwrap();
        assert_eq!(fields.name(), " Bob ");
        assert_eq!(fields.value(), 0.0);
    }

    #[test]
    fn test_unparseable_text_clears_the_field() {
        let mut d = draft("Bob", Some(date(2024, 1, 1)), Some(1.0));
        assert!(!d.set_date_text("01/02/2024"));
        assert!(!d.set_value_text("lots"));
        let errors = d.validate().unwrap_err();
        assert!(errors.has_error(Field::Date));
        assert!(errors.has_error(Field::Value));
    }

    #[test]
    fn test_begin_edit_prefills_draft() {
        let mut store = InMemoryStore::new();
        let fields = RecordFields::new("Bob", date(2024, 1, 5), 10.0).unwrap();
        let record = store.create(fields);

        let mut session = FormSession::new();
        session.begin_edit(&record);
        assert_eq!(session.target(), Some(record.id));
        assert_eq!(session.draft(), Some(&Draft::from_record(&record)));
    }

    #[test]
    fn test_commit_without_target_creates_one_record() {
        let mut store = InMemoryStore::new();
        let mut session = FormSession::new();
        session.begin_create();
        assert_eq!(session.target(), None);
        {
            let d = session.draft_mut().unwrap();
            d.set_name("Amy");
            d.set_date(Some(date(2024, 2, 1)));
            d.set_value(Some(5.0));
        }

        let committed = session.commit(&mut store).unwrap();
        assert!(matches!(committed, Committed::Created(_)));
        assert_eq!(store.len(), 1);
        assert!(!session.is_open());
    }

    #[test]
    fn test_negative_zero_is_stored_as_zero() {
        let mut store = InMemoryStore::new();
        let mut session = FormSession::new();
        session.begin_create();
        {
            let d = session.draft_mut().unwrap();
            d.set_name("Zero");
            d.set_date(Some(date(2024, 2, 1)));
            assert!(d.set_value_text("-0"));
        }

        let record = session.commit(&mut store).unwrap().record().clone();
        assert_eq!(record.value_text(), "0");
        assert!(record.value.is_sign_positive());
        assert!(crate::query::view(&store.list(), "-", None).is_empty());
    }

    #[test]
    fn test_commit_with_target_never_creates() {
        let mut store = InMemoryStore::new();
        let record = store.create(RecordFields::new("Bob", date(2024, 1, 5), 10.0).unwrap());
        store.create(RecordFields::new("Amy", date(2024, 2, 1), 5.0).unwrap());

        let mut session = FormSession::new();
        session.begin_edit(&record);
        session.draft_mut().unwrap().set_name("Robert");
        let committed = session.commit(&mut store).unwrap();

        assert!(matches!(committed, Committed::Updated(_)));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(record.id).unwrap().name, "Robert");
    }

    #[test]
    fn test_failed_commit_keeps_the_draft_open() {
        let mut store = InMemoryStore::new();
        let mut session = FormSession::new();
        session.begin_create();
        session.draft_mut().unwrap().set_name("Amy");

        let err = session.commit(&mut store).unwrap_err();
        assert!(matches!(err, DataTableError::Validation(_)));
        assert!(session.is_open());
        assert_eq!(session.draft().unwrap().name, "Amy");
        assert!(store.is_empty());
    }

    #[test]
    fn test_commit_of_vanished_record_is_not_found() {
        let mut store = InMemoryStore::new();
        let record = store.create(RecordFields::new("Bob", date(2024, 1, 5), 10.0).unwrap());
        let mut session = FormSession::new();
        session.begin_edit(&record);
        store.delete(record.id).unwrap();

        let err = session.commit(&mut store).unwrap_err();
        assert!(matches!(err, DataTableError::NotFound(id) if id == record.id));
        assert!(session.is_open());
        assert!(store.is_empty());
    }

    #[test]
    fn test_cancel_discards_without_touching_store() {
        let mut store = InMemoryStore::new();
        let mut session = FormSession::new();
        session.begin_create();
        session.draft_mut().unwrap().set_name("Amy");

        assert!(session.cancel());
        assert!(!session.cancel());
        assert!(store.is_empty());
        assert!(matches!(
            session.commit(&mut store),
            Err(DataTableError::NoActiveForm)
        ));
    }
}

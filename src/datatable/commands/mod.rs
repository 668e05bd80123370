//! # Command Layer
//!
//! The **business logic** of the table. Each command lives in its own submodule and
//! is a plain function over a [`RecordStore`](crate::store::RecordStore) (and the
//! [`FormSession`](crate::form::FormSession) where a form is involved).
//!
//! Commands never print, never exit and never prompt. They return a [`CmdResult`]
//! carrying the records they touched, the page they listed and leveled messages;
//! the UI decides how to show them.
//!
//! ## Command Modules
//!
//! - [`create`]: Append a record from validated fields
//! - [`update`]: Replace the body of a record
//! - [`delete`]: Remove a record
//! - [`list`]: Filtered, sorted, paginated view
//! - [`form`]: Open, save and cancel the add/edit form
//!
//! Tests here use `InMemoryStore` fixtures and cover each branch.

use crate::model::Record;
use crate::query::PageView;
use serde::Serialize;

pub mod create;
pub mod delete;
pub mod form;
pub mod list;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<Record>,
    pub listed: Option<PageView>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed(mut self, page: PageView) -> Self {
        self.listed = Some(page);
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}

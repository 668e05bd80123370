//! # Storage Layer
//!
//! The [`RecordStore`] trait owns the ordered record collection. Commands, the form
//! session and the API facade only ever talk to the trait, so the backing
//! implementation can change without touching them.
//!
//! ## Contract
//!
//! - `create` assigns a fresh id (never reused, even after deletes) and appends.
//! - `update` replaces the whole body of a record in place. Its position does not move.
//! - `delete` removes a record. Deleting an absent id is [`DataTableError::NotFound`],
//!   so a second delete of the same id fails.
//! - `list` returns records in insertion order.
//!
//! Every mutation is synchronous and visible to the next `list`.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: the only backend. Records live for the lifetime
//!   of the process.
//!
//! [`DataTableError::NotFound`]: crate::error::DataTableError::NotFound

use crate::error::Result;
use crate::model::{Record, RecordFields, RecordId};

pub mod memory;

/// Abstract interface for record storage.
pub trait RecordStore {
    /// Append a new record built from already validated fields.
    fn create(&mut self, fields: RecordFields) -> Record;

    /// Get a record by id
    fn get(&self, id: RecordId) -> Result<Record>;

    /// Replace the body of an existing record
    fn update(&mut self, id: RecordId, fields: RecordFields) -> Result<Record>;

    /// Remove a record
    fn delete(&mut self, id: RecordId) -> Result<()>;

    /// All records in insertion order
    fn list(&self) -> Vec<Record>;

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

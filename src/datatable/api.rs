//! # API Facade
//!
//! [`DataTableApi`] is the single entry point for every table operation, whatever
//! UI sits on top of it. It is also the *controller*: besides the store it owns the
//! state a table widget would otherwise keep in the view layer.
//!
//! | State | Set by | Used by |
//! |-------|--------|---------|
//! | search text | [`set_search`](DataTableApi::set_search) | [`view`](DataTableApi::view) |
//! | sort spec | [`set_sort`](DataTableApi::set_sort), [`toggle_sort`](DataTableApi::toggle_sort) | [`view`](DataTableApi::view) |
//! | page size | [`DataTableApi::with_page_size`] | [`view`](DataTableApi::view) |
//! | form session | `begin_create`, `begin_edit`, `commit`, `cancel` | the add/edit form |
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the command functions in [`crate::commands`]
//! - **Holds** the session and view state between user actions
//! - **Returns structured types** (`CmdResult`, `PageView`), never strings
//!
//! Business logic stays in the command modules; rendering stays in the UI.
//!
//! ## Generic Over RecordStore
//!
//! `DataTableApi<S: RecordStore>` works with any backend. The binary and the tests
//! both use `InMemoryStore`.

use crate::commands::{self, list::ListQuery};
use crate::error::Result;
use crate::form::{Draft, FormMode, FormSession};
use crate::model::{Field, Record, RecordFields, RecordId};
use crate::query::{Page, PageView, SortDirection, SortSpec, DEFAULT_PAGE_SIZE};
use crate::store::RecordStore;
use tracing::debug;

/// The main API facade for table operations.
pub struct DataTableApi<S: RecordStore> {
    store: S,
    session: FormSession,
    search: String,
    sort: Option<SortSpec>,
    page_size: usize,
}

impl<S: RecordStore> DataTableApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            session: FormSession::new(),
            search: String::new(),
            sort: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    // --- Records ---

    pub fn create_record(&mut self, fields: RecordFields) -> commands::CmdResult {
        commands::create::run(&mut self.store, fields)
    }

    pub fn update_record(
        &mut self,
        id: RecordId,
        fields: RecordFields,
    ) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, id, fields)
    }

    pub fn delete_record(&mut self, id: RecordId) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn get_record(&self, id: RecordId) -> Result<Record> {
        self.store.get(id)
    }

    /// Every record in insertion order, ignoring search and sort.
    pub fn list_records(&self) -> Vec<Record> {
        self.store.list()
    }

    // --- View state ---

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        debug!(search = %self.search, "search changed");
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
        debug!(sort = ?self.sort, "sort changed");
    }

    /// Header-click semantics; returns the new sort.
    pub fn toggle_sort(&mut self, field: Field) -> Option<SortSpec> {
        self.set_sort(SortSpec::toggle(self.sort, field));
        self.sort
    }

    pub fn sort_by(&mut self, field: Field, direction: SortDirection) {
        self.set_sort(Some(SortSpec::new(field, direction)));
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The table as currently filtered and sorted, cut to page `number`.
    pub fn view(&self, number: usize) -> PageView {
        let query = ListQuery {
            search: self.search.clone(),
            sort: self.sort,
            page: Page::new(number, self.page_size),
        };
        commands::list::run(&self.store, &query)
            .listed
            .unwrap_or_else(|| crate::query::paginate(Vec::new(), query.page))
    }

    // --- Form ---

    pub fn begin_create(&mut self) -> commands::CmdResult {
        commands::form::begin_create(&mut self.session)
    }

    pub fn begin_edit(&mut self, id: RecordId) -> Result<commands::CmdResult> {
        commands::form::begin_edit(&self.store, &mut self.session, id)
    }

    pub fn form_mode(&self) -> Option<FormMode> {
        self.session.mode()
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.session.draft()
    }

    pub fn draft_mut(&mut self) -> Result<&mut Draft> {
        self.session.draft_mut()
    }

    pub fn validate(&self) -> Result<RecordFields> {
        self.session.validate()
    }

    pub fn commit(&mut self) -> Result<commands::CmdResult> {
        commands::form::save(&mut self.store, &mut self.session)
    }

    pub fn cancel(&mut self) -> commands::CmdResult {
        commands::form::cancel(&mut self.session)
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

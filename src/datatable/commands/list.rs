use crate::commands::CmdResult;
use crate::query::{paginate, view, Page, SortSpec};
use crate::store::RecordStore;

/// Everything the table needs to derive what it shows.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub search: String,
    pub sort: Option<SortSpec>,
    pub page: Page,
}

pub fn run<S: RecordStore>(store: &S, query: &ListQuery) -> CmdResult {
    let records = store.list();
    let rows = view(&records, &query.search, query.sort);
    CmdResult::default().with_listed(paginate(rows, query.page))
}

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::form::{Committed, FormSession};
use crate::model::RecordId;
use crate::store::RecordStore;

pub fn begin_create(session: &mut FormSession) -> CmdResult {
    let replaced = session.cancel();
    session.begin_create();
    let mut result = CmdResult::default();
    if replaced {
        result.add_message(CmdMessage::warning("Discarded the previously open form"));
    }
    result.with_message(CmdMessage::info("Adding a new record"))
}

pub fn begin_edit<S: RecordStore>(
    store: &S,
    session: &mut FormSession,
    id: RecordId,
) -> Result<CmdResult> {
    let record = store.get(id)?;
    let replaced = session.cancel();
    session.begin_edit(&record);

    let mut result = CmdResult::default();
    if replaced {
        result.add_message(CmdMessage::warning("Discarded the previously open form"));
    }
    let message = CmdMessage::info(format!("Editing record #{}: {}", record.id, record.name));
    Ok(result
        .with_affected_records(vec![record])
        .with_message(message))
}

/// Commits the open form. Validation errors come back as
/// [`DataTableError::Validation`](crate::error::DataTableError::Validation)
/// and leave the form open.
pub fn save<S: RecordStore>(store: &mut S, session: &mut FormSession) -> Result<CmdResult> {
    let committed = session.commit(store)?;
    let message = match &committed {
        Committed::Created(r) => format!("Record created (#{}): {}", r.id, r.name),
        Committed::Updated(r) => format!("Record updated (#{}): {}", r.id, r.name),
    };
    let record = committed.record().clone();
    Ok(CmdResult::default()
        .with_affected_records(vec![record])
        .with_message(CmdMessage::success(message)))
}

pub fn cancel(session: &mut FormSession) -> CmdResult {
    if session.cancel() {
        CmdResult::default().with_message(CmdMessage::info("Form cancelled"))
    } else {
        CmdResult::default().with_message(CmdMessage::warning("No form is open"))
    }
}

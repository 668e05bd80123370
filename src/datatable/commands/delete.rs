use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::RecordId;
use crate::store::RecordStore;

pub fn run<S: RecordStore>(store: &mut S, id: RecordId) -> Result<CmdResult> {
    let record = store.get(id)?;
    store.delete(id)?;
    let message = CmdMessage::success(format!("Record deleted (#{}): {}", record.id, record.name));
    Ok(CmdResult::default()
        .with_affected_records(vec![record])
        .with_message(message))
}

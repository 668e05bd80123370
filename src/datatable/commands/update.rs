use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{RecordFields, RecordId};
use crate::store::RecordStore;

pub fn run<S: RecordStore>(store: &mut S, id: RecordId, fields: RecordFields) -> Result<CmdResult> {
    let record = store.update(id, fields)?;
    let message = CmdMessage::success(format!("Record updated (#{}): {}", record.id, record.name));
    Ok(CmdResult::default()
        .with_affected_records(vec![record])
        .with_message(message))
}

use crate::commands::{CmdMessage, CmdResult};
use crate::model::RecordFields;
use crate::store::RecordStore;

pub fn run<S: RecordStore>(store: &mut S, fields: RecordFields) -> CmdResult {
    let record = store.create(fields);
    let message = CmdMessage::success(format!("Record created (#{}): {}", record.id, record.name));
    CmdResult::default()
        .with_affected_records(vec![record])
        .with_message(message)
}

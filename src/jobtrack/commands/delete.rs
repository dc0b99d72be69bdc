use super::helpers::attach_write_warning;
use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{KvBackend, RecordStore};
use uuid::Uuid;

/// Deletes the application. An id that matches nothing is reported, not failed.
pub fn run<B: KvBackend>(store: &mut RecordStore<B>, id: Uuid) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match store.remove(&id) {
        Some(record) => {
            result.add_message(CmdMessage::success(format!(
                "Application deleted: {} at {}",
                record.role, record.company
            )));
            result.affected_records.push(record);
        }
        None => {
            result.add_message(CmdMessage::info(format!(
                "No application with id {}; nothing deleted.",
                id
            )));
        }
    }

    attach_write_warning(store, &mut result);
    Ok(result)
}

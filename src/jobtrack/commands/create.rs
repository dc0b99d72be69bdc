use super::helpers::attach_write_warning;
use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ApplicationDraft;
use crate::store::{KvBackend, RecordStore};

pub fn run<B: KvBackend>(store: &mut RecordStore<B>, draft: ApplicationDraft) -> Result<CmdResult> {
    let record = store.add(draft)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Application added: {} at {}",
        record.role, record.company
    )));
    attach_write_warning(store, &mut result);
    Ok(result.with_affected_records(vec![record]))
}

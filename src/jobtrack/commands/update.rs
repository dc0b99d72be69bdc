use super::helpers::attach_write_warning;
use super::{CmdMessage, CmdResult, RecordPatch};
use crate::error::{JobtrackError, Result};
use crate::store::{KvBackend, RecordStore};
use uuid::Uuid;

/// Applies `patch` to the current state of the record and stores the result.
///
/// Fields absent from the patch keep their values. The interview date is
/// cleared whenever the resulting status is not Interviewing.
pub fn run<B: KvBackend>(
    store: &mut RecordStore<B>,
    id: Uuid,
    patch: RecordPatch,
) -> Result<CmdResult> {
    let mut record = store.get(&id).cloned().ok_or(JobtrackError::NotFound(id))?;

    let mut result = CmdResult::default();
    if patch.is_empty() {
        result.add_message(CmdMessage::info("Nothing to update."));
        return Ok(result.with_affected_records(vec![record]));
    }

    patch.apply_to(&mut record);
    let updated = store.update(record)?;

    result.add_message(CmdMessage::success(format!(
        "Application updated: {} at {}",
        updated.role, updated.company
    )));
    attach_write_warning(store, &mut result);
    Ok(result.with_affected_records(vec![updated]))
}

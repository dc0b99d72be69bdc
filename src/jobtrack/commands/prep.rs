//! Summary and interview-prep flows.
//!
//! Each flow is split in two so no store borrow is held across the await:
//! `begin_*` validates the record and claims the in-flight slot, the caller
//! awaits [`PrepService::generate`], and `finish_*` places the outcome.

use super::helpers::attach_write_warning;
use super::{CmdMessage, CmdResult};
use crate::error::{JobtrackError, Result};
use crate::prep::{
    prompts, GenerationOutcome, PendingPrep, PrepCompletion, PrepKind, PrepService,
    DISABLED_MESSAGE,
};
use crate::store::{KvBackend, RecordStore};
use tracing::debug;
use uuid::Uuid;

pub const EMPTY_DESCRIPTION_MESSAGE: &str = "Please paste a job description to summarize.";

pub fn begin_summary<B: KvBackend>(
    store: &RecordStore<B>,
    service: &PrepService,
    id: Uuid,
) -> Result<PendingPrep> {
    let record = store.get(&id).ok_or(JobtrackError::NotFound(id))?;
    let description = record
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| JobtrackError::validation(EMPTY_DESCRIPTION_MESSAGE))?;

    service.begin(id, PrepKind::Summary, prompts::summary_prompt(description))
}

pub fn begin_interview_prep<B: KvBackend>(
    store: &RecordStore<B>,
    service: &PrepService,
    id: Uuid,
) -> Result<PendingPrep> {
    let record = store.get(&id).ok_or(JobtrackError::NotFound(id))?;
    service.begin(
        id,
        PrepKind::InterviewPrep,
        prompts::interview_prep_prompt(&record.role, &record.company),
    )
}

/// Writes a generated summary into the notes of the record as it is now.
///
/// `None` means the request was dismissed; nothing changes. A record deleted
/// while the request was in flight drops the result.
pub fn finish_summary<B: KvBackend>(
    store: &mut RecordStore<B>,
    completion: Option<PrepCompletion>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(completion) = completion else {
        result.add_message(CmdMessage::info("Summary request dismissed."));
        return Ok(result);
    };

    match completion.outcome {
        GenerationOutcome::Generated(text) => {
            let Some(current) = store.get(&completion.record_id).cloned() else {
                debug!(record = %completion.record_id, "summary arrived for a removed application");
                result.add_message(CmdMessage::info(
                    "The application was removed; summary discarded.",
                ));
                return Ok(result);
            };

            let mut record = current;
            record.notes = Some(text);
            let updated = store.update(record)?;
            result.add_message(CmdMessage::success(format!(
                "Summary saved to notes for {} at {}",
                updated.role, updated.company
            )));
            attach_write_warning(store, &mut result);
            result.affected_records.push(updated);
        }
        GenerationOutcome::Failed(message) => result.add_message(CmdMessage::error(message)),
        GenerationOutcome::Disabled => result.add_message(CmdMessage::warning(DISABLED_MESSAGE)),
    }
    Ok(result)
}

/// Interview prep is shown, never stored.
pub fn finish_interview_prep(completion: Option<PrepCompletion>) -> CmdResult {
    let mut result = CmdResult::default();
    let Some(completion) = completion else {
        result.add_message(CmdMessage::info("Interview prep request dismissed."));
        return result;
    };

    match completion.outcome {
        GenerationOutcome::Generated(text) => result.with_generated(text),
        GenerationOutcome::Failed(message) => {
            result.add_message(CmdMessage::error(message));
            result
        }
        GenerationOutcome::Disabled => {
            result.add_message(CmdMessage::warning(DISABLED_MESSAGE));
            result
        }
    }
}

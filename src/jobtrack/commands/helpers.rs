use super::{CmdMessage, CmdResult};
use crate::error::{JobtrackError, Result};
use crate::model::ApplicationRecord;
use crate::store::{KvBackend, RecordStore};
use uuid::Uuid;

/// Shortest prefix accepted when resolving an id.
pub const MIN_PREFIX_LEN: usize = 4;

/// Resolves a full UUID or a unique, case-insensitive prefix of one. Hyphens
/// in a prefix are ignored.
pub fn resolve_id<B: KvBackend>(store: &RecordStore<B>, input: &str) -> Result<Uuid> {
    let needle = input.trim().to_ascii_lowercase();

    if let Ok(id) = Uuid::parse_str(&needle) {
        return store
            .get(&id)
            .map(|r| r.id)
            .ok_or(JobtrackError::NotFound(id));
    }

    let needle = needle.replace('-', "");
    if needle.len() < MIN_PREFIX_LEN {
        return Err(JobtrackError::Api(format!(
            "Id prefix '{}' is too short (use at least {} characters)",
            input.trim(),
            MIN_PREFIX_LEN
        )));
    }

    let mut matches = store
        .all()
        .iter()
        .filter(|r| r.id.simple().to_string().starts_with(&needle));

    match (matches.next(), matches.next()) {
        (Some(record), None) => Ok(record.id),
        (Some(_), Some(_)) => Err(JobtrackError::Api(format!(
            "Id prefix '{}' matches more than one application",
            input.trim()
        ))),
        (None, _) => Err(JobtrackError::Api(format!(
            "No application matches id '{}'",
            input.trim()
        ))),
    }
}

pub fn record_by_input<'a, B: KvBackend>(
    store: &'a RecordStore<B>,
    input: &str,
) -> Result<&'a ApplicationRecord> {
    let id = resolve_id(store, input)?;
    store.get(&id).ok_or(JobtrackError::NotFound(id))
}

/// Like [`record_by_input`], except a well-formed UUID that matches nothing
/// is `Ok(None)` rather than an error.
pub fn find_record<'a, B: KvBackend>(
    store: &'a RecordStore<B>,
    input: &str,
) -> Result<Option<&'a ApplicationRecord>> {
    match Uuid::parse_str(input.trim()) {
        Ok(id) => Ok(store.get(&id)),
        Err(_) => record_by_input(store, input).map(Some),
    }
}

/// Surfaces a failed write-through as a warning on the result.
pub fn attach_write_warning<B: KvBackend>(store: &mut RecordStore<B>, result: &mut CmdResult) {
    if let Some(err) = store.take_write_error() {
        result.add_message(CmdMessage::warning(format!(
            "Changes are kept for this session but could not be saved: {}",
            err
        )));
    }
}

/// First eight characters of the id, as shown in listings.
pub fn short_id(id: &Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

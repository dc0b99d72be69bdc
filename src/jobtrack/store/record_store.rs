use super::backend::KvBackend;
use super::persistence::Persistence;
use crate::error::{JobtrackError, Result};
use crate::model::{ApplicationDraft, ApplicationRecord, ThemePreference};
use chrono::{SubsecRound, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

/// The authoritative, in-memory collection of applications.
///
/// Records are kept newest-first. Every mutation writes the whole collection
/// through to the backend; a failed write is logged and remembered but never
/// rolls back the in-memory change.
pub struct RecordStore<B: KvBackend> {
    records: Vec<ApplicationRecord>,
    theme: ThemePreference,
    persistence: Persistence<B>,
    write_error: Option<String>,
}

impl<B: KvBackend> RecordStore<B> {
    /// Opens the store, loading records and theme from the backend.
    pub fn open(backend: B) -> Self {
        let persistence = Persistence::new(backend);
        let records = persistence.load_records();
        let theme = persistence.load_theme();
        Self {
            records,
            theme,
            persistence,
            write_error: None,
        }
    }

    pub fn backend(&self) -> &B {
        self.persistence.backend()
    }

    pub fn all(&self) -> &[ApplicationRecord] {
        &self.records
    }

    pub fn get(&self, id: &Uuid) -> Option<&ApplicationRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add(&mut self, draft: ApplicationDraft) -> Result<ApplicationRecord> {
        let id = Uuid::new_v4();
        if self.get(&id).is_some() {
            return Err(JobtrackError::IdCollision(id));
        }

        // Millisecond precision matches what survives a save/load cycle.
        let now = Utc::now().trunc_subsecs(3);
        let record = draft.into_record(id, now)?;

        self.records.insert(0, record.clone());
        debug!(id = %record.id, company = %record.company, "added application");
        self.write_through();
        Ok(record)
    }

    pub fn update(&mut self, mut record: ApplicationRecord) -> Result<ApplicationRecord> {
        let slot = self
            .records
            .iter()
            .position(|r| r.id == record.id)
            .ok_or(JobtrackError::NotFound(record.id))?;

        if record.company.trim().is_empty() || record.role.trim().is_empty() {
            return Err(JobtrackError::validation(
                crate::model::REQUIRED_FIELDS_MESSAGE,
            ));
        }
        record.company = record.company.trim().to_string();
        record.role = record.role.trim().to_string();

        record.date = self.records[slot].date;
        record.normalize();

        self.records[slot] = record.clone();
        debug!(id = %record.id, status = %record.status, "updated application");
        self.write_through();
        Ok(record)
    }

    /// Removes the record with `id`. Returns the removed record, or `None`
    /// when nothing matched (which is not an error).
    pub fn remove(&mut self, id: &Uuid) -> Option<ApplicationRecord> {
        let removed = self
            .records
            .iter()
            .position(|r| &r.id == id)
            .map(|slot| self.records.remove(slot));

        match &removed {
            Some(record) => debug!(id = %record.id, "removed application"),
            None => debug!(id = %id, "remove of unknown application ignored"),
        }
        self.write_through();
        removed
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    pub fn set_theme(&mut self, theme: ThemePreference) -> ThemePreference {
        self.theme = theme;
        if let Err(e) = self.persistence.save_theme(theme) {
            warn!(error = %e, "failed to persist theme");
            self.write_error = Some(e.to_string());
        }
        theme
    }

    pub fn toggle_theme(&mut self) -> ThemePreference {
        self.set_theme(self.theme.toggled())
    }

    /// Returns (and clears) the message of the last failed write, if any.
    pub fn take_write_error(&mut self) -> Option<String> {
        self.write_error.take()
    }

    fn write_through(&mut self) {
        if let Err(e) = self.persistence.save_records(&self.records) {
            warn!(error = %e, "failed to persist applications; keeping in-memory state");
            self.write_error = Some(e.to_string());
        }
    }
}

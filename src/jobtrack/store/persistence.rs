use super::backend::KvBackend;
use crate::error::{JobtrackError, Result};
use crate::model::{ApplicationRecord, ThemePreference};
use tracing::{debug, warn};

/// Key holding the JSON array of application records.
pub const RECORDS_KEY: &str = "jobApplications";
/// Key holding the bare theme name (`light` or `dark`).
pub const THEME_KEY: &str = "theme";

/// Loads and saves the record collection and the theme preference.
///
/// Reads never fail the caller: a missing or malformed value yields the
/// default (no records, light theme) and a warning in the log.
pub struct Persistence<B: KvBackend> {
    backend: B,
}

impl<B: KvBackend> Persistence<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn load_records(&self) -> Vec<ApplicationRecord> {
        let raw = match self.backend.read(RECORDS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read stored applications, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<ApplicationRecord>>(&raw) {
            Ok(mut records) => {
                for record in &mut records {
                    record.normalize();
                }
                debug!(count = records.len(), "loaded applications");
                records
            }
            Err(e) => {
                warn!(error = %e, "stored applications are malformed, starting empty");
                Vec::new()
            }
        }
    }

    pub fn save_records(&self, records: &[ApplicationRecord]) -> Result<()> {
        let content = serde_json::to_string_pretty(records).map_err(JobtrackError::Serialization)?;
        self.backend.write(RECORDS_KEY, &content)?;
        debug!(count = records.len(), "saved applications");
        Ok(())
    }

    pub fn load_theme(&self) -> ThemePreference {
        match self.backend.read(THEME_KEY) {
            Ok(Some(raw)) => raw.parse::<ThemePreference>().unwrap_or_else(|_| {
                warn!(value = %raw.trim(), "ignoring invalid stored theme");
                ThemePreference::default()
            }),
            Ok(None) => ThemePreference::default(),
            Err(e) => {
                warn!(error = %e, "could not read stored theme");
                ThemePreference::default()
            }
        }
    }

    pub fn save_theme(&self, theme: ThemePreference) -> Result<()> {
        self.backend.write(THEME_KEY, theme.as_str())
    }
}

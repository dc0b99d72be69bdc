//! # Command Layer
//!
//! The business logic of each user-facing operation, one submodule per
//! command. Commands take a [`RecordStore`](crate::store::RecordStore) and plain
//! Rust values and return a [`CmdResult`].
//!
//! Commands never print, prompt or exit. Confirmation before a delete, for
//! example, is the UI's job; `delete::run` just deletes.
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `affected_records`: records created or modified (post-operation state)
//! - `listed_records`: records to display, already filtered and sorted
//! - `theme` / `config`: for the `theme` and `config` commands
//! - `generated`: generated text to show (interview prep)
//! - `messages`: leveled messages (info, success, warning, error)
//!
//! ## Testing Strategy
//!
//! Command tests run against `MemBackend` and check `CmdResult` contents,
//! error branches included.
//!
//! ## Command Modules
//!
//! - [`create`]: Add an application
//! - [`update`]: Patch an application
//! - [`delete`]: Remove an application
//! - [`list`]: Filtered, sorted view
//! - [`view`]: One application in full
//! - [`theme`]: Show, set or toggle the theme
//! - [`config`]: Manage configuration
//! - [`prep`]: Summary and interview-prep request/placement
//! - [`helpers`]: Id resolution and shared bits

use crate::config::JobtrackConfig;
use crate::model::{ApplicationRecord, ThemePreference};
use std::path::PathBuf;

pub mod config;
pub mod create;
pub mod delete;
pub mod helpers;
pub mod list;
pub mod prep;
pub mod theme;
pub mod update;
pub mod view;

#[derive(Debug, Clone)]
pub struct JobtrackPaths {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<ApplicationRecord>,
    pub listed_records: Vec<ApplicationRecord>,
    pub theme: Option<ThemePreference>,
    pub config: Option<JobtrackConfig>,
    pub generated: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<ApplicationRecord>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<ApplicationRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_theme(mut self, theme: ThemePreference) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_config(mut self, config: JobtrackConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_generated(mut self, text: String) -> Self {
        self.generated = Some(text);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}

/// Field-level changes to an existing application. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub company: Option<String>,
    pub role: Option<String>,
    pub status: Option<crate::model::Status>,
    pub description: Option<String>,
    pub notes: Option<String>,
    /// `Some(None)` clears the interview date.
    pub interview_date: Option<Option<chrono::DateTime<chrono::Utc>>>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.role.is_none()
            && self.status.is_none()
            && self.description.is_none()
            && self.notes.is_none()
            && self.interview_date.is_none()
    }

    pub fn apply_to(&self, record: &mut ApplicationRecord) {
        if let Some(company) = &self.company {
            record.company = company.clone();
        }
        if let Some(role) = &self.role {
            record.role = role.clone();
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(description) = &self.description {
            record.description = Some(description.clone());
        }
        if let Some(notes) = &self.notes {
            record.notes = Some(notes.clone());
        }
        if let Some(date) = self.interview_date {
            record.interview_date = date;
        }
    }
}

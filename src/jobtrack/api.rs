//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! operation, whatever the UI.
//!
//! The facade dispatches to `commands/*`, turns user-supplied id strings into
//! UUIDs, and returns `Result<CmdResult>`. It does no printing and holds no
//! business logic.
//!
//! `JobtrackApi<B: KvBackend>` is generic over the storage backend:
//! `JobtrackApi<FsBackend>` in production, `JobtrackApi<MemBackend>` in tests.
//!
//! ## Prep requests
//!
//! Generation is the only async path. It runs in three steps so nothing
//! borrows the store while the request is in flight:
//!
//! ```text
//! let pending = api.begin_summary("3f2a")?;          // validate, claim slot
//! let done = api.prep_service().generate(pending).await;
//! let result = api.finish_summary(done)?;           // place into notes
//! ```
//!
//! [`JobtrackApi::summarize`] and [`JobtrackApi::interview_prep`] chain the
//! three for callers that simply wait.

use crate::commands;
use crate::error::Result;
use crate::model::{ApplicationDraft, ApplicationRecord};
use crate::prep::{PendingPrep, PrepCompletion, PrepService};
use crate::query::ViewCriteria;
use crate::store::{KvBackend, RecordStore};
use uuid::Uuid;

pub struct JobtrackApi<B: KvBackend> {
    store: RecordStore<B>,
    prep: PrepService,
    paths: commands::JobtrackPaths,
}

impl<B: KvBackend> JobtrackApi<B> {
    pub fn new(store: RecordStore<B>, prep: PrepService, paths: commands::JobtrackPaths) -> Self {
        Self { store, prep, paths }
    }

    pub fn add_application(&mut self, draft: ApplicationDraft) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, draft)
    }

    pub fn list_applications(&self, criteria: &ViewCriteria) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, criteria)
    }

    pub fn view_application(&self, id: &str) -> Result<commands::CmdResult> {
        commands::view::run(&self.store, id)
    }

    pub fn update_application(
        &mut self,
        id: &str,
        patch: RecordPatch,
    ) -> Result<commands::CmdResult> {
        let id = commands::helpers::resolve_id(&self.store, id)?;
        commands::update::run(&mut self.store, id, patch)
    }

    /// The record an id or prefix points at. A full UUID with no record is
    /// `Ok(None)`; prefixes that match nothing or several records are errors.
    pub fn find_application(&self, id: &str) -> Result<Option<&ApplicationRecord>> {
        commands::helpers::find_record(&self.store, id)
    }

    /// Deleting a full UUID that matches nothing is a no-op reported as info.
    pub fn delete_application(&mut self, id: &str) -> Result<commands::CmdResult> {
        let id = match Uuid::parse_str(id.trim()) {
            Ok(id) => id,
            Err(_) => commands::helpers::resolve_id(&self.store, id)?,
        };
        commands::delete::run(&mut self.store, id)
    }

    pub fn theme(&mut self, action: ThemeAction) -> Result<commands::CmdResult> {
        commands::theme::run(&mut self.store, action)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn begin_summary(&self, id: &str) -> Result<PendingPrep> {
        let id = commands::helpers::resolve_id(&self.store, id)?;
        commands::prep::begin_summary(&self.store, &self.prep, id)
    }

    pub fn begin_interview_prep(&self, id: &str) -> Result<PendingPrep> {
        let id = commands::helpers::resolve_id(&self.store, id)?;
        commands::prep::begin_interview_prep(&self.store, &self.prep, id)
    }

    pub fn finish_summary(
        &mut self,
        completion: Option<PrepCompletion>,
    ) -> Result<commands::CmdResult> {
        commands::prep::finish_summary(&mut self.store, completion)
    }

    pub fn finish_interview_prep(&self, completion: Option<PrepCompletion>) -> commands::CmdResult {
        commands::prep::finish_interview_prep(completion)
    }

    pub async fn summarize(&mut self, id: &str) -> Result<commands::CmdResult> {
        let pending = self.begin_summary(id)?;
        let service = self.prep.clone();
        let completion = service.generate(pending).await;
        self.finish_summary(completion)
    }

    pub async fn interview_prep(&self, id: &str) -> Result<commands::CmdResult> {
        let pending = self.begin_interview_prep(id)?;
        let completion = self.prep.generate(pending).await;
        Ok(self.finish_interview_prep(completion))
    }

    pub fn prep_service(&self) -> &PrepService {
        &self.prep
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    pub fn paths(&self) -> &commands::JobtrackPaths {
        &self.paths
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::theme::ThemeAction;
pub use commands::{CmdMessage, CmdResult, JobtrackPaths, MessageLevel, RecordPatch};

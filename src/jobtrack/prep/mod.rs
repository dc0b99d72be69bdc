//! # Prep-content generation
//!
//! The text generator is an external collaborator: it receives one prompt
//! string and answers with plain text / markdown, or fails. This module owns
//! everything on our side of that boundary:
//!
//! - [`prompts`]: how the two prompts are phrased.
//! - [`TextGenerator`]: the async seam; [`gemini::GeminiClient`] is the
//!   production implementation.
//! - [`tracker`]: one pending request per (record, kind), dismissal of
//!   abandoned requests.
//! - [`PrepService`]: ties them together and maps every failure to a
//!   displayable [`GenerationOutcome`]. Nothing here ever returns a generator
//!   error to the caller.
//!
//! When no generator is configured, every request resolves to
//! [`GenerationOutcome::Disabled`]. Record CRUD never depends on this module.

use crate::error::{JobtrackError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

pub mod gemini;
pub mod prompts;
pub mod tracker;

pub use tracker::{CancelHandle, PrepKind, PrepTicket, PrepTracker};

pub const DISABLED_MESSAGE: &str = "AI features are disabled. Please configure your API key.";

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("The model returned no text")]
    EmptyContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Generated(String),
    Failed(String),
    Disabled,
}

impl GenerationOutcome {
    pub fn from_result(result: std::result::Result<String, GeneratorError>) -> Self {
        match result {
            Ok(text) if text.trim().is_empty() => {
                GenerationOutcome::Failed(failure_message(&GeneratorError::EmptyContent))
            }
            Ok(text) => GenerationOutcome::Generated(text),
            Err(e) => GenerationOutcome::Failed(failure_message(&e)),
        }
    }

    /// The text to show in place of generated content.
    pub fn display_text(&self) -> &str {
        match self {
            GenerationOutcome::Generated(text) | GenerationOutcome::Failed(text) => text,
            GenerationOutcome::Disabled => DISABLED_MESSAGE,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, GenerationOutcome::Generated(_))
    }
}

fn failure_message(err: &GeneratorError) -> String {
    format!("An error occurred while contacting the AI: {}", err)
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> std::result::Result<String, GeneratorError>;

    fn model_name(&self) -> &str;
}

/// A request that has claimed its in-flight slot and carries its prompt.
#[derive(Debug)]
pub struct PendingPrep {
    pub ticket: PrepTicket,
    pub prompt: String,
}

impl PendingPrep {
    pub fn record_id(&self) -> Uuid {
        self.ticket.record_id()
    }

    pub fn kind(&self) -> PrepKind {
        self.ticket.kind()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.ticket.cancel_handle()
    }
}

/// The outcome of a request whose caller is still interested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepCompletion {
    pub record_id: Uuid,
    pub kind: PrepKind,
    pub outcome: GenerationOutcome,
}

#[derive(Clone)]
pub struct PrepService {
    generator: Option<Arc<dyn TextGenerator>>,
    tracker: PrepTracker,
}

impl PrepService {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            generator,
            tracker: PrepTracker::new(),
        }
    }

    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    pub fn tracker(&self) -> &PrepTracker {
        &self.tracker
    }

    pub fn begin(&self, record_id: Uuid, kind: PrepKind, prompt: String) -> Result<PendingPrep> {
        let ticket = self.tracker.begin(record_id, kind).ok_or_else(|| {
            JobtrackError::Api(format!(
                "A {} request for this application is already in progress",
                kind_label(kind)
            ))
        })?;
        Ok(PendingPrep { ticket, prompt })
    }

    /// Runs the request. Returns `None` when the caller dismissed it while it
    /// was in flight.
    pub async fn generate(&self, pending: PendingPrep) -> Option<PrepCompletion> {
        let PendingPrep { ticket, prompt } = pending;
        let record_id = ticket.record_id();
        let kind = ticket.kind();

        let outcome = match &self.generator {
            None => GenerationOutcome::Disabled,
            Some(generator) => {
                debug!(record = %record_id, ?kind, model = generator.model_name(), "requesting generated content");
                let outcome = GenerationOutcome::from_result(generator.complete(&prompt).await);
                if let GenerationOutcome::Failed(message) = &outcome {
                    warn!(record = %record_id, ?kind, %message, "generation failed");
                }
                outcome
            }
        };

        ticket.resolve(outcome).map(|outcome| PrepCompletion {
            record_id,
            kind,
            outcome,
        })
    }
}

pub fn kind_label(kind: PrepKind) -> &'static str {
    match kind {
        PrepKind::Summary => "summary",
        PrepKind::InterviewPrep => "interview prep",
    }
}

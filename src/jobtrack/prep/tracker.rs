//! In-flight bookkeeping for generation requests.
//!
//! At most one request per (record, kind) may be pending. Each accepted request
//! gets a [`PrepTicket`]; the UI keeps the ticket's [`CancelHandle`] and calls
//! [`CancelHandle::dismiss`] when the user closes the view that was waiting.
//! The underlying request is not aborted, but its late result is dropped by
//! [`PrepTicket::resolve`]. The pending slot is released when the ticket drops.

use super::GenerationOutcome;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrepKind {
    Summary,
    InterviewPrep,
}

type Slot = (Uuid, PrepKind);

#[derive(Debug, Clone, Default)]
pub struct PrepTracker {
    pending: Arc<Mutex<HashSet<Slot>>>,
}

impl PrepTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot for `(record_id, kind)`. Returns `None` while another
    /// request for the same slot is still pending.
    pub fn begin(&self, record_id: Uuid, kind: PrepKind) -> Option<PrepTicket> {
        if !self.lock().insert((record_id, kind)) {
            return None;
        }
        Some(PrepTicket {
            record_id,
            kind,
            cancelled: Arc::new(AtomicBool::new(false)),
            tracker: self.clone(),
        })
    }

    pub fn is_pending(&self, record_id: Uuid, kind: PrepKind) -> bool {
        self.lock().contains(&(record_id, kind))
    }

    pub fn pending_count(&self) -> usize {
        self.lock().len()
    }

    fn release(&self, slot: Slot) {
        self.lock().remove(&slot);
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<Slot>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug)]
pub struct PrepTicket {
    record_id: Uuid,
    kind: PrepKind,
    cancelled: Arc<AtomicBool>,
    tracker: PrepTracker,
}

impl PrepTicket {
    pub fn record_id(&self) -> Uuid {
        self.record_id
    }

    pub fn kind(&self) -> PrepKind {
        self.kind
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    pub fn is_dismissed(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Hands back the outcome unless interest was abandoned in the meantime.
    pub fn resolve(self, outcome: GenerationOutcome) -> Option<GenerationOutcome> {
        if self.is_dismissed() {
            tracing::debug!(record = %self.record_id, kind = ?self.kind, "discarding result of dismissed request");
            None
        } else {
            Some(outcome)
        }
    }
}

impl Drop for PrepTicket {
    fn drop(&mut self) {
        self.tracker.release((self.record_id, self.kind));
    }
}

#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn dismiss(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_dismissed(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

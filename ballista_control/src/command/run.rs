//! Scoped runs: start/stop pairs whose stop is guaranteed.
//!
//! A controller keeps one [`RunSlot`] and hands out a [`RunHandle`] per
//! started run. The slot returns the run kind whenever a run ends, and the
//! controller issues the matching stop action. A run ends exactly once, by
//! whichever comes first:
//!
//! - `finish` / `interrupt` on the controller with the handle
//! - supersession: a new run started on the same slot
//! - the handle being dropped, detected by [`RunSlot::reap`] on the next tick
//!
//! The handle and slot share a small atomic link so that dropping a handle
//! never needs access to the controller.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::debug;

const LINK_ACTIVE: u8 = 0;
const LINK_DROPPED: u8 = 1;
const LINK_ENDED: u8 = 2;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    /// Ended by its owner.
    Finished,
    /// Cancelled, superseded, or abandoned.
    Interrupted,
}

/// Token for an active scoped run.
///
/// Dropping the handle ends the run at the owning controller's next
/// `periodic()`.
#[must_use = "dropping a RunHandle ends the run on the next tick"]
#[derive(Debug)]
pub struct RunHandle {
    id: u64,
    link: Arc<AtomicU8>,
}

impl RunHandle {
    /// Run identifier, unique per slot.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The run has not ended yet.
    pub fn is_active(&self) -> bool {
        self.link.load(Ordering::Acquire) == LINK_ACTIVE
    }
}

impl Drop for RunHandle {
    fn drop(&mut self) {
        // Only an active run becomes dropped; an ended run stays ended.
        let _ = self.link.compare_exchange(
            LINK_ACTIVE,
            LINK_DROPPED,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }
}

#[derive(Debug)]
struct ActiveRun<K> {
    id: u64,
    kind: K,
    link: Arc<AtomicU8>,
}

/// Single-occupancy run slot.
///
/// `K` describes the run well enough for the owner to pick its stop action.
#[derive(Debug)]
pub struct RunSlot<K> {
    active: Option<ActiveRun<K>>,
    next_id: u64,
}

impl<K> Default for RunSlot<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> RunSlot<K> {
    /// Empty slot.
    pub const fn new() -> Self {
        Self {
            active: None,
            next_id: 1,
        }
    }

    /// Occupy the slot with a new run.
    ///
    /// Returns the handle and, if a run was active, that run's kind. The
    /// caller must stop the superseded run before starting the new one.
    pub fn start(&mut self, kind: K) -> (RunHandle, Option<K>) {
        let superseded = self.take(RunEnd::Interrupted);

        let id = self.next_id;
        self.next_id += 1;
        let link = Arc::new(AtomicU8::new(LINK_ACTIVE));
        self.active = Some(ActiveRun {
            id,
            kind,
            link: link.clone(),
        });
        debug!(run = id, "Run started");

        (RunHandle { id, link }, superseded)
    }

    /// End the run `handle` refers to.
    ///
    /// Returns its kind if it was still the active run, `None` if it had
    /// already ended.
    pub fn end(&mut self, handle: &RunHandle, reason: RunEnd) -> Option<K> {
        if !self.is_current(handle) {
            return None;
        }
        self.take(reason)
    }

    /// End the active run if its handle has been dropped.
    pub fn reap(&mut self) -> Option<K> {
        let dropped = self
            .active
            .as_ref()
            .is_some_and(|run| run.link.load(Ordering::Acquire) == LINK_DROPPED);
        if dropped {
            self.take(RunEnd::Interrupted)
        } else {
            None
        }
    }

    /// Mutable access to the kind of the run `handle` refers to, if active.
    pub fn kind_mut(&mut self, handle: &RunHandle) -> Option<&mut K> {
        if !self.is_current(handle) {
            return None;
        }
        self.active.as_mut().map(|run| &mut run.kind)
    }

    /// Kind of the active run, if any.
    pub fn active(&self) -> Option<&K> {
        self.active.as_ref().map(|run| &run.kind)
    }

    /// End whatever run is active.
    pub fn clear(&mut self) -> Option<K> {
        self.take(RunEnd::Interrupted)
    }

    fn is_current(&self, handle: &RunHandle) -> bool {
        self.active
            .as_ref()
            .is_some_and(|run| run.id == handle.id && Arc::ptr_eq(&run.link, &handle.link))
    }

    fn take(&mut self, reason: RunEnd) -> Option<K> {
        let run = self.active.take()?;
        run.link.store(LINK_ENDED, Ordering::Release);
        debug!(run = run.id, reason = ?reason, "Run ended");
        Some(run.kind)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

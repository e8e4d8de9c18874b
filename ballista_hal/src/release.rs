//! Timed ball-release cycle.
//!
//! A release drives the release actuator at [`RELEASE_OUTPUT`] for
//! [`RELEASE_TIME`] and then stops it. At most one cycle is active; requests
//! while active are ignored and do not move the deadline. Expiry is only
//! detected by [`ReleaseCycle::poll`], which backends call from `refresh()`,
//! so a late tick delays the cutoff by exactly that lateness.

use ballista_common::consts::{RELEASE_OUTPUT, RELEASE_TIME};
use std::time::Duration;
use tracing::debug;

/// Release state owned by a shooter IO backend.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReleaseCycle {
    /// Release cycle in progress.
    active: bool,
    /// Clock timestamp of the activating request.
    started_at: Duration,
}

impl ReleaseCycle {
    /// Create an inactive cycle.
    pub const fn new() -> Self {
        Self {
            active: false,
            started_at: Duration::ZERO,
        }
    }

    /// Start a cycle at `now` unless one is active.
    ///
    /// Returns `true` if this call started the cycle; the caller must then
    /// drive the actuator to [`ReleaseCycle::output`].
    pub fn request(&mut self, now: Duration) -> bool {
        if self.active {
            debug!("Release already active, request ignored");
            return false;
        }
        self.active = true;
        self.started_at = now;
        debug!(started_at = ?now, "Release cycle started");
        true
    }

    /// Terminate the cycle if `RELEASE_TIME` has elapsed since activation.
    ///
    /// Returns `true` on the call that ends the cycle; the caller must then
    /// drive the actuator to 0.
    pub fn poll(&mut self, now: Duration) -> bool {
        if !self.active || now.saturating_sub(self.started_at) < RELEASE_TIME {
            return false;
        }
        self.active = false;
        debug!(elapsed = ?now.saturating_sub(self.started_at), "Release cycle ended");
        true
    }

    /// Release cycle in progress.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Timestamp of the activating request (meaningful only while active).
    #[inline]
    pub fn started_at(&self) -> Duration {
        self.started_at
    }

    /// Actuator duty for the current state.
    #[inline]
    pub fn output(&self) -> f64 {
        if self.active { RELEASE_OUTPUT } else { 0.0 }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

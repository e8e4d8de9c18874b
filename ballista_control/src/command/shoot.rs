//! Wait-then-release task.

use crate::subsystems::Shooter;
use tracing::debug;

/// Progress of a [`ShootWhenAtSpeed`] task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShootState {
    /// Polling for the at-speed predicate.
    Waiting,
    /// Release requested; the task is done.
    Triggered,
}

/// Releases a ball on the first poll that finds the flywheel at speed.
///
/// Poll once per tick. Once cancelled, no later poll can fire the release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShootWhenAtSpeed {
    state: ShootState,
    cancelled: bool,
}

impl Default for ShootWhenAtSpeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ShootWhenAtSpeed {
    /// Task in the waiting state.
    pub const fn new() -> Self {
        Self {
            state: ShootState::Waiting,
            cancelled: false,
        }
    }

    /// Check the predicate and fire the release if it holds.
    pub fn poll(&mut self, shooter: &mut Shooter) -> ShootState {
        if self.cancelled || self.state == ShootState::Triggered {
            return self.state;
        }
        if shooter.is_at_target_speed() {
            debug!("Shooter at speed, releasing");
            shooter.release_ball();
            self.state = ShootState::Triggered;
        }
        self.state
    }

    /// Stop waiting. Has no effect after the release fired.
    pub fn cancel(&mut self) {
        if self.state == ShootState::Waiting && !self.cancelled {
            debug!("Shoot-when-at-speed cancelled");
            self.cancelled = true;
        }
    }

    /// Current state.
    pub fn state(&self) -> ShootState {
        self.state
    }

    /// Cancelled before firing.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Triggered or cancelled; further polls do nothing.
    pub fn is_finished(&self) -> bool {
        self.cancelled || self.state == ShootState::Triggered
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

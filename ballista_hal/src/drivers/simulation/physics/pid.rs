//! PID with backward Euler integration.
//!
//! Zero `ki` disables the integral; zero `kd` disables the derivative. The
//! output is unsaturated; callers clamp it with the feedforward added.

use ballista_common::hal::config::VelocityGains;

/// Internal state of the PID loop.
///
/// Must be reset when the loop is re-armed after open-loop driving.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PidState {
    /// Integral accumulator.
    integral: f64,
    /// Previous error (for derivative).
    prev_error: f64,
    /// No sample taken since reset.
    fresh: bool,
}

impl PidState {
    /// State with no history.
    pub fn new() -> Self {
        Self {
            fresh: true,
            ..Self::default()
        }
    }

    /// Reset all internal state.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Compute one PID step for `error` (target − measured) over `dt` seconds.
///
/// Feedforward (`kff`) is not applied here.
#[inline]
pub fn pid_compute(state: &mut PidState, gains: &VelocityGains, error: f64, dt: f64) -> f64 {
    if dt <= 0.0 {
        return 0.0;
    }

    let p_term = gains.kp * error;

    let i_term = if gains.ki != 0.0 {
        state.integral += gains.ki * error * dt;
        state.integral
    } else {
        state.integral = 0.0;
        0.0
    };

    // No derivative kick on the first sample after a reset.
    let d_term = if gains.kd != 0.0 && !state.fresh {
        gains.kd * (error - state.prev_error) / dt
    } else {
        0.0
    };

    state.prev_error = error;
    state.fresh = false;

    p_term + i_term + d_term
}

// ─── Tests ──────────────────────────────────────────────────────────

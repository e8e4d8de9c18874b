//! First-order motor model.
//!
//! Speed follows `ω' = (k_v·V − ω) / τ`. The step uses the exact solution
//! for a voltage held constant over the step, so it is stable for any dt.

use std::time::Duration;

/// DC motor driving a pure inertia.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstOrderMotor {
    /// Steady-state speed per volt [rad/s/V]
    kv: f64,
    /// Mechanical time constant [s]
    time_constant: f64,
    /// Winding resistance [Ω]
    resistance: f64,
    /// Rotor position [rad]
    position: f64,
    /// Rotor velocity [rad/s]
    velocity: f64,
    /// Voltage applied over the last step [V]
    applied_volts: f64,
}

impl FirstOrderMotor {
    /// Motor at rest.
    pub fn new(kv: f64, time_constant: f64, resistance: f64) -> Self {
        Self {
            kv,
            time_constant,
            resistance,
            position: 0.0,
            velocity: 0.0,
            applied_volts: 0.0,
        }
    }

    /// Hold `volts` for `dt` and advance the state.
    pub fn step(&mut self, volts: f64, dt: Duration) {
        self.applied_volts = volts;
        let dt_s = dt.as_secs_f64();
        if dt_s <= 0.0 {
            return;
        }

        let steady = self.kv * volts;
        let offset = self.velocity - steady;
        let decay = (-dt_s / self.time_constant).exp();

        // Closed-form integral of the velocity over the step.
        self.position += steady * dt_s + offset * self.time_constant * (1.0 - decay);
        self.velocity = steady + offset * decay;
    }

    /// Rotor position [rad]
    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Rotor velocity [rad/s]
    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Voltage applied over the last step [V]
    #[inline]
    pub fn applied_volts(&self) -> f64 {
        self.applied_volts
    }

    /// Winding current magnitude [A] from the back-EMF deficit.
    pub fn current(&self) -> f64 {
        (self.applied_volts - self.velocity / self.kv).abs() / self.resistance
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

//! Simulated two-sided drivetrain.

use super::physics::FirstOrderMotor;
use crate::clock::Clock;
use ballista_common::consts::{MOTORS_PER_SIDE, NOMINAL_VOLTAGE};
use ballista_common::hal::config::SimConfig;
use ballista_common::hal::io::DriveIo;
use ballista_common::hal::types::DriveTelemetry;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// Drive IO backed by one first-order model per side.
pub struct SimDriveIo {
    left: FirstOrderMotor,
    right: FirstOrderMotor,
    /// Commanded voltages, held until the next command [V]
    left_volts: f64,
    right_volts: f64,
    clock: Arc<dyn Clock>,
    last_refresh: Option<Duration>,
}

impl SimDriveIo {
    /// Drivetrain at rest.
    pub fn new(config: &SimConfig, clock: Arc<dyn Clock>) -> Self {
        let side = FirstOrderMotor::new(
            config.drive_kv,
            config.drive_time_constant_s,
            config.drive_resistance_ohm,
        );
        Self {
            left: side,
            right: side,
            left_volts: 0.0,
            right_volts: 0.0,
            clock,
            last_refresh: None,
        }
    }

    /// Left side wheel velocity [rad/s]
    pub fn left_velocity(&self) -> f64 {
        self.left.velocity()
    }

    /// Right side wheel velocity [rad/s]
    pub fn right_velocity(&self) -> f64 {
        self.right.velocity()
    }
}

impl DriveIo for SimDriveIo {
    fn name(&self) -> &'static str {
        "simulation"
    }

    fn refresh(&mut self, telemetry: &mut DriveTelemetry) {
        let now = self.clock.now();
        let dt = self
            .last_refresh
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_refresh = Some(now);

        self.left.step(self.left_volts, dt);
        self.right.step(self.right_volts, dt);
        trace!(dt = ?dt, left = self.left.velocity(), right = self.right.velocity(), "Drive step");

        // Leader and follower share the side current.
        let per_motor = |side: &FirstOrderMotor| side.current() / MOTORS_PER_SIDE as f64;
        telemetry.left_applied_volts = self.left.applied_volts();
        telemetry.left_current_amps = [per_motor(&self.left); MOTORS_PER_SIDE];
        telemetry.right_applied_volts = self.right.applied_volts();
        telemetry.right_current_amps = [per_motor(&self.right); MOTORS_PER_SIDE];
    }

    fn set_voltage(&mut self, left_volts: f64, right_volts: f64) {
        // Duty saturates at the compensation reference.
        self.left_volts = left_volts.clamp(-NOMINAL_VOLTAGE, NOMINAL_VOLTAGE);
        self.right_volts = right_volts.clamp(-NOMINAL_VOLTAGE, NOMINAL_VOLTAGE);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

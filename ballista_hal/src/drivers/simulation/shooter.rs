//! Simulated flywheel shooter.

use super::physics::{FirstOrderMotor, PidState, pid_compute};
use crate::clock::Clock;
use crate::release::ReleaseCycle;
use ballista_common::consts::NOMINAL_VOLTAGE;
use ballista_common::hal::config::{SimConfig, VelocityGains};
use ballista_common::hal::io::ShooterIo;
use ballista_common::hal::types::ShooterTelemetry;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Flywheel command held between refreshes.
#[derive(Debug, Clone, Copy, PartialEq)]
enum FlywheelControl {
    /// Open loop [V]
    Voltage(f64),
    /// Closed loop toward a target [rad/s]
    Velocity(f64),
}

/// Shooter IO backed by a first-order flywheel model.
///
/// Closed-loop velocity runs PID plus `kff·target` feedforward, evaluated
/// once per refresh from the previous measured velocity and clamped to the
/// nominal supply.
pub struct SimShooterIo {
    flywheel: FirstOrderMotor,
    control: FlywheelControl,
    pid: PidState,
    gains: VelocityGains,
    release_cycle: ReleaseCycle,
    clock: Arc<dyn Clock>,
    last_refresh: Option<Duration>,
}

impl SimShooterIo {
    /// Flywheel at rest, release idle.
    pub fn new(sim: &SimConfig, gains: VelocityGains, clock: Arc<dyn Clock>) -> Self {
        Self {
            flywheel: FirstOrderMotor::new(
                sim.flywheel_kv,
                sim.flywheel_time_constant_s,
                sim.flywheel_resistance_ohm,
            ),
            control: FlywheelControl::Voltage(0.0),
            pid: PidState::new(),
            gains,
            release_cycle: ReleaseCycle::new(),
            clock,
            last_refresh: None,
        }
    }

    fn target_velocity(&self) -> f64 {
        match self.control {
            FlywheelControl::Voltage(_) => 0.0,
            FlywheelControl::Velocity(target) => target,
        }
    }
}

impl ShooterIo for SimShooterIo {
    fn name(&self) -> &'static str {
        "simulation"
    }

    fn refresh(&mut self, telemetry: &mut ShooterTelemetry) {
        let now = self.clock.now();
        let dt = self
            .last_refresh
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_refresh = Some(now);

        let volts = match self.control {
            FlywheelControl::Voltage(volts) => volts,
            FlywheelControl::Velocity(target) => {
                let error = target - self.flywheel.velocity();
                let feedback = pid_compute(&mut self.pid, &self.gains, error, dt.as_secs_f64());
                feedback + self.gains.kff * target
            }
        };
        self.flywheel
            .step(volts.clamp(-NOMINAL_VOLTAGE, NOMINAL_VOLTAGE), dt);
        trace!(dt = ?dt, velocity = self.flywheel.velocity(), "Flywheel step");

        if self.release_cycle.poll(now) {
            debug!("Simulated release motor stopped");
        }

        telemetry.position_rad = self.flywheel.position();
        telemetry.velocity_rad_per_sec = self.flywheel.velocity();
        telemetry.applied_volts = self.flywheel.applied_volts();
        telemetry.current_amps = self.flywheel.current();
        telemetry.target_velocity = self.target_velocity();
        telemetry.release_active = self.release_cycle.is_active();
        telemetry.release_output = self.release_cycle.output();
    }

    fn set_voltage(&mut self, volts: f64) {
        self.control = FlywheelControl::Voltage(volts);
    }

    fn set_velocity(&mut self, target: f64) {
        if !matches!(self.control, FlywheelControl::Velocity(_)) {
            self.pid.reset();
        }
        self.control = FlywheelControl::Velocity(target);
    }

    fn request_release(&mut self) {
        self.release_cycle.request(self.clock.now());
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

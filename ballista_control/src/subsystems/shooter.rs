//! Shooter controller.
//!
//! The shooter state is spread over two places: the active scoped run (held
//! here in a [`RunSlot`]) and the release cycle (held by the IO).
//!
//! | State            | Entered by                 | Left by                      |
//! |------------------|----------------------------|------------------------------|
//! | Idle             | start, any run ending      | `run_percent`/`run_velocity` |
//! | Open-loop        | `run_percent`              | run end → `set_voltage(0)`   |
//! | Velocity-seeking | `run_velocity`             | run end → `set_velocity(0)`  |
//! | Releasing        | `release_ball`             | `RELEASE_TIME` in IO refresh |
//!
//! Releasing is orthogonal to the other three.

use crate::command::run::{RunEnd, RunHandle, RunSlot};
use crate::command::shoot::ShootWhenAtSpeed;
use ballista_common::consts::{NOMINAL_VOLTAGE, SHOOTER_SPEED_TOLERANCE};
use ballista_common::hal::io::ShooterIo;
use ballista_common::hal::types::ShooterTelemetry;
use tracing::{debug, trace};

/// Kind of scoped shooter run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShooterRun {
    /// Open loop at a fraction of nominal voltage.
    Percent(f64),
    /// Closed loop toward a target [rad/s].
    Velocity(f64),
}

/// Flywheel shooter controller.
pub struct Shooter {
    io: Box<dyn ShooterIo>,
    telemetry: ShooterTelemetry,
    runs: RunSlot<ShooterRun>,
}

impl Shooter {
    /// Take ownership of `io` for the controller's lifetime.
    pub fn new(io: Box<dyn ShooterIo>) -> Self {
        Self {
            io,
            telemetry: ShooterTelemetry::default(),
            runs: RunSlot::new(),
        }
    }

    /// Reap a run whose handle was dropped, then pull telemetry.
    ///
    /// The IO refresh also ends an expired release cycle.
    pub fn periodic(&mut self) {
        if let Some(run) = self.runs.reap() {
            debug!(?run, "Reaped abandoned shooter run");
            self.stop_run(run);
        }
        self.io.refresh(&mut self.telemetry);
    }

    /// Latest telemetry snapshot.
    pub fn telemetry(&self) -> &ShooterTelemetry {
        &self.telemetry
    }

    /// Drive the flywheel open loop at `12·percent` volts until the run ends.
    ///
    /// `percent` is expected in [-1, 1] and not checked.
    pub fn run_percent(&mut self, percent: f64) -> RunHandle {
        let handle = self.begin(ShooterRun::Percent(percent));
        self.io.set_voltage(NOMINAL_VOLTAGE * percent);
        handle
    }

    /// Seek `target` rad/s in closed loop until the run ends.
    pub fn run_velocity(&mut self, target: f64) -> RunHandle {
        let handle = self.begin(ShooterRun::Velocity(target));
        self.io.set_velocity(target);
        handle
    }

    /// Change the output of an active percent run.
    ///
    /// Returns `false` (and does nothing) if `handle` is not the active run
    /// or the active run is not a percent run.
    pub fn update_percent(&mut self, handle: &RunHandle, percent: f64) -> bool {
        match self.runs.kind_mut(handle) {
            Some(ShooterRun::Percent(current)) => {
                *current = percent;
            }
            _ => return false,
        }
        trace!(percent, "Shooter percent updated");
        self.io.set_voltage(NOMINAL_VOLTAGE * percent);
        true
    }

    /// End a run normally. Returns `false` if it had already ended.
    pub fn finish(&mut self, handle: RunHandle) -> bool {
        self.end(handle, RunEnd::Finished)
    }

    /// Cancel a run. Returns `false` if it had already ended.
    pub fn interrupt(&mut self, handle: RunHandle) -> bool {
        self.end(handle, RunEnd::Interrupted)
    }

    /// End any active run, whoever holds its handle.
    pub fn stop(&mut self) {
        if let Some(run) = self.runs.clear() {
            self.stop_run(run);
        }
    }

    /// Active run, if any.
    pub fn active_run(&self) -> Option<ShooterRun> {
        self.runs.active().copied()
    }

    /// Arm the release cycle. Ignored while a release is active.
    pub fn release_ball(&mut self) {
        debug!("Release requested");
        self.io.request_release();
    }

    /// Task that releases once the flywheel is at speed.
    ///
    /// Poll it once per tick with [`ShootWhenAtSpeed::poll`].
    pub fn shoot_when_at_speed(&self) -> ShootWhenAtSpeed {
        ShootWhenAtSpeed::new()
    }

    /// Measured velocity within tolerance of the target.
    pub fn is_at_target_speed(&self) -> bool {
        (self.telemetry.velocity_rad_per_sec - self.telemetry.target_velocity).abs()
            < SHOOTER_SPEED_TOLERANCE
    }

    /// IO backend identifier.
    pub fn io_name(&self) -> &'static str {
        self.io.name()
    }

    fn begin(&mut self, run: ShooterRun) -> RunHandle {
        let (handle, superseded) = self.runs.start(run);
        if let Some(previous) = superseded {
            debug!(?previous, next = ?run, "Shooter run superseded");
            self.stop_run(previous);
        }
        handle
    }

    fn end(&mut self, handle: RunHandle, reason: RunEnd) -> bool {
        match self.runs.end(&handle, reason) {
            Some(run) => {
                self.stop_run(run);
                true
            }
            None => false,
        }
    }

    fn stop_run(&mut self, run: ShooterRun) {
        match run {
            ShooterRun::Percent(_) => self.io.set_voltage(0.0),
            ShooterRun::Velocity(_) => self.io.set_velocity(0.0),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

//! Drivetrain controller.

use ballista_common::consts::NOMINAL_VOLTAGE;
use ballista_common::hal::io::DriveIo;
use ballista_common::hal::types::DriveTelemetry;
use tracing::trace;

/// Open-loop drivetrain controller.
pub struct Drive {
    io: Box<dyn DriveIo>,
    telemetry: DriveTelemetry,
}

impl Drive {
    /// Take ownership of `io` for the controller's lifetime.
    pub fn new(io: Box<dyn DriveIo>) -> Self {
        Self {
            io,
            telemetry: DriveTelemetry::default(),
        }
    }

    /// Pull telemetry from the IO.
    pub fn periodic(&mut self) {
        self.io.refresh(&mut self.telemetry);
    }

    /// Latest telemetry snapshot.
    pub fn telemetry(&self) -> &DriveTelemetry {
        &self.telemetry
    }

    /// Apply signed side voltages [V]; not clamped here.
    pub fn run_open_loop(&mut self, left_volts: f64, right_volts: f64) {
        trace!(left_volts, right_volts, "Drive open loop");
        self.io.set_voltage(left_volts, right_volts);
    }

    /// Zero both sides.
    pub fn stop(&mut self) {
        self.run_open_loop(0.0, 0.0);
    }

    /// Arcade mix of normalized stick values.
    ///
    /// `left = (forward + turn)·12`, `right = (forward − turn)·12`; inputs are
    /// not clamped.
    pub fn arcade_drive(&mut self, forward: f64, turn: f64) {
        self.run_open_loop(
            (forward + turn) * NOMINAL_VOLTAGE,
            (forward - turn) * NOMINAL_VOLTAGE,
        );
    }

    /// IO backend identifier.
    pub fn io_name(&self) -> &'static str {
        self.io.name()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

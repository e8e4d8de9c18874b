//! Telemetry publishing.
//!
//! Controllers expose their latest snapshot; the robot hands each one to a
//! [`TelemetrySink`] under a fixed subsystem key once per tick.

use ballista_common::hal::types::{DriveTelemetry, ShooterTelemetry};
use serde::Serialize;
use tracing::{trace, warn};

/// Log target for telemetry records.
pub const TELEMETRY_TARGET: &str = "ballista::telemetry";

/// Key for drivetrain records.
pub const DRIVE_KEY: &str = "Drive";
/// Key for shooter records.
pub const SHOOTER_KEY: &str = "Shooter";

/// One subsystem's snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Snapshot<'a> {
    /// Drivetrain
    Drive(&'a DriveTelemetry),
    /// Shooter
    Shooter(&'a ShooterTelemetry),
}

/// Destination for per-tick telemetry.
pub trait TelemetrySink: Send {
    /// Record `snapshot` under `subsystem`.
    fn record(&mut self, subsystem: &str, snapshot: Snapshot<'_>);
}

/// Emits each snapshot as a JSON-encoded TRACE event on [`TELEMETRY_TARGET`].
#[derive(Debug, Default)]
pub struct TracingSink {
    failures: u64,
}

impl TracingSink {
    /// New sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TelemetrySink for TracingSink {
    fn record(&mut self, subsystem: &str, snapshot: Snapshot<'_>) {
        match serde_json::to_string(&snapshot) {
            Ok(json) => trace!(target: TELEMETRY_TARGET, subsystem, %json),
            Err(e) => {
                self.failures += 1;
                // First failure and then every 1000th.
                if self.failures % 1000 == 1 {
                    warn!(
                        subsystem,
                        error = %e,
                        failures = self.failures,
                        "Telemetry encode failed"
                    );
                }
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

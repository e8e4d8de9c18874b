//! Subsystem IO traits and error types.
//!
//! This module defines:
//! - `DriveIo` trait - Hardware contract for the two-sided drivetrain
//! - `ShooterIo` trait - Hardware contract for flywheel and release actuator
//! - `DisabledDriveIo` / `DisabledShooterIo` - No-hardware implementations
//! - `HalError` enum - Startup errors from the IO factory
//!
//! Every IO method has a no-op default. A type that implements the trait with
//! an empty `impl` block silently ignores every command and leaves telemetry
//! at its defaults, which is exactly the disabled (replay) contract.

use crate::hal::types::{DriveTelemetry, ShooterTelemetry};
use static_assertions::assert_obj_safe;
use thiserror::Error;

/// Error types for IO construction.
///
/// IO *operations* never fail; these are raised only by the IO factory at
/// startup, before a control loop exists.
#[derive(Debug, Clone, Error)]
pub enum HalError {
    /// Requested hardware backend is not available in this build.
    #[error("Hardware backend unavailable: {0}")]
    BackendUnavailable(String),
}

/// Hardware contract for a two-motor-group drivetrain.
///
/// # Lifecycle
///
/// 1. Constructed once at startup (hardware configuration happens here)
/// 2. `refresh()` - Called once per tick by the owning controller
/// 3. `set_voltage()` - Called whenever a command runs
pub trait DriveIo: Send {
    /// Short identifier for logs (e.g., "hardware", "simulation").
    fn name(&self) -> &'static str {
        "disabled"
    }

    /// Pull the current sensor/actuator state into `telemetry`.
    fn refresh(&mut self, _telemetry: &mut DriveTelemetry) {}

    /// Run both sides open loop at the given signed voltages [V].
    fn set_voltage(&mut self, _left_volts: f64, _right_volts: f64) {}
}

/// Hardware contract for the flywheel shooter and ball-release actuator.
///
/// # Release cycle
///
/// `request_release()` starts a fixed-duration release if none is active
/// and is a no-op otherwise. `refresh()` is the only place the cycle is
/// terminated, so implementations must check the deadline on every call.
pub trait ShooterIo: Send {
    /// Short identifier for logs (e.g., "hardware", "simulation").
    fn name(&self) -> &'static str {
        "disabled"
    }

    /// Pull the current state into `telemetry` and advance the release cycle.
    fn refresh(&mut self, _telemetry: &mut ShooterTelemetry) {}

    /// Run the flywheel open loop at the given signed voltage [V].
    fn set_voltage(&mut self, _volts: f64) {}

    /// Arm closed-loop velocity control toward `target` [rad/s].
    fn set_velocity(&mut self, _target: f64) {}

    /// Start a release cycle unless one is already active.
    fn request_release(&mut self) {}
}

assert_obj_safe!(DriveIo, ShooterIo);

/// Drive IO used when hardware is intentionally absent (log replay).
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledDriveIo;

impl DriveIo for DisabledDriveIo {}

/// Shooter IO used when hardware is intentionally absent (log replay).
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledShooterIo;

impl ShooterIo for DisabledShooterIo {}

//! Prelude module for common re-exports.
//!
//! ```rust
//! use ballista_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, SharedConfig};
pub use crate::hal::config::{
    DriveConfig, HardwareMode, RobotConfig, ShooterConfig, SimConfig, VelocityGains,
};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{
    NOMINAL_VOLTAGE, RELEASE_OUTPUT, RELEASE_TIME, SHOOTER_SPEED_TOLERANCE,
};

// ─── IO Contracts ───────────────────────────────────────────────────
pub use crate::hal::io::{DisabledDriveIo, DisabledShooterIo, DriveIo, HalError, ShooterIo};
pub use crate::hal::types::{DriveTelemetry, ShooterTelemetry};

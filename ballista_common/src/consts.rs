//! System-wide constants for the Ballista workspace.
//!
//! Single source of truth for control-loop timing, voltage references and
//! shooter thresholds. Imported by all crates.

use std::time::Duration;

/// Reference supply voltage used for voltage compensation [V].
///
/// Open-loop commands are expressed in volts and mapped to duty cycle as
/// `volts / NOMINAL_VOLTAGE` at the hardware boundary.
pub const NOMINAL_VOLTAGE: f64 = 12.0;

/// Duration of one ball-release actuation.
pub const RELEASE_TIME: Duration = Duration::from_secs(1);

/// Release actuator duty while a release cycle is active.
pub const RELEASE_OUTPUT: f64 = 1.0;

/// Flywheel speed tolerance for the at-speed predicate [rad/s].
pub const SHOOTER_SPEED_TOLERANCE: f64 = 0.1;

/// Motors per drivetrain side (one leader, one follower).
pub const MOTORS_PER_SIDE: usize = 2;

/// Default control-loop period in milliseconds (50 Hz).
pub const DEFAULT_CYCLE_TIME_MS: u64 = 20;

/// Default bounded attempt count for motor-controller configuration.
pub const DEFAULT_CONFIG_ATTEMPTS: u32 = 5;

/// Default robot configuration path.
pub const DEFAULT_CONFIG_PATH: &str = "config/robot.toml";

//! Telemetry snapshot types.
//!
//! This module defines the per-tick records IO implementations fill in:
//! - `DriveTelemetry` - Drivetrain applied voltage and stator currents
//! - `ShooterTelemetry` - Flywheel state, target velocity, release actuator
//!
//! Both are plain `Copy` values. Controllers own one of each and pass it to
//! their IO's `refresh` once per tick; nothing else writes to them.

use crate::consts::MOTORS_PER_SIDE;
use serde::Serialize;

/// Drivetrain telemetry, refreshed once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DriveTelemetry {
    /// Left side applied voltage [V]
    pub left_applied_volts: f64,
    /// Left side stator currents, leader first [A]
    pub left_current_amps: [f64; MOTORS_PER_SIDE],
    /// Right side applied voltage [V]
    pub right_applied_volts: f64,
    /// Right side stator currents, leader first [A]
    pub right_current_amps: [f64; MOTORS_PER_SIDE],
}

/// Shooter telemetry, refreshed once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ShooterTelemetry {
    /// Flywheel angular position [rad]
    pub position_rad: f64,
    /// Flywheel angular velocity [rad/s]
    pub velocity_rad_per_sec: f64,
    /// Flywheel applied voltage [V]
    pub applied_volts: f64,
    /// Flywheel motor current [A]
    pub current_amps: f64,
    /// Closed-loop target velocity [rad/s], 0 when not velocity controlled
    pub target_velocity: f64,
    /// Release cycle in progress
    pub release_active: bool,
    /// Release actuator duty (0.0 or 1.0)
    pub release_output: f64,
}

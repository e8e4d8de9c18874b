//! Robot configuration types.
//!
//! This module contains the configuration loaded from `robot.toml`:
//! - `RobotConfig` - Top-level configuration
//! - `HardwareMode` - Which IO implementations to build at startup
//! - `DriveConfig` / `ShooterConfig` - Motor-controller addresses and limits
//! - `SimConfig` - First-order model constants for the simulation backend
//!
//! Hardware addresses and current limits are data, never behaviour: nothing
//! outside the IO factory reads them.

use crate::config::{ConfigError, SharedConfig};
use crate::consts::{DEFAULT_CONFIG_ATTEMPTS, DEFAULT_CYCLE_TIME_MS, NOMINAL_VOLTAGE};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

fn default_cycle_time_ms() -> u64 {
    DEFAULT_CYCLE_TIME_MS
}

fn default_config_attempts() -> u32 {
    DEFAULT_CONFIG_ATTEMPTS
}

fn default_current_limit_amps() -> u32 {
    55
}

fn default_peak_current_duration_ms() -> u32 {
    250
}

fn default_voltage_compensation() -> f64 {
    NOMINAL_VOLTAGE
}

/// Which IO implementations the robot is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HardwareMode {
    /// Physical motor controllers on a bus.
    Real,
    /// Physics-simulated IO.
    #[default]
    Sim,
    /// Hardware disabled; every IO call is a no-op (log replay).
    Replay,
}

impl std::fmt::Display for HardwareMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HardwareMode::Real => "real",
            HardwareMode::Sim => "sim",
            HardwareMode::Replay => "replay",
        };
        f.write_str(name)
    }
}

/// Main configuration loaded from `robot.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotConfig {
    /// Control-loop period in milliseconds.
    #[serde(default = "default_cycle_time_ms")]
    pub cycle_time_ms: u64,

    /// IO implementation set; the CLI may override it.
    #[serde(default)]
    pub mode: HardwareMode,

    /// Logging and identity.
    #[serde(default)]
    pub shared: SharedConfig,

    /// Drivetrain motor controllers.
    #[serde(default)]
    pub drive: DriveConfig,

    /// Shooter motor controllers.
    #[serde(default)]
    pub shooter: ShooterConfig,

    /// Simulation model constants.
    #[serde(default)]
    pub sim: SimConfig,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            cycle_time_ms: DEFAULT_CYCLE_TIME_MS,
            mode: HardwareMode::default(),
            shared: SharedConfig::default(),
            drive: DriveConfig::default(),
            shooter: ShooterConfig::default(),
            sim: SimConfig::default(),
        }
    }
}

impl RobotConfig {
    /// Control-loop period as a `Duration`.
    pub fn cycle_time(&self) -> Duration {
        Duration::from_millis(self.cycle_time_ms)
    }

    /// Validate the robot configuration.
    ///
    /// # Validation Rules
    /// 1. `cycle_time_ms` > 0
    /// 2. `shared.service_name` not empty
    /// 3. Drive CAN ids unique, attempts >= 1, voltage compensation > 0
    /// 4. Shooter attempts >= 1
    /// 5. Simulation constants > 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle_time_ms == 0 {
            return Err(ConfigError::ValidationError(
                "cycle_time_ms must be greater than 0".to_string(),
            ));
        }

        self.shared.validate()?;
        self.drive.validate()?;
        self.shooter.validate()?;
        self.sim.validate()
    }
}

/// Drivetrain motor-controller configuration.
///
/// # TOML Example
///
/// ```toml
/// [drive]
/// left_leader_id = 1
/// left_follower_id = 2
/// right_leader_id = 3
/// right_follower_id = 4
/// right_inverted = true
/// current_limit_amps = 55
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    /// Left leader CAN id
    pub left_leader_id: u8,
    /// Left follower CAN id
    pub left_follower_id: u8,
    /// Right leader CAN id
    pub right_leader_id: u8,
    /// Right follower CAN id
    pub right_follower_id: u8,

    /// Invert the left side
    #[serde(default)]
    pub left_inverted: bool,
    /// Invert the right side
    #[serde(default)]
    pub right_inverted: bool,

    /// Peak current limit [A]; the continuous limit is 15 A lower.
    #[serde(default = "default_current_limit_amps")]
    pub current_limit_amps: u32,

    /// Time the peak limit may be held before falling to continuous [ms].
    #[serde(default = "default_peak_current_duration_ms")]
    pub peak_current_duration_ms: u32,

    /// Voltage compensation reference [V].
    #[serde(default = "default_voltage_compensation")]
    pub voltage_compensation: f64,

    /// Bounded attempt count for each configuration call.
    #[serde(default = "default_config_attempts")]
    pub config_attempts: u32,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            left_leader_id: 1,
            left_follower_id: 2,
            right_leader_id: 3,
            right_follower_id: 4,
            left_inverted: false,
            right_inverted: true,
            current_limit_amps: default_current_limit_amps(),
            peak_current_duration_ms: default_peak_current_duration_ms(),
            voltage_compensation: NOMINAL_VOLTAGE,
            config_attempts: DEFAULT_CONFIG_ATTEMPTS,
        }
    }
}

impl DriveConfig {
    /// Continuous current limit [A], 15 A under the peak limit.
    pub fn continuous_current_limit_amps(&self) -> u32 {
        self.current_limit_amps.saturating_sub(15)
    }

    /// Validate drive configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ids = [
            self.left_leader_id,
            self.left_follower_id,
            self.right_leader_id,
            self.right_follower_id,
        ];
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                return Err(ConfigError::ValidationError(format!(
                    "Duplicate drive CAN id: {id}"
                )));
            }
        }

        if self.config_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "drive.config_attempts must be >= 1".to_string(),
            ));
        }

        if self.voltage_compensation <= 0.0 {
            return Err(ConfigError::ValidationError(
                "drive.voltage_compensation must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Closed-loop velocity gains.
///
/// Units are volts per rad/s of error (`kp`), per rad of accumulated error
/// (`ki`), per rad/s² (`kd`), and volts per rad/s of target (`kff`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityGains {
    /// Proportional gain.
    #[serde(default)]
    pub kp: f64,
    /// Integral gain (0 = disabled).
    #[serde(default)]
    pub ki: f64,
    /// Derivative gain (0 = disabled).
    #[serde(default)]
    pub kd: f64,
    /// Velocity feedforward.
    #[serde(default)]
    pub kff: f64,
}

impl Default for VelocityGains {
    fn default() -> Self {
        Self {
            kp: 0.05,
            ki: 0.0,
            kd: 0.0,
            kff: 1.0 / SimConfig::default().flywheel_kv,
        }
    }
}

/// Shooter motor-controller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShooterConfig {
    /// Flywheel motor CAN id
    pub flywheel_id: u8,
    /// Ball-release motor CAN id
    pub release_id: u8,

    /// Flywheel closed-loop gains.
    #[serde(default)]
    pub gains: VelocityGains,

    /// Bounded attempt count for each configuration call.
    #[serde(default = "default_config_attempts")]
    pub config_attempts: u32,
}

impl Default for ShooterConfig {
    fn default() -> Self {
        Self {
            flywheel_id: 1,
            release_id: 10,
            gains: VelocityGains::default(),
            config_attempts: DEFAULT_CONFIG_ATTEMPTS,
        }
    }
}

impl ShooterConfig {
    /// Validate shooter configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.config_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "shooter.config_attempts must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_flywheel_kv() -> f64 {
    // NEO free speed 5676 rpm at 12 V.
    5676.0 * std::f64::consts::TAU / 60.0 / NOMINAL_VOLTAGE
}

fn default_flywheel_time_constant() -> f64 {
    0.4
}

fn default_flywheel_resistance() -> f64 {
    // 105 A stall at 12 V.
    NOMINAL_VOLTAGE / 105.0
}

fn default_drive_kv() -> f64 {
    // CIM free speed 5330 rpm at 12 V.
    5330.0 * std::f64::consts::TAU / 60.0 / NOMINAL_VOLTAGE
}

fn default_drive_time_constant() -> f64 {
    0.25
}

fn default_drive_resistance() -> f64 {
    // 131 A stall at 12 V, two motors per side.
    NOMINAL_VOLTAGE / (131.0 * 2.0)
}

/// First-order model constants for the simulation backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Flywheel speed per volt at steady state [rad/s/V]
    #[serde(default = "default_flywheel_kv")]
    pub flywheel_kv: f64,
    /// Flywheel mechanical time constant [s]
    #[serde(default = "default_flywheel_time_constant")]
    pub flywheel_time_constant_s: f64,
    /// Flywheel winding resistance [Ω]
    #[serde(default = "default_flywheel_resistance")]
    pub flywheel_resistance_ohm: f64,
    /// Drive side speed per volt [rad/s/V]
    #[serde(default = "default_drive_kv")]
    pub drive_kv: f64,
    /// Drive side time constant [s]
    #[serde(default = "default_drive_time_constant")]
    pub drive_time_constant_s: f64,
    /// Effective per-side resistance [Ω]
    #[serde(default = "default_drive_resistance")]
    pub drive_resistance_ohm: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            flywheel_kv: default_flywheel_kv(),
            flywheel_time_constant_s: default_flywheel_time_constant(),
            flywheel_resistance_ohm: default_flywheel_resistance(),
            drive_kv: default_drive_kv(),
            drive_time_constant_s: default_drive_time_constant(),
            drive_resistance_ohm: default_drive_resistance(),
        }
    }
}

impl SimConfig {
    /// Validate simulation constants; every field must be > 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("flywheel_kv", self.flywheel_kv),
            ("flywheel_time_constant_s", self.flywheel_time_constant_s),
            ("flywheel_resistance_ohm", self.flywheel_resistance_ohm),
            ("drive_kv", self.drive_kv),
            ("drive_time_constant_s", self.drive_time_constant_s),
            ("drive_resistance_ohm", self.drive_resistance_ohm),
        ];
        for (name, value) in fields {
            if !(value > 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "sim.{name} must be > 0 (got {value})"
                )));
            }
        }
        Ok(())
    }
}

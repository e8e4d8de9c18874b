//! Motor-controller bus surface.
//!
//! This module defines:
//! - `MotorBus` - Hands out controller handles by CAN id
//! - `MotorController` - Configuration, control requests and sensor reads
//! - `MotorSettings` / `CurrentLimit` / `NeutralMode` - Persistent configuration
//! - `ControlRequest` - Per-tick output request
//! - `BusError` - Transient configuration failures
//! - `try_until_ok` - Bounded configuration retry
//!
//! No wire protocol lives here. Control requests and sensor reads are
//! fire-and-forget; only configuration reports failure, and that failure is
//! consumed by [`try_until_ok`] and never escapes construction.

use ballista_common::hal::config::VelocityGains;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Configuration call failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BusError {
    /// No acknowledgement within the bus timeout.
    #[error("Bus timeout")]
    Timeout,

    /// The controller rejected the request.
    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Behaviour of an undriven motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeutralMode {
    /// Windings open; the mechanism spins down freely.
    #[default]
    Coast,
    /// Windings shorted; the mechanism holds.
    Brake,
}

/// Stator current limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentLimit {
    /// Peak limit [A]
    pub peak_amps: u32,
    /// Limit after the peak duration has elapsed [A]
    pub continuous_amps: u32,
    /// Time the peak may be held [ms]
    pub peak_duration_ms: u32,
}

/// Persistent controller configuration applied once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotorSettings {
    /// Invert output direction.
    pub inverted: bool,
    /// Neutral behaviour.
    pub neutral_mode: NeutralMode,
    /// Voltage compensation reference [V], `None` = disabled.
    pub voltage_compensation: Option<f64>,
    /// Current limit, `None` = controller default.
    pub current_limit: Option<CurrentLimit>,
    /// Onboard velocity-loop gains, `None` = not velocity controlled.
    pub velocity_gains: Option<VelocityGains>,
}

/// Output request for one controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlRequest {
    /// Fraction of the compensation reference, in [-1, 1].
    DutyCycle(f64),
    /// Onboard closed-loop velocity target [rad/s].
    Velocity(f64),
}

/// One motor controller on the bus.
pub trait MotorController: Send {
    /// CAN id.
    fn id(&self) -> u8;

    /// Apply persistent configuration.
    fn configure(&mut self, settings: &MotorSettings) -> Result<(), BusError>;

    /// Mirror the output of the controller with CAN id `leader`.
    fn follow(&mut self, leader: u8) -> Result<(), BusError>;

    /// Set the output request.
    fn set_control(&mut self, request: ControlRequest);

    /// Applied duty cycle, in [-1, 1].
    fn applied_duty(&self) -> f64;

    /// Supply voltage at the controller [V].
    fn bus_voltage(&self) -> f64;

    /// Stator current [A].
    fn stator_current(&self) -> f64;

    /// Rotor position [rad].
    fn position(&self) -> f64;

    /// Rotor velocity [rad/s].
    fn velocity(&self) -> f64;
}

/// Source of motor-controller handles.
pub trait MotorBus {
    /// Controller handle type.
    type Motor: MotorController + 'static;

    /// Handle for the controller with CAN id `id`.
    ///
    /// Creating a handle does not talk to the device.
    fn motor(&mut self, id: u8) -> Self::Motor;
}

/// Run `op` until it succeeds, at most `attempts` times.
///
/// Each failure is logged at WARN; running out of attempts is logged at
/// ERROR. Returns whether the operation eventually succeeded. Callers carry
/// on either way.
pub fn try_until_ok<F>(attempts: u32, what: &str, mut op: F) -> bool
where
    F: FnMut() -> Result<(), BusError>,
{
    for attempt in 1..=attempts {
        match op() {
            Ok(()) => {
                debug!(what, attempt, "Configuration applied");
                return true;
            }
            Err(e) => {
                warn!(what, attempt, attempts, error = %e, "Configuration attempt failed");
            }
        }
    }
    error!(what, attempts, "Configuration abandoned, continuing with controller defaults");
    false
}

// ─── Tests ──────────────────────────────────────────────────────────

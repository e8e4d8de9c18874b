//! IO backends and the startup factory.
//!
//! - [`hardware`] - Motor controllers on a [`MotorBus`]
//! - [`simulation`] - First-order software models
//!
//! The disabled backend is `ballista_common::hal::io::{DisabledDriveIo,
//! DisabledShooterIo}`. The backend is chosen once at startup from
//! [`HardwareMode`]; nothing downstream inspects which one it got.

pub mod hardware;
pub mod simulation;

use crate::bus::MotorBus;
use crate::clock::Clock;
use ballista_common::hal::config::{HardwareMode, RobotConfig};
use ballista_common::hal::io::{DisabledDriveIo, DisabledShooterIo, DriveIo, HalError, ShooterIo};
use std::sync::Arc;
use tracing::info;

/// Drive and shooter IO for one robot.
pub type IoPair = (Box<dyn DriveIo>, Box<dyn ShooterIo>);

/// Build the IO pair for `mode`.
///
/// `Real` needs a motor bus and goes through [`create_hardware_io`]; asking
/// for it here returns [`HalError::BackendUnavailable`].
pub fn create_io(
    config: &RobotConfig,
    mode: HardwareMode,
    clock: Arc<dyn Clock>,
) -> Result<IoPair, HalError> {
    let pair: IoPair = match mode {
        HardwareMode::Real => {
            return Err(HalError::BackendUnavailable(
                "no motor bus backend in this build".to_string(),
            ));
        }
        HardwareMode::Sim => (
            Box::new(simulation::SimDriveIo::new(&config.sim, clock.clone())),
            Box::new(simulation::SimShooterIo::new(
                &config.sim,
                config.shooter.gains,
                clock,
            )),
        ),
        HardwareMode::Replay => (Box::new(DisabledDriveIo), Box::new(DisabledShooterIo)),
    };

    info!(
        mode = %mode,
        drive = pair.0.name(),
        shooter = pair.1.name(),
        "IO created"
    );
    Ok(pair)
}

/// Build the `Real` IO pair on `bus`.
///
/// Never fails: controllers that reject configuration are logged and used
/// with their defaults.
pub fn create_hardware_io<B: MotorBus>(
    config: &RobotConfig,
    bus: &mut B,
    clock: Arc<dyn Clock>,
) -> IoPair {
    let drive = hardware::HardwareDriveIo::new(bus, &config.drive);
    let shooter = hardware::HardwareShooterIo::new(bus, &config.shooter, clock);
    info!(mode = %HardwareMode::Real, "IO created");
    (Box::new(drive), Box::new(shooter))
}

// ─── Tests ──────────────────────────────────────────────────────────

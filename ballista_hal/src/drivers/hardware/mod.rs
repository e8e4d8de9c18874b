//! Hardware backend.
//!
//! IO implementations generic over a [`MotorBus`](crate::bus::MotorBus).
//! Construction applies persistent controller configuration through
//! [`try_until_ok`](crate::bus::try_until_ok); a controller that never
//! accepts its configuration is logged and used with its defaults.

mod drive;
mod shooter;

pub use drive::HardwareDriveIo;
pub use shooter::HardwareShooterIo;

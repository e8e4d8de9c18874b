//! Subsystem controllers.
//!
//! Each controller exclusively owns one IO implementation and one telemetry
//! record. `periodic()` is the only place telemetry changes.
//!
//! - [`drive`] - Open-loop differential drivetrain
//! - [`shooter`] - Flywheel, release cycle and scoped runs

pub mod drive;
pub mod shooter;

pub use drive::Drive;
pub use shooter::{Shooter, ShooterRun};

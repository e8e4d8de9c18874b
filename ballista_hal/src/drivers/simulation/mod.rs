//! Simulation backend.
//!
//! Software models of the drivetrain and flywheel for development without
//! hardware. Time is read from the injected [`Clock`](crate::clock::Clock);
//! each `refresh()` advances the model by the time since the previous one.

mod drive;
mod physics;
mod shooter;

pub use drive::SimDriveIo;
pub use physics::{FirstOrderMotor, PidState, pid_compute};
pub use shooter::SimShooterIo;

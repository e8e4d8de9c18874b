//! # Ballista Control Library
//!
//! Control layer of the Ballista competition robot: translates operator input
//! into drivetrain and shooter commands and publishes per-tick telemetry.
//!
//! ## Layers
//!
//! 1. **Subsystems** - `Drive` and `Shooter` controllers, each owning one IO
//! 2. **Commands** - Scoped runs, the wait-then-release task, bindings
//! 3. **Robot** - Container ticking bindings, controllers and telemetry
//! 4. **Cycle** - Fixed-rate runner driving `Robot::periodic`
//!
//! ## Tick model
//!
//! Single-threaded and cooperative. Nothing blocks the tick; waiting means
//! re-checking on a later tick. The only other thread is the operator input
//! reader, which hands snapshots over a channel.

pub mod command;
pub mod cycle;
pub mod robot;
pub mod subsystems;
pub mod telemetry;

pub use crate::command::input::OperatorInput;
pub use crate::command::run::{RunEnd, RunHandle};
pub use crate::robot::Robot;

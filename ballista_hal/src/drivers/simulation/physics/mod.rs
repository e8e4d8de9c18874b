//! Physics models for the simulation backend.
//!
//! - [`FirstOrderMotor`] - DC motor plus inertia as a first-order lag
//! - [`PidState`] / [`pid_compute`] - Velocity loop run in place of a
//!   controller's onboard firmware loop

mod motor;
mod pid;

pub use motor::FirstOrderMotor;
pub use pid::{PidState, pid_compute};

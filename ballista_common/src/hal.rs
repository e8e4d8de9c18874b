//! Hardware abstraction layer contracts and configuration.
//!
//! - [`io`] - `DriveIo` / `ShooterIo` traits and disabled implementations
//! - [`types`] - Per-tick telemetry records
//! - [`config`] - `robot.toml` types

pub mod config;
pub mod io;
pub mod types;

//! # Ballista HAL Library
//!
//! IO backends behind the `DriveIo` / `ShooterIo` contracts defined in
//! `ballista_common::hal::io`.
//!
//! # Module Structure
//!
//! - [`clock`] - Monotonic time source injected into every backend
//! - [`release`] - Timed ball-release cycle shared by all backends
//! - [`bus`] - Narrow motor-controller surface and configuration retry
//! - [`drivers`] - Hardware and simulation implementations, IO factory
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    ballista_hal                              │
//! │  ┌──────────────┐   ┌─────────────────┐   ┌──────────────┐   │
//! │  │  create_io   │──►│  hardware<Bus>  │──►│  MotorBus    │   │
//! │  │  (factory)   │   ├─────────────────┤   └──────────────┘   │
//! │  │              │──►│  simulation     │──► first-order model │
//! │  │              │──►│  disabled       │                      │
//! │  └──────────────┘   └────────┬────────┘                      │
//! │                              ▼                               │
//! │                    DriveIo / ShooterIo (trait objects)       │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![deny(warnings)]
#![deny(missing_docs)]

pub mod bus;
pub mod clock;
pub mod drivers;
pub mod release;

pub use crate::clock::{Clock, ManualClock, MonotonicClock};
pub use crate::drivers::{IoPair, create_hardware_io, create_io};
pub use crate::release::ReleaseCycle;

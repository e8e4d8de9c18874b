//! Ballista Common Library
//!
//! This crate provides the IO contracts, telemetry records, constants and
//! configuration loading utilities shared by all Ballista workspace crates.
//!
//! # Module Structure
//!
//! - [`consts`] - Control-loop timing, voltage and shooter constants
//! - [`hal`] - IO traits, telemetry types and robot configuration
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use ballista_common::prelude::*;
//!
//! let config = RobotConfig::default();
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod consts;
pub mod hal;
pub mod prelude;

//! Command layer.
//!
//! Sequences controller operations in response to operator input:
//! - [`run`] - Scoped runs with guaranteed stop actions
//! - [`shoot`] - Wait-until-at-speed-then-release task
//! - [`input`] - Operator input snapshot, trigger curve, stdin reader
//! - [`bindings`] - Operator input → drive and shooter operations

pub mod bindings;
pub mod input;
pub mod run;
pub mod shoot;

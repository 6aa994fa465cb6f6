//! Core traits for platform-agnostic sensor functionality.
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Board implementations live in the firmware crate

pub mod time;

pub use time::{MockTime, TimeSource};

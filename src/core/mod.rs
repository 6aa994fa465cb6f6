//! Core infrastructure
//!
//! Logging macros, the persistent parameter store, the state manager
//! interface and the context that ties them together for the sensor loop.

pub mod context;
pub mod logging;
pub mod parameters;
pub mod state;

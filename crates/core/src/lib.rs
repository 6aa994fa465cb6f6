//! kestrel_core - Pure no_std sensor and parameter logic for kestrel
//!
//! This crate contains the platform-agnostic half of the sensor core:
//! everything here can be tested on host without hardware, feature flags or
//! an async runtime.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **No side effects**: Calibrators return outcomes, the firmware layer acts on them
//!
//! # Modules
//!
//! - [`traits`]: Platform-agnostic time abstraction (TimeSource)
//! - [`parameters`]: Parameter ids, defaults, table and persisted image format
//! - [`calibration`]: Gyro and accelerometer calibration state machines
//! - [`sensors`]: Sensor snapshot types and bias/soft-iron correction math
//! - [`status`]: Fault and event vocabulary shared with the state manager

#![no_std]

pub mod calibration;
pub mod parameters;
pub mod sensors;
pub mod status;
pub mod traits;

#![cfg_attr(not(test), no_std)]

//! kestrel - sensor core for small flight controllers
//!
//! This library acquires, calibrates and corrects IMU, magnetometer,
//! barometer and airspeed data, and keeps the vehicle's tunable parameters
//! in a checksummed image in non-volatile memory.
//!
//! Pure data and algorithms live in `kestrel_core`; this crate adds the
//! platform traits, the persistent store and the per-cycle sensor pipeline.

// Platform abstraction layer
pub mod platform;

// Logging, parameter store, state manager
pub mod core;

// Sensor pipeline
pub mod subsystems;

// Configuration commands
pub mod communication;

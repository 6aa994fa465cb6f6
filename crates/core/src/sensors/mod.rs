//! Sensor data types and correction math
//!
//! - [`snapshot`]: raw readings as delivered by a board and the corrected
//!   per-cycle snapshot
//! - [`correction`]: IMU bias/temperature correction and magnetometer
//!   hard/soft-iron correction, built from the parameter table

pub mod correction;
pub mod snapshot;

pub use correction::{ImuCorrection, MagCorrection};
pub use snapshot::{BaroReading, DiffPressureReading, ImuSample, SensorSnapshot};

//! Flight subsystems
//!
//! - [`sensors`]: IMU, magnetometer, barometer and airspeed acquisition with
//!   calibration and correction
//! - [`estimator`]: reset hooks into the attitude estimator

pub mod estimator;
pub mod sensors;

pub use estimator::EstimatorHooks;
pub use sensors::Sensors;

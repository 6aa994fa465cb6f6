//! IMU calibration state machines
//!
//! Each calibrator is polled once per IMU sample while accumulating and
//! returns its terminal outcome exactly once. Calibrators never touch
//! parameters or faults themselves: the firmware `Sensors` component applies
//! the outcome.

pub mod accel;
pub mod gyro;

pub use accel::{AccelCalibrationOutcome, AccelCalibrator};
pub use gyro::{GyroCalibrationOutcome, GyroCalibrator};

/// Accumulator state shared by both calibrators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalibrationState {
    /// Not collecting samples
    #[default]
    Idle,
    /// Collecting samples toward an evaluation
    Accumulating,
}

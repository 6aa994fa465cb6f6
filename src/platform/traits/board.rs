//! Sensor board interface
//!
//! The capability set the sensor core consumes from a board: IMU polling,
//! optional magnetometer, barometer and differential pressure sensors, and
//! the board clock (through the [`TimeSource`] supertrait).

use kestrel_core::sensors::{BaroReading, DiffPressureReading, ImuSample};
use kestrel_core::traits::TimeSource;
use nalgebra::Vector3;

use crate::platform::Result;

/// Sensor board trait
///
/// # Safety Invariants
///
/// - Called from a single context; implementations need no internal locking
/// - `*_present` reflects the last probe and may change only through
///   `sensors_init` or a `*_check` call
/// - No method blocks for longer than one bus transaction
pub trait SensorBoard: TimeSource {
    /// Initialize and probe all sensors
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InitializationFailed` if the IMU cannot be
    /// brought up. Optional sensors failing to probe is not an error.
    fn sensors_init(&mut self) -> Result<()>;

    /// True if an IMU sample is waiting
    fn new_imu_data(&mut self) -> bool;

    /// Read the pending IMU sample
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Sensor` if the bus transaction fails.
    fn imu_read_all(&mut self) -> Result<ImuSample>;

    /// Notify the driver that the IMU has stopped producing data
    fn imu_not_responding_error(&mut self);

    fn mag_present(&self) -> bool;

    /// Read the raw magnetic field
    fn mag_read(&mut self) -> Result<Vector3<f32>>;

    fn baro_present(&self) -> bool;

    fn baro_read(&mut self) -> Result<BaroReading>;

    /// Zero the barometer altitude reference
    fn baro_calibrate(&mut self) -> Result<()>;

    fn diff_pressure_present(&self) -> bool;

    /// Probe for a differential pressure sensor that was absent at boot
    ///
    /// Returns `true` if the sensor is present after the probe.
    fn diff_pressure_check(&mut self) -> bool;

    /// Provide the current static pressure (Pa) as atmospheric reference
    fn diff_pressure_set_atm(&mut self, pressure: f32);

    fn diff_pressure_read(&mut self) -> Result<DiffPressureReading>;

    /// Zero the differential pressure offset
    fn diff_pressure_calibrate(&mut self) -> Result<()>;
}

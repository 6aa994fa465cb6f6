//! Sensor readings and the per-cycle snapshot
//!
//! Units: accel m/s^2, gyro rad/s, temperatures degC, pressures Pa,
//! altitude m, airspeed m/s. Body frame is NED.

use nalgebra::Vector3;

/// One raw IMU sample as read from the board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImuSample {
    /// Unscaled accelerometer reading
    pub accel: Vector3<f32>,
    /// Raw gyroscope reading
    pub gyro: Vector3<f32>,
    /// IMU die temperature
    pub temperature: f32,
    /// Sample time, microseconds since boot
    pub timestamp_us: u64,
}

impl Default for ImuSample {
    fn default() -> Self {
        Self {
            accel: Vector3::zeros(),
            gyro: Vector3::zeros(),
            temperature: 0.0,
            timestamp_us: 0,
        }
    }
}

/// Barometer reading
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BaroReading {
    pub altitude: f32,
    pub pressure: f32,
    pub temperature: f32,
}

/// Differential pressure (airspeed) reading
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DiffPressureReading {
    pub pressure: f32,
    pub temperature: f32,
    pub velocity: f32,
}

/// Latest corrected value of every sensor channel
///
/// Overwritten in place each cycle. A channel's fields are meaningful only
/// while its `*_present` flag is set; IMU fields are always populated once
/// the first sample has been read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSnapshot {
    /// Scaled, bias and temperature corrected acceleration
    pub accel: Vector3<f32>,
    /// Bias corrected angular rate
    pub gyro: Vector3<f32>,
    pub imu_temperature: f32,
    pub imu_time_us: u64,

    /// Hard and soft iron corrected magnetic field
    pub mag: Vector3<f32>,
    pub mag_present: bool,

    pub baro: BaroReading,
    pub baro_present: bool,

    pub diff_pressure: DiffPressureReading,
    pub diff_pressure_present: bool,
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self {
            accel: Vector3::zeros(),
            gyro: Vector3::zeros(),
            imu_temperature: 0.0,
            imu_time_us: 0,
            mag: Vector3::zeros(),
            mag_present: false,
            baro: BaroReading::default(),
            baro_present: false,
            diff_pressure: DiffPressureReading::default(),
            diff_pressure_present: false,
        }
    }
}

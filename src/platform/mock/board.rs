//! Mock sensor board for testing
//!
//! IMU samples are queued by the test and handed out one per
//! `new_imu_data`/`imu_read_all` pair. Optional sensors are absent until
//! given a reading. Time is fully manual.

use heapless::Deque;
use kestrel_core::sensors::{BaroReading, DiffPressureReading, ImuSample};
use kestrel_core::traits::{MockTime, TimeSource};
use nalgebra::Vector3;

use crate::platform::{
    error::{PlatformError, SensorError},
    traits::SensorBoard,
    Result,
};

/// Queued IMU samples
const IMU_QUEUE_DEPTH: usize = 32;

/// Mock sensor board
///
/// # Example
///
/// ```ignore
/// use kestrel::platform::mock::MockBoard;
/// use kestrel::platform::traits::SensorBoard;
///
/// let mut board = MockBoard::new();
/// board.push_imu(Default::default());
/// assert!(board.new_imu_data());
/// ```
#[derive(Debug, Default)]
pub struct MockBoard {
    time: MockTime,
    imu_queue: Deque<ImuSample, IMU_QUEUE_DEPTH>,
    imu_read_fails: bool,
    baro_read_fails: bool,
    init_fails: bool,

    mag: Option<Vector3<f32>>,
    baro: Option<BaroReading>,
    diff_pressure: Option<DiffPressureReading>,
    diff_pressure_detected: bool,
    diff_pressure_appears_on_check: bool,
    last_atm: Option<f32>,

    init_count: u32,
    not_responding_count: u32,
    diff_pressure_check_count: u32,
    baro_calibration_count: u32,
    diff_pressure_calibration_count: u32,
}

impl MockBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board clock
    pub fn time(&self) -> &MockTime {
        &self.time
    }

    /// Queue an IMU sample; returns `false` if the queue is full
    pub fn push_imu(&mut self, sample: ImuSample) -> bool {
        self.imu_queue.push_back(sample).is_ok()
    }

    /// Samples not yet consumed
    pub fn pending_imu(&self) -> usize {
        self.imu_queue.len()
    }

    /// Make IMU reads fail (the sample is still consumed)
    pub fn set_imu_read_fails(&mut self, fails: bool) {
        self.imu_read_fails = fails;
    }

    /// Make barometer reads fail while it stays present
    pub fn set_baro_read_fails(&mut self, fails: bool) {
        self.baro_read_fails = fails;
    }

    /// Make `sensors_init` fail
    pub fn set_init_fails(&mut self, fails: bool) {
        self.init_fails = fails;
    }

    /// Attach a magnetometer reporting `field`
    pub fn set_mag(&mut self, field: Vector3<f32>) {
        self.mag = Some(field);
    }

    /// Attach a barometer reporting `reading`
    pub fn set_baro(&mut self, reading: BaroReading) {
        self.baro = Some(reading);
    }

    /// Attach a differential pressure sensor
    ///
    /// With `detected_at_boot == false` the sensor stays absent until the
    /// first `diff_pressure_check`.
    pub fn set_diff_pressure(&mut self, reading: DiffPressureReading, detected_at_boot: bool) {
        self.diff_pressure = Some(reading);
        self.diff_pressure_detected = detected_at_boot;
        self.diff_pressure_appears_on_check = !detected_at_boot;
    }

    /// Last atmospheric reference handed to the airspeed sensor
    pub fn last_atm(&self) -> Option<f32> {
        self.last_atm
    }

    pub fn init_count(&self) -> u32 {
        self.init_count
    }

    /// Times the driver was told the IMU stopped responding
    pub fn not_responding_count(&self) -> u32 {
        self.not_responding_count
    }

    pub fn diff_pressure_check_count(&self) -> u32 {
        self.diff_pressure_check_count
    }

    pub fn baro_calibration_count(&self) -> u32 {
        self.baro_calibration_count
    }

    pub fn diff_pressure_calibration_count(&self) -> u32 {
        self.diff_pressure_calibration_count
    }
}

impl TimeSource for MockBoard {
    fn now_ms(&self) -> u32 {
        self.time.now_ms()
    }

    fn now_us(&self) -> u64 {
        self.time.now_us()
    }
}

impl SensorBoard for MockBoard {
    fn sensors_init(&mut self) -> Result<()> {
        self.init_count += 1;
        if self.init_fails {
            return Err(PlatformError::InitializationFailed);
        }
        Ok(())
    }

    fn new_imu_data(&mut self) -> bool {
        !self.imu_queue.is_empty()
    }

    fn imu_read_all(&mut self) -> Result<ImuSample> {
        let sample = self
            .imu_queue
            .pop_front()
            .ok_or(PlatformError::Sensor(SensorError::NotResponding))?;
        if self.imu_read_fails {
            return Err(SensorError::InvalidData.into());
        }
        Ok(sample)
    }

    fn imu_not_responding_error(&mut self) {
        self.not_responding_count += 1;
    }

    fn mag_present(&self) -> bool {
        self.mag.is_some()
    }

    fn mag_read(&mut self) -> Result<Vector3<f32>> {
        self.mag
            .ok_or(PlatformError::Sensor(SensorError::NotResponding))
    }

    fn baro_present(&self) -> bool {
        self.baro.is_some()
    }

    fn baro_read(&mut self) -> Result<BaroReading> {
        if self.baro_read_fails {
            return Err(SensorError::InvalidData.into());
        }
        self.baro
            .ok_or(PlatformError::Sensor(SensorError::NotResponding))
    }

    fn baro_calibrate(&mut self) -> Result<()> {
        if self.baro.is_none() {
            return Err(SensorError::NotResponding.into());
        }
        self.baro_calibration_count += 1;
        Ok(())
    }

    fn diff_pressure_present(&self) -> bool {
        self.diff_pressure.is_some() && self.diff_pressure_detected
    }

    fn diff_pressure_check(&mut self) -> bool {
        self.diff_pressure_check_count += 1;
        if self.diff_pressure_appears_on_check {
            self.diff_pressure_detected = true;
        }
        self.diff_pressure_present()
    }

    fn diff_pressure_set_atm(&mut self, pressure: f32) {
        self.last_atm = Some(pressure);
    }

    fn diff_pressure_read(&mut self) -> Result<DiffPressureReading> {
        if !self.diff_pressure_present() {
            return Err(SensorError::NotResponding.into());
        }
        self.diff_pressure
            .ok_or(PlatformError::Sensor(SensorError::NotResponding))
    }

    fn diff_pressure_calibrate(&mut self) -> Result<()> {
        if !self.diff_pressure_present() {
            return Err(SensorError::NotResponding.into());
        }
        self.diff_pressure_calibration_count += 1;
        Ok(())
    }
}

//! Sensor acquisition, calibration and correction
//!
//! [`Sensors::run`] is called once per control cycle. It polls the IMU,
//! feeds any active calibration, applies bias and temperature correction,
//! watches for a stalled IMU, probes late-powered peripherals while
//! disarmed, and refreshes the optional sensors into the snapshot.
//!
//! Correction terms are read from the parameter store every cycle, so
//! parameter changes take effect on the next sample.

use kestrel_core::calibration::{
    AccelCalibrationOutcome, AccelCalibrator, GyroCalibrationOutcome, GyroCalibrator,
};
use kestrel_core::parameters::{ParamId, ParamTable, ParameterError};
use kestrel_core::sensors::{ImuCorrection, MagCorrection, SensorSnapshot};
use kestrel_core::status::{Event, Fault};
use nalgebra::Vector3;

use crate::core::context::FlightContext;
use crate::core::parameters::{ParamObserver, ParameterStore};
use crate::core::state::StateManager;
use crate::platform::traits::{NonVolatileMemory, SensorBoard};
use crate::platform::Result;
use crate::subsystems::estimator::EstimatorHooks;

/// IMU silence before the not-responding fault is raised (ms)
pub const IMU_TIMEOUT_MS: u32 = 1000;

/// Interval between probes for late-powered sensors while disarmed (ms)
pub const PROBE_INTERVAL_MS: u32 = 500;

const GYRO_BIAS_IDS: [ParamId; 3] = [ParamId::GyroXBias, ParamId::GyroYBias, ParamId::GyroZBias];
const ACCEL_BIAS_IDS: [ParamId; 3] = [ParamId::AccXBias, ParamId::AccYBias, ParamId::AccZBias];

fn set_vector<M: NonVolatileMemory, O: ParamObserver>(
    params: &mut ParameterStore<M, O>,
    ids: [ParamId; 3],
    value: Vector3<f32>,
) -> core::result::Result<(), ParameterError> {
    for (id, v) in ids.iter().zip(value.iter()) {
        params.set_float(*id, *v)?;
    }
    Ok(())
}

/// Sensor acquisition component
///
/// Owns the board and the snapshot. Shared state is borrowed from a
/// [`FlightContext`] on every call.
pub struct Sensors<B: SensorBoard> {
    board: B,
    data: SensorSnapshot,
    gyro_cal: GyroCalibrator,
    accel_cal: AccelCalibrator,
    last_imu_update_ms: u32,
    last_probe_ms: u32,
    imu_stalled: bool,
}

impl<B: SensorBoard> Sensors<B> {
    pub fn new(board: B) -> Self {
        Self {
            board,
            data: SensorSnapshot::default(),
            gyro_cal: GyroCalibrator::new(),
            accel_cal: AccelCalibrator::new(),
            last_imu_update_ms: 0,
            last_probe_ms: 0,
            imu_stalled: false,
        }
    }

    /// Bring up the board and check calibration
    ///
    /// Clears the not-responding fault, initializes the board and raises the
    /// uncalibrated fault if all six accel and gyro biases are exactly zero.
    /// The watchdog deadline starts now.
    ///
    /// # Errors
    ///
    /// Returns the board's initialization error. The calibration check runs
    /// regardless.
    pub fn init<M, O, S, E>(&mut self, ctx: &mut FlightContext<M, O, S, E>) -> Result<()>
    where
        M: NonVolatileMemory,
        O: ParamObserver,
        S: StateManager,
        E: EstimatorHooks,
    {
        ctx.state.clear_error(Fault::ImuNotResponding);
        self.imu_stalled = false;

        let result = self.board.sensors_init();
        if result.is_err() {
            crate::log_error!("Sensor board initialization failed");
        }

        let now = self.board.now_ms();
        self.last_imu_update_ms = now;
        self.last_probe_ms = now;

        if ImuCorrection::from_params(ctx.params.table()).biases_are_zero() {
            crate::log_warn!("IMU biases are zero, calibration required");
            ctx.state.set_error(Fault::UncalibratedImu);
        }

        result
    }

    /// Run one acquisition cycle
    ///
    /// Returns `true` if a new IMU sample was read and corrected.
    pub fn run<M, O, S, E>(&mut self, ctx: &mut FlightContext<M, O, S, E>) -> bool
    where
        M: NonVolatileMemory,
        O: ParamObserver,
        S: StateManager,
        E: EstimatorHooks,
    {
        let new_imu_data = self.update_imu(ctx);

        if !ctx.state.is_armed() {
            self.probe_late_sensors();
        }

        let atm = self.update_baro();
        self.update_diff_pressure(atm);
        self.update_mag(ctx.params.table());

        new_imu_data
    }

    /// Start gyro and accel calibration together
    ///
    /// Zeroes the accel and gyro bias parameters.
    ///
    /// # Errors
    ///
    /// Propagates a parameter write failure.
    pub fn start_imu_calibration<M, O, S, E>(
        &mut self,
        ctx: &mut FlightContext<M, O, S, E>,
    ) -> core::result::Result<(), ParameterError>
    where
        M: NonVolatileMemory,
        O: ParamObserver,
        S: StateManager,
        E: EstimatorHooks,
    {
        self.start_gyro_calibration(ctx)?;
        self.accel_cal.start();
        set_vector(&mut ctx.params, ACCEL_BIAS_IDS, Vector3::zeros())?;
        crate::log_info!("IMU calibration started");
        Ok(())
    }

    /// Start gyro calibration
    ///
    /// Zeroes the gyro bias parameters.
    ///
    /// # Errors
    ///
    /// Propagates a parameter write failure.
    pub fn start_gyro_calibration<M, O, S, E>(
        &mut self,
        ctx: &mut FlightContext<M, O, S, E>,
    ) -> core::result::Result<(), ParameterError>
    where
        M: NonVolatileMemory,
        O: ParamObserver,
        S: StateManager,
        E: EstimatorHooks,
    {
        self.gyro_cal.start();
        set_vector(&mut ctx.params, GYRO_BIAS_IDS, Vector3::zeros())?;
        crate::log_info!("Gyro calibration started");
        Ok(())
    }

    pub fn gyro_calibration_complete(&self) -> bool {
        !self.gyro_cal.is_active()
    }

    pub fn accel_calibration_complete(&self) -> bool {
        !self.accel_cal.is_active()
    }

    pub fn gyro_calibrator(&self) -> &GyroCalibrator {
        &self.gyro_cal
    }

    pub fn accel_calibrator(&self) -> &AccelCalibrator {
        &self.accel_cal
    }

    /// Zero the barometer altitude reference
    pub fn calibrate_baro(&mut self) -> Result<()> {
        self.board.baro_calibrate()
    }

    /// Zero the differential pressure offset
    pub fn calibrate_airspeed(&mut self) -> Result<()> {
        self.board.diff_pressure_calibrate()
    }

    /// Latest snapshot
    pub fn data(&self) -> &SensorSnapshot {
        &self.data
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    fn update_imu<M, O, S, E>(&mut self, ctx: &mut FlightContext<M, O, S, E>) -> bool
    where
        M: NonVolatileMemory,
        O: ParamObserver,
        S: StateManager,
        E: EstimatorHooks,
    {
        if !self.board.new_imu_data() {
            self.check_imu_timeout(&mut ctx.state);
            return false;
        }

        ctx.state.clear_error(Fault::ImuNotResponding);
        if self.imu_stalled {
            crate::log_info!("IMU responding again");
            self.imu_stalled = false;
        }
        self.last_imu_update_ms = self.board.now_ms();

        let Ok(sample) = self.board.imu_read_all() else {
            return false;
        };

        let correction = ImuCorrection::from_params(ctx.params.table());
        let accel = correction.scale_accel(sample.accel);
        self.data.imu_temperature = sample.temperature;
        self.data.imu_time_us = sample.timestamp_us;

        if self.accel_cal.is_active() {
            let outcome = self.accel_cal.feed(
                accel,
                sample.temperature,
                correction.accel_temp_comp,
            );
            if let Some(outcome) = outcome {
                apply_accel_outcome(ctx, outcome);
            }
        }

        if self.gyro_cal.is_active() {
            if let Some(outcome) = self.gyro_cal.feed(correction.correct_gyro(sample.gyro)) {
                apply_gyro_outcome(ctx, outcome);
            }
        }

        // Calibration may have just written new biases
        let correction = ImuCorrection::from_params(ctx.params.table());
        self.data.accel = correction.correct_accel(accel, sample.temperature);
        self.data.gyro = correction.correct_gyro(sample.gyro);
        true
    }

    fn check_imu_timeout<S: StateManager>(&mut self, state: &mut S) {
        if self.board.millis_since(self.last_imu_update_ms) <= IMU_TIMEOUT_MS {
            return;
        }
        self.board.imu_not_responding_error();
        state.set_error(Fault::ImuNotResponding);
        if !self.imu_stalled {
            crate::log_error!("IMU not responding");
            self.imu_stalled = true;
        }
    }

    fn probe_late_sensors(&mut self) {
        if self.board.millis_since(self.last_probe_ms) <= PROBE_INTERVAL_MS {
            return;
        }
        self.last_probe_ms = self.board.now_ms();

        if !self.board.diff_pressure_present() && self.board.diff_pressure_check() {
            crate::log_info!("Found differential pressure sensor");
        }
    }

    /// Returns the pressure read this cycle, if any
    fn update_baro(&mut self) -> Option<f32> {
        self.data.baro_present = self.board.baro_present();
        if !self.data.baro_present {
            return None;
        }
        let reading = self.board.baro_read().ok()?;
        self.data.baro = reading;
        Some(reading.pressure)
    }

    fn update_diff_pressure(&mut self, atm: Option<f32>) {
        self.data.diff_pressure_present = self.board.diff_pressure_present();
        if !self.data.diff_pressure_present {
            return;
        }
        if let Some(pressure) = atm {
            self.board.diff_pressure_set_atm(pressure);
        }
        if let Ok(reading) = self.board.diff_pressure_read() {
            self.data.diff_pressure = reading;
        }
    }

    fn update_mag(&mut self, table: &ParamTable) {
        self.data.mag_present = self.board.mag_present();
        if !self.data.mag_present {
            return;
        }
        if let Ok(raw) = self.board.mag_read() {
            self.data.mag = MagCorrection::from_params(table).apply(raw);
        }
    }
}

fn apply_gyro_outcome<M, O, S, E>(ctx: &mut FlightContext<M, O, S, E>, outcome: GyroCalibrationOutcome)
where
    M: NonVolatileMemory,
    O: ParamObserver,
    S: StateManager,
    E: EstimatorHooks,
{
    match outcome {
        GyroCalibrationOutcome::Converged { bias } => {
            if set_vector(&mut ctx.params, GYRO_BIAS_IDS, bias).is_err() {
                crate::log_error!("Failed to store gyro bias");
            }
            ctx.estimator.reset_adaptive_bias();
            ctx.state.set_event(Event::CalibrationComplete);
            crate::log_info!("Gyro calibration complete");
        }
        GyroCalibrationOutcome::Rejected { .. } => {
            ctx.state.set_event(Event::CalibrationFailed);
            crate::log_warn!("Too much movement for gyro calibration");
        }
    }
}

fn apply_accel_outcome<M, O, S, E>(
    ctx: &mut FlightContext<M, O, S, E>,
    outcome: AccelCalibrationOutcome,
) where
    M: NonVolatileMemory,
    O: ParamObserver,
    S: StateManager,
    E: EstimatorHooks,
{
    match outcome {
        AccelCalibrationOutcome::Accepted { bias } => {
            if set_vector(&mut ctx.params, ACCEL_BIAS_IDS, bias).is_err() {
                crate::log_error!("Failed to store accel bias");
            }
            ctx.state.clear_error(Fault::UncalibratedImu);
            ctx.estimator.reset_state();
            crate::log_info!("IMU offsets captured");
        }
        AccelCalibrationOutcome::ScaleTooLow { .. } => {
            rescale_accel(ctx, 2.0);
        }
        AccelCalibrationOutcome::ScaleTooHigh { .. } => {
            rescale_accel(ctx, 0.5);
        }
        AccelCalibrationOutcome::TooMuchMotion { .. } => {
            ctx.state.set_event(Event::CalibrationFailed);
            crate::log_warn!("Too much movement for IMU calibration");
        }
    }
}

fn rescale_accel<M, O, S, E>(ctx: &mut FlightContext<M, O, S, E>, factor: f32)
where
    M: NonVolatileMemory,
    O: ParamObserver,
    S: StateManager,
    E: EstimatorHooks,
{
    crate::log_warn!("Detected bad IMU accel scale value");
    let scale = ctx.params.get_float(ParamId::AccelScale) * factor;
    if ctx.params.set_float(ParamId::AccelScale, scale).is_err() {
        crate::log_error!("Failed to store accel scale");
    }
    if ctx.params.save().is_err() {
        crate::log_error!("Failed to persist corrected accel scale");
    }
    ctx.state.set_event(Event::CalibrationFailed);
}

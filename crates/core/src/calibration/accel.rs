//! Accelerometer bias calibration
//!
//! Averages scaled accelerometer samples with the nominal gravity reference
//! added back, then removes the temperature contribution accumulated over
//! the run. The vehicle must be level and still.
//!
//! A residual bias of one or more g is not a plausible offset. It indicates a
//! wrong `ACC_SCALE`, so the outcome asks the caller to double or halve the
//! scale instead of writing the bias.

use nalgebra::Vector3;

use super::CalibrationState;

/// Nominal gravity reference added to each sample (m/s^2, z down)
pub const GRAVITY: Vector3<f32> = Vector3::new(0.0, 0.0, 9.80665);

const MIN_SEED: f32 = 1000.0;
const MAX_SEED: f32 = -1000.0;

/// Result of a completed accel calibration run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccelCalibrationOutcome {
    /// Bias accepted
    Accepted { bias: Vector3<f32> },
    /// Bias norm in `[3, 6)`: scale is roughly half what it should be
    ScaleTooLow { bias: Vector3<f32> },
    /// Bias norm `>= 6`: scale is roughly double what it should be
    ScaleTooHigh { bias: Vector3<f32> },
    /// Per-axis spread exceeded the motion limit
    TooMuchMotion { spread: f32 },
}

/// Temperature-compensated accelerometer bias estimator
#[derive(Debug, Clone)]
pub struct AccelCalibrator {
    state: CalibrationState,
    sum: Vector3<f32>,
    temp_sum: f32,
    min: Vector3<f32>,
    max: Vector3<f32>,
    count: u32,
}

impl AccelCalibrator {
    /// Samples that must be exceeded before evaluation
    pub const SAMPLE_COUNT: u32 = 1000;

    /// Largest accepted `|max - min|` over the run
    pub const MAX_SPREAD: f32 = 1.0;

    /// Bias norms below this are accepted
    pub const ACCEPT_NORM: f32 = 3.0;

    /// Bias norms at or above this mean the scale is doubled
    pub const DOUBLE_SCALE_NORM: f32 = 6.0;

    pub fn new() -> Self {
        Self {
            state: CalibrationState::Idle,
            sum: Vector3::zeros(),
            temp_sum: 0.0,
            min: Vector3::repeat(MIN_SEED),
            max: Vector3::repeat(MAX_SEED),
            count: 0,
        }
    }

    /// Begin a new run, discarding any partial accumulation
    pub fn start(&mut self) {
        self.reset();
        self.state = CalibrationState::Accumulating;
    }

    pub fn state(&self) -> CalibrationState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == CalibrationState::Accumulating
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Accumulate one sample
    ///
    /// # Arguments
    ///
    /// * `accel` - Scaled accelerometer reading, before bias and temperature
    ///   correction (m/s^2)
    /// * `temperature` - IMU temperature for the same sample
    /// * `temp_comp` - Configured per-axis temperature coefficients, used only
    ///   on the evaluating sample
    ///
    /// Returns the outcome on the sample that takes the count past
    /// [`Self::SAMPLE_COUNT`]. The accumulator is reset and idle afterwards,
    /// whatever the outcome.
    pub fn feed(
        &mut self,
        accel: Vector3<f32>,
        temperature: f32,
        temp_comp: Vector3<f32>,
    ) -> Option<AccelCalibrationOutcome> {
        if !self.is_active() {
            return None;
        }

        self.sum += accel + GRAVITY;
        self.temp_sum += temperature;
        self.max = self.max.sup(&accel);
        self.min = self.min.inf(&accel);
        self.count += 1;

        if self.count <= Self::SAMPLE_COUNT {
            return None;
        }

        let bias = (self.sum - temp_comp * self.temp_sum) / self.count as f32;
        let spread = (self.max - self.min).norm();
        self.reset();

        let outcome = if spread > Self::MAX_SPREAD {
            AccelCalibrationOutcome::TooMuchMotion { spread }
        } else {
            let norm = bias.norm();
            if norm < Self::ACCEPT_NORM {
                AccelCalibrationOutcome::Accepted { bias }
            } else if norm < Self::DOUBLE_SCALE_NORM {
                AccelCalibrationOutcome::ScaleTooLow { bias }
            } else {
                AccelCalibrationOutcome::ScaleTooHigh { bias }
            }
        };
        Some(outcome)
    }

    fn reset(&mut self) {
        self.state = CalibrationState::Idle;
        self.sum = Vector3::zeros();
        self.temp_sum = 0.0;
        self.min = Vector3::repeat(MIN_SEED);
        self.max = Vector3::repeat(MAX_SEED);
        self.count = 0;
    }
}

impl Default for AccelCalibrator {
    fn default() -> Self {
        Self::new()
    }
}

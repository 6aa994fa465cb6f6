//! Gyroscope bias calibration
//!
//! Averages stationary gyro samples. The vehicle must be still: a mean rate
//! above [`GyroCalibrator::MAX_BIAS_NORM`] is treated as motion and rejected.

use nalgebra::Vector3;

use super::CalibrationState;

/// Result of a completed gyro calibration run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GyroCalibrationOutcome {
    /// Mean accepted as the new bias (rad/s)
    Converged { bias: Vector3<f32> },
    /// Mean too large, vehicle was moving
    Rejected { mean: Vector3<f32> },
}

/// Running-mean gyro bias estimator
#[derive(Debug, Clone)]
pub struct GyroCalibrator {
    state: CalibrationState,
    sum: Vector3<f32>,
    count: u32,
}

impl GyroCalibrator {
    /// Samples that must be exceeded before evaluation
    pub const SAMPLE_COUNT: u32 = 100;

    /// Largest accepted mean rate norm (rad/s)
    pub const MAX_BIAS_NORM: f32 = 1.0;

    pub fn new() -> Self {
        Self {
            state: CalibrationState::Idle,
            sum: Vector3::zeros(),
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

    /// Samples accumulated in the current run
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Accumulate one bias-corrected gyro sample
    ///
    /// Returns the outcome on the sample that takes the count past
    /// [`Self::SAMPLE_COUNT`]; the calibrator is idle and zeroed afterwards.
    /// Samples fed while idle are ignored.
    pub fn feed(&mut self, gyro: Vector3<f32>) -> Option<GyroCalibrationOutcome> {
        if !self.is_active() {
            return None;
        }

        self.sum += gyro;
        self.count += 1;

        if self.count <= Self::SAMPLE_COUNT {
            return None;
        }

        let mean = self.sum / self.count as f32;
        self.reset();

        if mean.norm() < Self::MAX_BIAS_NORM {
            Some(GyroCalibrationOutcome::Converged { bias: mean })
        } else {
            Some(GyroCalibrationOutcome::Rejected { mean })
        }
    }

    fn reset(&mut self) {
        self.state = CalibrationState::Idle;
        self.sum = Vector3::zeros();
        self.count = 0;
    }
}

impl Default for GyroCalibrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn run(cal: &mut GyroCalibrator, sample: Vector3<f32>, n: u32) -> Option<GyroCalibrationOutcome> {
        let mut outcome = None;
        for _ in 0..n {
            if let Some(o) = cal.feed(sample) {
                assert!(outcome.is_none(), "outcome reported twice");
                outcome = Some(o);
            }
        }
        outcome
    }

    #[test]
    fn test_idle_ignores_samples() {
        let mut cal = GyroCalibrator::new();
        assert_eq!(cal.feed(Vector3::new(0.1, 0.0, 0.0)), None);
        assert_eq!(cal.count(), 0);
        assert_eq!(cal.state(), CalibrationState::Idle);
    }

    #[test]
    fn test_evaluates_on_101st_sample() {
        let mut cal = GyroCalibrator::new();
        cal.start();
        assert_eq!(run(&mut cal, Vector3::new(0.01, 0.0, 0.0), 100), None);
        assert_eq!(cal.count(), 100);
        assert!(cal.is_active());
        assert!(cal.feed(Vector3::new(0.01, 0.0, 0.0)).is_some());
        assert!(!cal.is_active());
    }

    #[test]
    fn test_converges_to_sample_mean() {
        let mut cal = GyroCalibrator::new();
        cal.start();

        // 100 samples of a, 1 sample of b
        let a = Vector3::new(0.02, -0.01, 0.005);
        let b = Vector3::new(0.12, 0.09, -0.095);
        assert_eq!(run(&mut cal, a, 100), None);
        let outcome = cal.feed(b);

        let expected = (a * 100.0 + b) / 101.0;
        match outcome {
            Some(GyroCalibrationOutcome::Converged { bias }) => {
                assert!((bias - expected).norm() < EPSILON);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(cal.count(), 0);
        assert_eq!(cal.state(), CalibrationState::Idle);
    }

    #[test]
    fn test_rejects_motion() {
        let mut cal = GyroCalibrator::new();
        cal.start();
        let outcome = run(&mut cal, Vector3::new(0.8, 0.8, 0.0), 101);
        assert!(matches!(
            outcome,
            Some(GyroCalibrationOutcome::Rejected { .. })
        ));
        assert_eq!(cal.count(), 0);
        assert!(!cal.is_active());
    }

    #[test]
    fn test_restart_discards_partial_run() {
        let mut cal = GyroCalibrator::new();
        cal.start();
        run(&mut cal, Vector3::new(5.0, 5.0, 5.0), 50);
        cal.start();
        assert_eq!(cal.count(), 0);
        let outcome = run(&mut cal, Vector3::zeros(), 101);
        assert_eq!(
            outcome,
            Some(GyroCalibrationOutcome::Converged {
                bias: Vector3::zeros()
            })
        );
    }
}

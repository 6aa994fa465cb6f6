//! Attitude estimator reset hooks
//!
//! The estimator itself is external; calibration only needs to tell it when
//! its bias estimate or full state has been invalidated.

/// Reset entry points the sensor core drives
pub trait EstimatorHooks {
    /// Gyro biases changed; drop the adaptive bias estimate
    fn reset_adaptive_bias(&mut self);

    /// Accel biases changed; restart estimation from scratch
    fn reset_state(&mut self);
}

/// Estimator stand-in that counts resets
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default)]
pub struct MockEstimator {
    pub adaptive_bias_resets: u32,
    pub state_resets: u32,
}

#[cfg(any(test, feature = "mock"))]
impl EstimatorHooks for MockEstimator {
    fn reset_adaptive_bias(&mut self) {
        self.adaptive_bias_resets += 1;
    }

    fn reset_state(&mut self) {
        self.state_resets += 1;
    }
}

//! Fault and event vocabulary shared with the state manager
//!
//! Faults are level conditions that stay active until cleared. Events are
//! one-shot notifications.

use bitflags::bitflags;

/// Named fault condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// No IMU data for longer than the watchdog deadline
    ImuNotResponding,
    /// Accel and gyro biases have never been calibrated
    UncalibratedImu,
}

impl Fault {
    /// Flag bit for this fault
    pub const fn flag(self) -> ErrorFlags {
        match self {
            Fault::ImuNotResponding => ErrorFlags::IMU_NOT_RESPONDING,
            Fault::UncalibratedImu => ErrorFlags::UNCALIBRATED_IMU,
        }
    }
}

/// One-shot notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    CalibrationComplete,
    CalibrationFailed,
}

bitflags! {
    /// Set of active faults
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ErrorFlags: u16 {
        const IMU_NOT_RESPONDING = 0b0000_0001;
        const UNCALIBRATED_IMU = 0b0000_0010;
    }
}

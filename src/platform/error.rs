//! Platform error types
//!
//! This module defines error types for board and storage operations.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// Board implementations map their driver-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlatformError {
    /// Non-volatile memory operation failed
    Memory(MemoryError),
    /// Sensor bus operation failed
    Sensor(SensorError),
    /// Board initialization failed
    InitializationFailed,
}

/// Non-volatile memory errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MemoryError {
    /// Read operation failed
    ReadFailed,
    /// Write operation failed
    WriteFailed,
    /// Transfer larger than the storage region
    InvalidLength,
}

/// Sensor read errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Device did not answer
    NotResponding,
    /// Read returned inconsistent data
    InvalidData,
}

impl From<MemoryError> for PlatformError {
    fn from(e: MemoryError) -> Self {
        PlatformError::Memory(e)
    }
}

impl From<SensorError> for PlatformError {
    fn from(e: SensorError) -> Self {
        PlatformError::Sensor(e)
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Memory(e) => write!(f, "Memory error: {:?}", e),
            PlatformError::Sensor(e) => write!(f, "Sensor error: {:?}", e),
            PlatformError::InitializationFailed => write!(f, "Board initialization failed"),
        }
    }
}

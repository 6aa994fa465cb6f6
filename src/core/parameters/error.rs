//! Parameter store errors

use core::fmt;

use kestrel_core::parameters::ImageError;

use crate::platform::PlatformError;

/// Errors from loading or saving the parameter image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Storage read or write failed
    Storage(PlatformError),
    /// Stored image failed validation
    Corrupt(ImageError),
}

impl From<PlatformError> for StoreError {
    fn from(err: PlatformError) -> Self {
        StoreError::Storage(err)
    }
}

impl From<ImageError> for StoreError {
    fn from(err: ImageError) -> Self {
        StoreError::Corrupt(err)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Storage(e) => write!(f, "parameter storage: {}", e),
            StoreError::Corrupt(e) => write!(f, "{}", e),
        }
    }
}

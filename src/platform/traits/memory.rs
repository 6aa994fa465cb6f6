//! Non-volatile memory interface
//!
//! The parameter image is always transferred whole: one fixed-size region,
//! read or written from offset zero.

use crate::platform::Result;

/// Non-volatile memory trait
pub trait NonVolatileMemory {
    /// Fill `buf` from the start of the storage region
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Memory` if the read fails or `buf` is larger
    /// than the region.
    fn read(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Write `data` to the start of the storage region
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Memory` if the write fails or `data` is larger
    /// than the region.
    fn write(&mut self, data: &[u8]) -> Result<()>;
}

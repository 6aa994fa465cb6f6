//! Platform abstraction layer
//!
//! Board-specific drivers implement the traits in [`traits`]; everything
//! above this module is written against those traits only.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{MemoryError, PlatformError, Result, SensorError};
pub use traits::{NonVolatileMemory, SensorBoard};

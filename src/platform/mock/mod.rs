//! Mock platform implementation for testing
//!
//! Provides in-memory board and storage implementations that can be used for
//! unit testing without hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use kestrel::platform::mock::MockMemory;
//! use kestrel::platform::traits::NonVolatileMemory;
//!
//! let mut memory = MockMemory::new();
//! memory.write(&[1, 2, 3]).unwrap();
//!
//! let mut buf = [0u8; 4];
//! memory.read(&mut buf).unwrap();
//! assert_eq!(buf, [1, 2, 3, 0xFF]);
//! ```

#![cfg(any(test, feature = "mock"))]

mod board;
mod memory;

pub use board::MockBoard;
pub use memory::{MockMemory, MOCK_MEMORY_CAPACITY};

//! Platform abstraction traits
//!
//! This module defines the traits that board implementations must provide.

pub mod board;
pub mod memory;

pub use board::SensorBoard;
pub use memory::NonVolatileMemory;

//! Mock non-volatile memory for testing
//!
//! Provides in-memory storage simulation for unit tests.

use crate::platform::{error::MemoryError, traits::NonVolatileMemory, Result};

/// Storage region size in bytes
pub const MOCK_MEMORY_CAPACITY: usize = 2048;

/// Mock non-volatile memory
///
/// Simulates a single storage region, initialized to 0xFF (erased). Supports:
/// - Read/write failure injection
/// - Corruption injection for testing image validation
/// - Write counting
#[derive(Debug)]
pub struct MockMemory {
    storage: [u8; MOCK_MEMORY_CAPACITY],
    fail_reads: bool,
    fail_writes: bool,
    write_count: u32,
}

impl MockMemory {
    /// Create an erased mock memory
    pub fn new() -> Self {
        Self {
            storage: [0xFF; MOCK_MEMORY_CAPACITY],
            fail_reads: false,
            fail_writes: false,
            write_count: 0,
        }
    }

    /// Storage contents (for test verification)
    pub fn contents(&self) -> &[u8] {
        &self.storage
    }

    /// XOR `mask` into the byte at `offset`
    pub fn inject_corruption(&mut self, offset: usize, mask: u8) {
        self.storage[offset] ^= mask;
    }

    /// Make every following read fail
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make every following write fail
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes
    pub fn write_count(&self) -> u32 {
        self.write_count
    }
}

impl Default for MockMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl NonVolatileMemory for MockMemory {
    fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        if self.fail_reads {
            return Err(MemoryError::ReadFailed.into());
        }
        if buf.len() > MOCK_MEMORY_CAPACITY {
            return Err(MemoryError::InvalidLength.into());
        }
        buf.copy_from_slice(&self.storage[..buf.len()]);
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        if self.fail_writes {
            return Err(MemoryError::WriteFailed.into());
        }
        if data.len() > MOCK_MEMORY_CAPACITY {
            return Err(MemoryError::InvalidLength.into());
        }
        self.storage[..data.len()].copy_from_slice(data);
        self.write_count += 1;
        Ok(())
    }
}

//! Persistent parameter store
//!
//! Wraps the in-memory [`ParamTable`] with whole-image persistence to a
//! [`NonVolatileMemory`] and synchronous change dispatch to a
//! [`ParamObserver`]. Changes are never persisted automatically: callers
//! decide when to [`save`](ParameterStore::save).

use heapless::Deque;
use kestrel_core::parameters::{
    image, ParamId, ParamTable, ParamValue, ParameterError, IMAGE_SIZE, PARAM_COUNT,
};

use super::error::StoreError;
use super::observer::ParamObserver;
use crate::platform::traits::NonVolatileMemory;

/// Image format version of this build
pub const BUILD_VERSION: u32 = image::format_version(env!("KESTREL_BUILD_ID"));

/// Parameter store with persistence and change notification
pub struct ParameterStore<M: NonVolatileMemory, O: ParamObserver> {
    table: ParamTable,
    memory: M,
    observer: O,
    version: u32,
    pending: Deque<ParamId, PARAM_COUNT>,
    dirty: bool,
}

impl<M: NonVolatileMemory, O: ParamObserver> ParameterStore<M, O> {
    /// Create a store holding compiled-in defaults
    ///
    /// Nothing is read from memory until [`init`](Self::init) or
    /// [`load`](Self::load).
    pub fn new(memory: M, observer: O) -> Self {
        Self::with_version(memory, observer, BUILD_VERSION)
    }

    /// Create a store that reads and writes images stamped with `version`
    pub fn with_version(memory: M, observer: O, version: u32) -> Self {
        Self {
            table: ParamTable::new(),
            memory,
            observer,
            version,
            pending: Deque::new(),
            dirty: false,
        }
    }

    /// Load-or-default
    ///
    /// Loads the stored image; if it is unreadable or invalid, resets to
    /// defaults and persists them. Either way every parameter is dispatched
    /// to the observer afterwards. Returns `true` if the stored image was
    /// used.
    pub fn init(&mut self) -> bool {
        match self.load() {
            Ok(()) => {
                crate::log_info!("Loaded parameters, image version {}", self.version);
                true
            }
            Err(_) => {
                crate::log_warn!("Stored parameters invalid, using defaults");
                self.table.reset_to_defaults();
                self.dirty = true;
                // A failed write is logged by save(); defaults stay in effect
                let _ = self.save();
                self.dispatch_all();
                false
            }
        }
    }

    /// Replace the table with the stored image
    ///
    /// On success every parameter is dispatched to the observer.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the read fails or
    /// `StoreError::Corrupt` if the image does not validate. The in-memory
    /// table is untouched on error.
    pub fn load(&mut self) -> Result<(), StoreError> {
        let mut buf = [0u8; IMAGE_SIZE];
        self.memory.read(&mut buf)?;
        self.table = image::decode(&buf, self.version)?;
        self.dirty = false;
        self.dispatch_all();
        Ok(())
    }

    /// Write the whole table to memory
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the write fails. The in-memory values
    /// remain valid and the store stays dirty.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let buf = image::encode(&self.table, self.version);
        match self.memory.write(&buf) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                crate::log_error!("Parameter write failed");
                Err(e.into())
            }
        }
    }

    /// Restore compiled-in defaults without persisting
    ///
    /// Every parameter is dispatched to the observer.
    pub fn reset_to_defaults(&mut self) {
        self.table.reset_to_defaults();
        self.dirty = true;
        self.dispatch_all();
    }

    pub fn get(&self, id: ParamId) -> ParamValue {
        self.table.get(id)
    }

    pub fn get_float(&self, id: ParamId) -> f32 {
        self.table.get_float(id)
    }

    pub fn get_int(&self, id: ParamId) -> i32 {
        self.table.get_int(id)
    }

    /// Set a value, notifying the observer if it changed
    ///
    /// Returns `Ok(false)` without side effects if `value` equals the current
    /// value.
    ///
    /// # Errors
    ///
    /// Returns `ParameterError::TypeMismatch` if `value` has the wrong type.
    pub fn set(&mut self, id: ParamId, value: ParamValue) -> Result<bool, ParameterError> {
        if !self.table.set(id, value)? {
            return Ok(false);
        }
        self.dirty = true;
        if !self.pending.iter().any(|&p| p == id) {
            // Capacity equals the id count, so a coalesced queue never fills
            let _ = self.pending.push_back(id);
        }
        self.observer.param_changed(id, value);
        Ok(true)
    }

    pub fn set_float(&mut self, id: ParamId, value: f32) -> Result<bool, ParameterError> {
        self.set(id, ParamValue::Float(value))
    }

    pub fn set_int(&mut self, id: ParamId, value: i32) -> Result<bool, ParameterError> {
        self.set(id, ParamValue::Int32(value))
    }

    /// Resolve `name` and set its value
    ///
    /// # Errors
    ///
    /// Returns `ParameterError::NotFound` for an unknown name, otherwise as
    /// [`set`](Self::set).
    pub fn set_by_name(&mut self, name: &str, value: ParamValue) -> Result<bool, ParameterError> {
        let id = self.lookup(name).ok_or(ParameterError::NotFound)?;
        self.set(id, value)
    }

    pub fn lookup(&self, name: &str) -> Option<ParamId> {
        self.table.lookup(name)
    }

    /// Next changed parameter to report to telemetry
    pub fn take_pending_notification(&mut self) -> Option<ParamId> {
        self.pending.pop_front()
    }

    /// True if the table has changed since the last load or save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn table(&self) -> &ParamTable {
        &self.table
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    fn dispatch_all(&mut self) {
        for (id, value) in self.table.iter() {
            self.observer.param_changed(id, value);
        }
    }
}

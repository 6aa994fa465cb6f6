//! State manager interface
//!
//! The sensor core reports faults and calibration events to a
//! [`StateManager`] and asks it whether the vehicle is armed. Arming logic
//! itself lives outside this crate; [`StatusBoard`] is a minimal
//! implementation that just records what it is told.

use heapless::Deque;
use kestrel_core::status::{ErrorFlags, Event, Fault};

/// Fault, event and arming-state sink
pub trait StateManager {
    /// Mark `fault` active (idempotent)
    fn set_error(&mut self, fault: Fault);

    /// Mark `fault` inactive (idempotent)
    fn clear_error(&mut self, fault: Fault);

    /// Deliver a one-shot event
    fn set_event(&mut self, event: Event);

    fn is_armed(&self) -> bool;
}

/// Queued events before the oldest is dropped
pub const EVENT_QUEUE_DEPTH: usize = 8;

/// Reference state manager
///
/// Holds the active fault set, a bounded event queue (oldest dropped when
/// full) and the armed flag.
#[derive(Debug, Default)]
pub struct StatusBoard {
    errors: ErrorFlags,
    events: Deque<Event, EVENT_QUEUE_DEPTH>,
    armed: bool,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active faults
    pub fn errors(&self) -> ErrorFlags {
        self.errors
    }

    pub fn has_error(&self, fault: Fault) -> bool {
        self.errors.contains(fault.flag())
    }

    /// Oldest undelivered event
    pub fn take_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn set_armed(&mut self, armed: bool) {
        self.armed = armed;
    }
}

impl StateManager for StatusBoard {
    fn set_error(&mut self, fault: Fault) {
        self.errors.insert(fault.flag());
    }

    fn clear_error(&mut self, fault: Fault) {
        self.errors.remove(fault.flag());
    }

    fn set_event(&mut self, event: Event) {
        if self.events.is_full() {
            self.events.pop_front();
        }
        let _ = self.events.push_back(event);
    }

    fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(any(test, feature = "mock"))]
pub use mock::MockStateManager;

#[cfg(any(test, feature = "mock"))]
mod mock {
    use super::*;
    use heapless::Vec;

    /// State manager that counts every call
    #[derive(Debug, Default)]
    pub struct MockStateManager {
        pub board: StatusBoard,
        raised: [u32; 2],
        cleared: [u32; 2],
        events: Vec<Event, 32>,
    }

    fn slot(fault: Fault) -> usize {
        match fault {
            Fault::ImuNotResponding => 0,
            Fault::UncalibratedImu => 1,
        }
    }

    impl MockStateManager {
        pub fn new() -> Self {
            Self::default()
        }

        /// Times `set_error(fault)` was called
        pub fn raise_count(&self, fault: Fault) -> u32 {
            self.raised[slot(fault)]
        }

        /// Times `clear_error(fault)` was called
        pub fn clear_count(&self, fault: Fault) -> u32 {
            self.cleared[slot(fault)]
        }

        pub fn has_error(&self, fault: Fault) -> bool {
            self.board.has_error(fault)
        }

        /// Every event delivered so far, oldest first
        pub fn events(&self) -> &[Event] {
            &self.events
        }

        pub fn set_armed(&mut self, armed: bool) {
            self.board.set_armed(armed);
        }
    }

    impl StateManager for MockStateManager {
        fn set_error(&mut self, fault: Fault) {
            self.raised[slot(fault)] += 1;
            self.board.set_error(fault);
        }

        fn clear_error(&mut self, fault: Fault) {
            self.cleared[slot(fault)] += 1;
            self.board.clear_error(fault);
        }

        fn set_event(&mut self, event: Event) {
            let _ = self.events.push(event);
            self.board.set_event(event);
        }

        fn is_armed(&self) -> bool {
            self.board.is_armed()
        }
    }
}

//! Parameter management
//!
//! The table and image format live in `kestrel_core::parameters`. This
//! module adds persistence to non-volatile memory and change dispatch to
//! dependent subsystems.

pub mod error;
pub mod observer;
pub mod store;

pub use error::StoreError;
pub use observer::{
    ChangeEffect, DispatchTable, NoopObserver, ParamObserver, StreamId, SubsystemHooks,
    STANDARD_EFFECTS,
};
pub use store::{ParameterStore, BUILD_VERSION};

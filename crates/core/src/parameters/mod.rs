//! Parameter table types and the persisted image format
//!
//! This module provides the pure half of parameter management: ids and
//! compiled-in defaults, the typed in-memory table, and the binary image
//! codec. Storage access and change dispatch live in the firmware crate.

pub mod checksum;
pub mod error;
pub mod id;
pub mod image;
pub mod table;
pub mod value;

pub use checksum::calculate_xor8;
pub use error::{ImageError, ParameterError};
pub use id::{ParamDefault, ParamId, PARAM_COUNT, PARAM_DEFAULTS, PARAM_NAME_LEN};
pub use image::{decode, encode, format_version, ImageHeader, IMAGE_SIZE, MAGIC_BE, MAGIC_EF};
pub use table::{ParamName, ParamTable};
pub use value::{ParamType, ParamValue};

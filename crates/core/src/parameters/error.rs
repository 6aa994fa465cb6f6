//! Parameter error types
//!
//! Provides error types for parameter table operations and persisted image
//! validation.

use core::fmt;

/// Errors from parameter table operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    /// No parameter with the requested name
    NotFound,
    /// Value type does not match the parameter's stored type
    TypeMismatch,
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::NotFound => write!(f, "parameter not found"),
            ParameterError::TypeMismatch => write!(f, "parameter type mismatch"),
        }
    }
}

/// Reasons a persisted parameter image is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageError {
    /// Buffer shorter than the image size
    Truncated,
    /// Image was written by a different build
    VersionMismatch {
        /// Version this build expects
        expected: u32,
        /// Version found in the image
        found: u32,
    },
    /// Declared size does not match this build's layout
    SizeMismatch {
        /// Declared size found in the image
        found: u16,
    },
    /// Head or tail sentinel byte is wrong
    BadMagic,
    /// XOR checksum over values, names and types does not match
    ChecksumMismatch {
        /// Checksum recomputed from the image contents
        computed: u8,
        /// Checksum stored in the image
        stored: u8,
    },
    /// A type tag is neither INT32 nor FLOAT
    InvalidType {
        /// Index of the offending parameter
        index: usize,
    },
    /// A type tag differs from the parameter's compiled-in type
    TypeMismatch {
        /// Index of the offending parameter
        index: usize,
    },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Truncated => write!(f, "parameter image truncated"),
            ImageError::VersionMismatch { expected, found } => write!(
                f,
                "parameter image version 0x{:08X} (expected 0x{:08X})",
                found, expected
            ),
            ImageError::SizeMismatch { found } => {
                write!(f, "parameter image declares {} bytes", found)
            }
            ImageError::BadMagic => write!(f, "parameter image magic mismatch"),
            ImageError::ChecksumMismatch { computed, stored } => write!(
                f,
                "parameter image checksum 0x{:02X} (computed 0x{:02X})",
                stored, computed
            ),
            ImageError::InvalidType { index } => {
                write!(f, "parameter {} has an invalid type tag", index)
            }
            ImageError::TypeMismatch { index } => {
                write!(f, "parameter {} stored with the wrong type", index)
            }
        }
    }
}

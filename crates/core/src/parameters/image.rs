//! Persisted parameter image
//!
//! Binary layout (little-endian, fixed size):
//!
//! ```text
//! Offset  Size            Field
//! 0       4               format version (hash of the build identifier)
//! 4       2               declared image size
//! 6       1               head magic (0xBE)
//! 7       COUNT * 4       values
//! ..      COUNT * 16      names (zero padded)
//! ..      COUNT           type tags
//! ..      1               tail magic (0xEF)
//! ..      1               XOR checksum over values, names and types
//! ```
//!
//! An image is trusted only if every header field, both sentinels and the
//! checksum match, and every type tag agrees with the compiled-in catalogue.
//! Any mismatch rejects the whole image.

use super::checksum::calculate_xor8;
use super::error::ImageError;
use super::id::{ParamId, PARAM_COUNT, PARAM_NAME_LEN};
use super::table::{ParamName, ParamTable};
use super::value::{ParamType, ParamValue};

/// Head sentinel byte
pub const MAGIC_BE: u8 = 0xBE;

/// Tail sentinel byte
pub const MAGIC_EF: u8 = 0xEF;

const VERSION_OFFSET: usize = 0;
const SIZE_OFFSET: usize = 4;
const MAGIC_BE_OFFSET: usize = 6;
const VALUES_OFFSET: usize = 7;
const VALUES_LEN: usize = PARAM_COUNT * 4;
const NAMES_OFFSET: usize = VALUES_OFFSET + VALUES_LEN;
const NAMES_LEN: usize = PARAM_COUNT * PARAM_NAME_LEN;
const TYPES_OFFSET: usize = NAMES_OFFSET + NAMES_LEN;
const TYPES_LEN: usize = PARAM_COUNT;
const MAGIC_EF_OFFSET: usize = TYPES_OFFSET + TYPES_LEN;
const CHECKSUM_OFFSET: usize = MAGIC_EF_OFFSET + 1;

/// Total encoded size in bytes
pub const IMAGE_SIZE: usize = CHECKSUM_OFFSET + 1;

const _: () = assert!(IMAGE_SIZE <= u16::MAX as usize);

/// Header fields of an encoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    /// Format version
    pub version: u32,
    /// Declared size
    pub size: u16,
}

impl ImageHeader {
    /// Read the header without validating anything else
    pub fn parse(buf: &[u8]) -> Result<Self, ImageError> {
        if buf.len() < MAGIC_BE_OFFSET {
            return Err(ImageError::Truncated);
        }
        let version = u32::from_le_bytes([
            buf[VERSION_OFFSET],
            buf[VERSION_OFFSET + 1],
            buf[VERSION_OFFSET + 2],
            buf[VERSION_OFFSET + 3],
        ]);
        let size = u16::from_le_bytes([buf[SIZE_OFFSET], buf[SIZE_OFFSET + 1]]);
        Ok(Self { version, size })
    }
}

/// Derive the image format version from a build identifier (32-bit FNV-1a)
///
/// ```
/// use kestrel_core::parameters::image::format_version;
///
/// const V: u32 = format_version("kestrel-0.1.0");
/// assert_ne!(V, format_version("kestrel-0.1.1"));
/// assert_eq!(format_version(""), 0x811C_9DC5);
/// ```
pub const fn format_version(build_id: &str) -> u32 {
    const FNV_OFFSET: u32 = 0x811C_9DC5;
    const FNV_PRIME: u32 = 0x0100_0193;

    let bytes = build_id.as_bytes();
    let mut hash = FNV_OFFSET;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Serialize `table` into a complete image stamped with `version`
pub fn encode(table: &ParamTable, version: u32) -> [u8; IMAGE_SIZE] {
    let mut buf = [0u8; IMAGE_SIZE];

    buf[VERSION_OFFSET..VERSION_OFFSET + 4].copy_from_slice(&version.to_le_bytes());
    buf[SIZE_OFFSET..SIZE_OFFSET + 2].copy_from_slice(&(IMAGE_SIZE as u16).to_le_bytes());
    buf[MAGIC_BE_OFFSET] = MAGIC_BE;

    for (i, value) in table.values().iter().enumerate() {
        let offset = VALUES_OFFSET + i * 4;
        buf[offset..offset + 4].copy_from_slice(&value.to_bits().to_le_bytes());
    }
    for (i, name) in table.names().iter().enumerate() {
        let offset = NAMES_OFFSET + i * PARAM_NAME_LEN;
        buf[offset..offset + PARAM_NAME_LEN].copy_from_slice(name);
    }
    for (i, value) in table.values().iter().enumerate() {
        buf[TYPES_OFFSET + i] = value.param_type().tag();
    }

    buf[MAGIC_EF_OFFSET] = MAGIC_EF;
    buf[CHECKSUM_OFFSET] = calculate_xor8(&[
        &buf[VALUES_OFFSET..VALUES_OFFSET + VALUES_LEN],
        &buf[NAMES_OFFSET..NAMES_OFFSET + NAMES_LEN],
        &buf[TYPES_OFFSET..TYPES_OFFSET + TYPES_LEN],
    ]);
    buf
}

/// Validate and deserialize an image
///
/// # Errors
///
/// Returns the first failed check, in order: length, version, size, sentinels,
/// checksum, type tags. A well-formed tag that differs from the parameter's
/// compiled-in type is rejected with `ImageError::TypeMismatch`.
pub fn decode(buf: &[u8], expected_version: u32) -> Result<ParamTable, ImageError> {
    if buf.len() < IMAGE_SIZE {
        return Err(ImageError::Truncated);
    }

    let header = ImageHeader::parse(buf)?;
    if header.version != expected_version {
        return Err(ImageError::VersionMismatch {
            expected: expected_version,
            found: header.version,
        });
    }
    if header.size as usize != IMAGE_SIZE {
        return Err(ImageError::SizeMismatch { found: header.size });
    }
    if buf[MAGIC_BE_OFFSET] != MAGIC_BE || buf[MAGIC_EF_OFFSET] != MAGIC_EF {
        return Err(ImageError::BadMagic);
    }

    let values_region = &buf[VALUES_OFFSET..VALUES_OFFSET + VALUES_LEN];
    let names_region = &buf[NAMES_OFFSET..NAMES_OFFSET + NAMES_LEN];
    let types_region = &buf[TYPES_OFFSET..TYPES_OFFSET + TYPES_LEN];

    let computed = calculate_xor8(&[values_region, names_region, types_region]);
    let stored = buf[CHECKSUM_OFFSET];
    if computed != stored {
        return Err(ImageError::ChecksumMismatch { computed, stored });
    }

    let mut values = [ParamValue::Int32(0); PARAM_COUNT];
    let mut names: [ParamName; PARAM_COUNT] = [[0; PARAM_NAME_LEN]; PARAM_COUNT];

    for (index, slot) in values.iter_mut().enumerate() {
        let param_type =
            ParamType::from_tag(types_region[index]).ok_or(ImageError::InvalidType { index })?;
        if param_type != ParamId::ALL[index].default_value().param_type() {
            return Err(ImageError::TypeMismatch { index });
        }
        let raw = &values_region[index * 4..index * 4 + 4];
        let bits = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
        *slot = ParamValue::from_bits(bits, param_type);
    }
    for (index, name) in names.iter_mut().enumerate() {
        let offset = index * PARAM_NAME_LEN;
        name.copy_from_slice(&names_region[offset..offset + PARAM_NAME_LEN]);
    }

    Ok(ParamTable::from_parts(values, names))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSION: u32 = format_version("test-build");

    fn modified_table() -> ParamTable {
        let mut table = ParamTable::new();
        table.set(ParamId::SysId, ParamValue::Int32(42)).unwrap();
        table
            .set(ParamId::GyroZBias, ParamValue::Float(-0.0123))
            .unwrap();
        table
            .set(ParamId::MagA12Comp, ParamValue::Float(0.031))
            .unwrap();
        table
            .set(ParamId::MotorPwmRate, ParamValue::Int32(-1))
            .unwrap();
        table
    }

    #[test]
    fn test_layout_size() {
        assert_eq!(IMAGE_SIZE, 4 + 2 + 1 + 48 * 4 + 48 * 16 + 48 + 1 + 1);
        assert_eq!(IMAGE_SIZE, 1017);
    }

    #[test]
    fn test_encoded_header_fields() {
        let image = encode(&ParamTable::new(), VERSION);
        let header = ImageHeader::parse(&image).unwrap();
        assert_eq!(header.version, VERSION);
        assert_eq!(header.size as usize, IMAGE_SIZE);
        assert_eq!(image[MAGIC_BE_OFFSET], MAGIC_BE);
        assert_eq!(image[MAGIC_EF_OFFSET], MAGIC_EF);
        assert_eq!(&image[NAMES_OFFSET..NAMES_OFFSET + 6], b"SYS_ID");
        assert_eq!(image[TYPES_OFFSET], ParamType::Int32.tag());
        assert_eq!(
            image[TYPES_OFFSET + ParamId::AccelScale.index()],
            ParamType::Float.tag()
        );
    }

    #[test]
    fn test_round_trip_preserves_values_and_types() {
        let table = modified_table();
        let decoded = decode(&encode(&table, VERSION), VERSION).unwrap();
        assert_eq!(decoded, table);
        assert_eq!(decoded.get(ParamId::SysId), ParamValue::Int32(42));
        assert_eq!(
            decoded.get(ParamId::GyroZBias),
            ParamValue::Float(-0.0123)
        );
        assert_eq!(decoded.lookup("MAG_A12_COMP"), Some(ParamId::MagA12Comp));
    }

    #[test]
    fn test_every_single_byte_flip_is_rejected() {
        let image = encode(&modified_table(), VERSION);
        for offset in 0..IMAGE_SIZE {
            let mut corrupted = image;
            corrupted[offset] ^= 0x01;
            assert!(
                decode(&corrupted, VERSION).is_err(),
                "flip at offset {} accepted",
                offset
            );
        }
    }

    #[test]
    fn test_rejects_other_build_version() {
        let other = format_version("other-build");
        let image = encode(&ParamTable::new(), other);
        assert_eq!(
            decode(&image, VERSION),
            Err(ImageError::VersionMismatch {
                expected: VERSION,
                found: other,
            })
        );
    }

    #[test]
    fn test_rejects_truncated_and_erased() {
        let image = encode(&ParamTable::new(), VERSION);
        assert_eq!(
            decode(&image[..IMAGE_SIZE - 1], VERSION),
            Err(ImageError::Truncated)
        );

        let erased = [0xFFu8; IMAGE_SIZE];
        assert!(matches!(
            decode(&erased, VERSION),
            Err(ImageError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_size_and_magic() {
        let mut image = encode(&ParamTable::new(), VERSION);
        image[SIZE_OFFSET] = 0;
        assert!(matches!(
            decode(&image, VERSION),
            Err(ImageError::SizeMismatch { .. })
        ));

        let mut image = encode(&ParamTable::new(), VERSION);
        image[MAGIC_EF_OFFSET] = 0x00;
        assert_eq!(decode(&image, VERSION), Err(ImageError::BadMagic));
    }

    #[test]
    fn test_invalid_type_with_consistent_checksum() {
        let mut image = encode(&ParamTable::new(), VERSION);
        // Tag 0 -> 2 and fix up the checksum by the same delta
        image[TYPES_OFFSET + 3] ^= 0x02;
        image[CHECKSUM_OFFSET] ^= 0x02;
        assert_eq!(
            decode(&image, VERSION),
            Err(ImageError::InvalidType { index: 3 })
        );
    }

    #[test]
    fn test_rejects_type_differing_from_catalogue() {
        let mut image = encode(&ParamTable::new(), VERSION);
        let index = ParamId::GyroXBias.index();
        assert_eq!(image[TYPES_OFFSET + index], ParamType::Float.tag());

        // Well-formed Int32 tag with the checksum kept consistent
        let delta = ParamType::Float.tag() ^ ParamType::Int32.tag();
        image[TYPES_OFFSET + index] ^= delta;
        image[CHECKSUM_OFFSET] ^= delta;

        assert_eq!(
            decode(&image, VERSION),
            Err(ImageError::TypeMismatch { index })
        );
    }

    #[test]
    fn test_format_version_depends_on_every_byte() {
        assert_ne!(format_version("abc"), format_version("abd"));
        assert_ne!(format_version("abc"), format_version("ab"));
    }
}

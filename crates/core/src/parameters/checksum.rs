//! 8-bit XOR checksum for the persisted parameter image
//!
//! The checksum folds every byte of the given regions together, in order.
//! Any single corrupted byte changes the result.

/// XOR all bytes of `regions` into one byte
///
/// # Example
///
/// ```
/// use kestrel_core::parameters::checksum::calculate_xor8;
///
/// assert_eq!(calculate_xor8(&[&[0x0F, 0xF0], &[0x01]]), 0xFE);
/// ```
pub fn calculate_xor8(regions: &[&[u8]]) -> u8 {
    regions
        .iter()
        .flat_map(|region| region.iter())
        .fold(0u8, |acc, byte| acc ^ byte)
}

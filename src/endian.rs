//! Little-endian integer decoding
//!
//! Pure conversion helpers for the fixed-width binary fields found in
//! container headers. No I/O and no shared state; these are plain functions
//! over byte slices so they stay reusable for other fixed-width fields in
//! adjacent tag parsing.

/// Decode a little-endian unsigned integer from `bytes`.
///
/// The first byte is the least significant: `value = Σ bytes[i] * 256^i`.
/// Works for any slice length. Slices longer than 8 bytes exceed the width of
/// `u64`; the high-order bytes past index 7 are ignored (truncation), which
/// is a documented limitation rather than a panic.
pub fn decode_le(bytes: &[u8]) -> u64 {
    let mut value: u64 = 0;
    for (i, &b) in bytes.iter().take(8).enumerate() {
        value |= (b as u64) << (8 * i);
    }
    value
}

/// Encode `value` as `width` little-endian bytes, the inverse of [`decode_le`]
/// for widths up to 8. Values wider than `width` bytes are truncated to fit.
pub fn encode_le(value: u64, width: usize) -> Vec<u8> {
    (0..width)
        .map(|i| if i < 8 { (value >> (8 * i)) as u8 } else { 0 })
        .collect()
}

//! Unsigned LEB128-style varints: 7 payload bits per byte, least
//! significant group first, high bit set on every byte but the last.

use clout_types::error::CloutError;

/// Maximum encoded length of a `u64`.
pub const MAX_UVARINT_LEN: usize = 10;

/// Encode `value` as an unsigned varint.
pub fn encode_uvarint(mut value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_UVARINT_LEN);
    while value >= 0x80 {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
    out
}

/// Decode an unsigned varint from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed.
pub fn decode_uvarint(bytes: &[u8]) -> Result<(u64, usize), CloutError> {
    let mut value: u64 = 0;
    for (i, &byte) in bytes.iter().enumerate().take(MAX_UVARINT_LEN) {
        let payload = u64::from(byte & 0x7f);
        let shift = 7 * i as u32;
        // The tenth byte may only carry the top bit of a u64.
        if i == MAX_UVARINT_LEN - 1 && byte > 1 {
            return Err(CloutError::signing("varint overflows 64 bits"));
        }
        value |= payload << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    if bytes.len() >= MAX_UVARINT_LEN {
        Err(CloutError::signing("varint overflows 64 bits"))
    } else {
        Err(CloutError::signing("truncated varint"))
    }
}

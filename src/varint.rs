//! Variable-length 7-bit unsigned integer codec.
//!
//! Each byte carries a continuation bit (MSB) and 7 data bits, least
//! significant group first, last byte with continuation = 0. This is the
//! unsigned LEB128 layout; no zigzag transform is applied at this layer.

use crate::{Error, Result};

/// Decodes a varint at `offset`. Returns `(bytes_consumed, value)`.
#[inline]
pub fn decode_varint(buff: &[u8], offset: usize) -> Result<(usize, u64)> {
    let first = *buff
        .get(offset)
        .ok_or_else(|| Error::short(offset, 1, buff.len()))?;
    if first & 0x80 == 0 {
        // Fast path: single byte (the common case for counts and lengths)
        return Ok((1, u64::from(first)));
    }
    let mut result = u64::from(first & 0x7F);
    let mut shift: u32 = 7;
    let mut size = 1;
    loop {
        let byte = *buff
            .get(offset + size)
            .ok_or_else(|| Error::short(offset + size, 1, buff.len()))?;
        size += 1;
        let data = u64::from(byte & 0x7F);
        // At shift 63 (the 10th byte) only data bit 0 fits in a u64, and no
        // continuation byte may follow.
        if shift == 63 && (data > 1 || byte & 0x80 != 0) {
            return Err(Error::VarintOverflow { offset });
        }
        result |= data << shift;
        if byte & 0x80 == 0 {
            return Ok((size, result));
        }
        shift += 7;
    }
}

/// Encodes `value` as a varint at `offset`. Returns bytes written.
/// Zero encodes as exactly one `0x00` byte.
#[inline]
pub fn encode_varint(buff: &mut [u8], offset: usize, value: u64) -> Result<usize> {
    let needed = varint_size(value);
    if buff.len() < offset + needed {
        return Err(Error::short(offset, needed, buff.len()));
    }
    if value < 128 {
        // Fast path: single byte
        buff[offset] = value as u8;
        return Ok(1);
    }
    let mut v = value;
    let mut size = 0;
    loop {
        let low7 = (v & 0x7F) as u8;
        v >>= 7;
        if v == 0 {
            buff[offset + size] = low7;
            return Ok(size + 1);
        }
        buff[offset + size] = 0x80 | low7;
        size += 1;
    }
}

/// Encoded size of `value` in bytes (1..=10). Used by the encode pre-pass
/// to bounds-check before any byte is written.
#[inline]
pub(crate) fn varint_size(value: u64) -> usize {
    if value == 0 {
        return 1;
    }
    (64 - value.leading_zeros() as usize).div_ceil(7)
}

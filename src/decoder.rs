//! Format-string driven decoding.
//!
//! The walker is a pure function of (tokens, buffer, offset): it threads the
//! offset through every call and returns it updated, never storing a cursor
//! on the buffer. Array tokens read a 4-byte big-endian element count and
//! repeat the inner walk; `S`/`Y` read a signed length prefix with -1 as the
//! Kafka null marker; `V` defers to the varint leaf codec.

use log::trace;

use crate::format::{self, Token};
use crate::varint::decode_varint;
use crate::{primitive, Error, Result, Value};

/// Decodes `buff` at `offset` according to `fmt`.
///
/// Returns the decoded value sequence, one entry per value-producing token.
/// When the whole format string is a single `[...]` group, the result is
/// unwrapped one level so a whole-message array decodes to its elements
/// directly rather than to a one-element wrapper.
///
/// # Examples
///
/// ```
/// use kpack::{decode, Value};
///
/// // count=2, then two big-endian INT32s
/// let buff = [0, 0, 0, 2, 0, 0, 0, 5, 0, 0, 0, 6];
/// let values = decode("[i]", &buff, 0)?;
/// assert_eq!(values, vec![Value::I32(5), Value::I32(6)]);
/// # Ok::<(), kpack::Error>(())
/// ```
pub fn decode(fmt: &str, buff: &[u8], offset: usize) -> Result<Vec<Value>> {
    let tokens = format::parse(fmt)?;
    trace!("decode fmt={fmt:?} offset={offset} len={}", buff.len());
    let (items, _) = unpack_tokens(&tokens, buff, offset)?;
    Ok(unwrap_singleton(&tokens, items))
}

/// The top-level call walks the format as one implicit repetition, so a
/// format that is nothing but one array group comes back as a one-element
/// sequence wrapping the real payload. This post-processing step undoes
/// that wrapper in the single place it can occur.
fn unwrap_singleton(tokens: &[Token], mut items: Vec<Value>) -> Vec<Value> {
    if tokens.len() == 1 && matches!(tokens[0], Token::Array(_)) && items.len() == 1 {
        if let Some(Value::Array(seq)) = items.pop() {
            return seq;
        }
    }
    items
}

/// Recursive walker: decodes one pass over `tokens` starting at `offset`,
/// returning the accumulated values and the updated offset.
fn unpack_tokens(tokens: &[Token], buff: &[u8], mut offset: usize) -> Result<(Vec<Value>, usize)> {
    let mut items = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token {
            Token::Array(inner) => {
                let count = read_count(buff, offset)?;
                offset += 4;
                let (seq, new_offset) = unpack_array(inner, buff, offset, count)?;
                offset = new_offset;
                items.push(Value::Array(seq));
            }
            Token::Varint => {
                let (size, value) = decode_varint(buff, offset)?;
                offset += size;
                items.push(Value::U64(value));
            }
            Token::Str => offset = unpack_prefixed(buff, offset, 'S', &mut items)?,
            Token::Bytes => offset = unpack_prefixed(buff, offset, 'Y', &mut items)?,
            Token::Primitive(p) => {
                let (value, size) = primitive::read(*p, buff, offset)?;
                offset += size;
                if let Some(value) = value {
                    items.push(value);
                }
            }
        }
    }
    Ok((items, offset))
}

/// Decodes `count` repetitions of `inner`, each starting where the previous
/// ended. Single-token inner formats flatten one level: each repetition's
/// one-element tuple becomes a bare scalar, matching the whole-message
/// unwrap rule at the entry point.
fn unpack_array(
    inner: &[Token],
    buff: &[u8],
    mut offset: usize,
    count: usize,
) -> Result<(Vec<Value>, usize)> {
    // An empty group consumes no bytes, so its count selects nothing.
    if inner.is_empty() {
        return Ok((Vec::new(), offset));
    }
    // Capacity is clamped so a hostile count cannot force a huge
    // pre-allocation before the short-buffer error surfaces.
    let mut output = Vec::with_capacity(count.min(buff.len().saturating_sub(offset)));
    let flatten = inner.len() == 1 && !matches!(inner[0], Token::Array(_));
    for _ in 0..count {
        let (items, new_offset) = unpack_tokens(inner, buff, offset)?;
        offset = new_offset;
        if flatten {
            output.extend(items);
        } else {
            output.push(Value::Array(items));
        }
    }
    Ok((output, offset))
}

/// Reads a 4-byte big-endian array element count. Kafka encodes a null
/// array as count -1; like any negative count it decodes as empty.
fn read_count(buff: &[u8], offset: usize) -> Result<usize> {
    let bytes = primitive::take(buff, offset, 4)?;
    let count = i32::from_be_bytes(bytes.try_into().expect("take() returned 4 bytes"));
    Ok(usize::try_from(count).unwrap_or(0))
}

/// Decodes one `S` (INT16 length) or `Y` (INT32 length) field, pushing the
/// payload or the absent marker, and returns the updated offset.
fn unpack_prefixed(buff: &[u8], offset: usize, token: char, items: &mut Vec<Value>) -> Result<usize> {
    let (length, prefix_size) = if token == 'S' {
        let bytes = primitive::take(buff, offset, 2)?;
        let len = i16::from_be_bytes(bytes.try_into().expect("take() returned 2 bytes"));
        (i32::from(len), 2)
    } else {
        let bytes = primitive::take(buff, offset, 4)?;
        (i32::from_be_bytes(bytes.try_into().expect("take() returned 4 bytes")), 4)
    };
    let offset = offset + prefix_size;
    if length == -1 {
        // Null field: only the prefix is consumed.
        items.push(Value::Null);
        return Ok(offset);
    }
    if length < 0 {
        return Err(Error::InvalidLength { token, length, offset: offset - prefix_size });
    }
    let payload = primitive::take(buff, offset, length as usize)?;
    items.push(Value::Bytes(payload.to_vec()));
    Ok(offset + length as usize)
}

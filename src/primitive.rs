//! Fixed-width primitive reads and writes.
//!
//! Every access is big-endian: Kafka's wire format is network order
//! regardless of any order marker in the format string, so byte order is a
//! policy of these helpers rather than per-call state. All accesses are
//! bounds-checked against the borrowed buffer before touching it.

use crate::format::Primitive;
use crate::{Error, Result, Value};

/// Borrows `n` bytes at `offset`, or fails with a short-buffer error.
pub(crate) fn take(buff: &[u8], offset: usize, n: usize) -> Result<&[u8]> {
    match buff.get(offset..offset + n) {
        Some(bytes) => Ok(bytes),
        None => Err(Error::short(offset, n, buff.len())),
    }
}

/// Copies `bytes` into the buffer at `offset`, or fails without writing.
pub(crate) fn put(buff: &mut [u8], offset: usize, bytes: &[u8]) -> Result<()> {
    let len = buff.len();
    match buff.get_mut(offset..offset + bytes.len()) {
        Some(dst) => {
            dst.copy_from_slice(bytes);
            Ok(())
        }
        None => Err(Error::short(offset, bytes.len(), len)),
    }
}

macro_rules! read_be {
    ($ty:ty, $buff:expr, $offset:expr) => {{
        let bytes = take($buff, $offset, core::mem::size_of::<$ty>())?;
        <$ty>::from_be_bytes(bytes.try_into().expect("take() returned exact length"))
    }};
}

/// Reads one primitive at `offset`. Returns the decoded value (`None` for
/// padding) and the fixed number of bytes consumed.
pub(crate) fn read(p: Primitive, buff: &[u8], offset: usize) -> Result<(Option<Value>, usize)> {
    let value = match p {
        Primitive::Pad => {
            take(buff, offset, 1)?;
            None
        }
        Primitive::Char => Some(Value::Bytes(vec![read_be!(u8, buff, offset)])),
        Primitive::Bool => Some(Value::Bool(read_be!(u8, buff, offset) != 0)),
        Primitive::I8 => Some(Value::I8(read_be!(i8, buff, offset))),
        Primitive::U8 => Some(Value::U8(read_be!(u8, buff, offset))),
        Primitive::I16 => Some(Value::I16(read_be!(i16, buff, offset))),
        Primitive::U16 => Some(Value::U16(read_be!(u16, buff, offset))),
        Primitive::I32 => Some(Value::I32(read_be!(i32, buff, offset))),
        Primitive::U32 => Some(Value::U32(read_be!(u32, buff, offset))),
        Primitive::I64 => Some(Value::I64(read_be!(i64, buff, offset))),
        Primitive::U64 => Some(Value::U64(read_be!(u64, buff, offset))),
        Primitive::F32 => Some(Value::F32(read_be!(f32, buff, offset))),
        Primitive::F64 => Some(Value::F64(read_be!(f64, buff, offset))),
    };
    Ok((value, p.size()))
}

fn type_mismatch(p: Primitive, value: &Value) -> Error {
    Error::ValueType {
        token: p.code(),
        expected: expected_name(p),
        found: value.type_name(),
    }
}

fn expected_name(p: Primitive) -> &'static str {
    match p {
        Primitive::Pad => "no argument",
        Primitive::Char => "Bytes of length 1",
        Primitive::Bool => "Bool",
        Primitive::I8 => "I8",
        Primitive::U8 => "U8",
        Primitive::I16 => "I16",
        Primitive::U16 => "U16",
        Primitive::I32 => "I32",
        Primitive::U32 => "U32",
        Primitive::I64 => "I64",
        Primitive::U64 => "U64",
        Primitive::F32 => "F32",
        Primitive::F64 => "F64",
    }
}

/// Validates that `value`'s variant matches the primitive token without
/// writing anything. Used by the encode pre-pass so type errors surface
/// before any byte of the buffer is mutated.
pub(crate) fn check(p: Primitive, value: &Value) -> Result<()> {
    let ok = match (p, value) {
        (Primitive::Char, Value::Bytes(b)) => b.len() == 1,
        (Primitive::Bool, Value::Bool(_))
        | (Primitive::I8, Value::I8(_))
        | (Primitive::U8, Value::U8(_))
        | (Primitive::I16, Value::I16(_))
        | (Primitive::U16, Value::U16(_))
        | (Primitive::I32, Value::I32(_))
        | (Primitive::U32, Value::U32(_))
        | (Primitive::I64, Value::I64(_))
        | (Primitive::U64, Value::U64(_))
        | (Primitive::F32, Value::F32(_))
        | (Primitive::F64, Value::F64(_)) => true,
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(type_mismatch(p, value))
    }
}

/// Writes one primitive at `offset` and returns its fixed size.
/// `Pad` is written by the encoder directly and never reaches here.
pub(crate) fn write(p: Primitive, buff: &mut [u8], offset: usize, value: &Value) -> Result<usize> {
    match (p, value) {
        (Primitive::Char, Value::Bytes(b)) if b.len() == 1 => put(buff, offset, b)?,
        (Primitive::Bool, Value::Bool(v)) => put(buff, offset, &[u8::from(*v)])?,
        (Primitive::I8, Value::I8(v)) => put(buff, offset, &v.to_be_bytes())?,
        (Primitive::U8, Value::U8(v)) => put(buff, offset, &v.to_be_bytes())?,
        (Primitive::I16, Value::I16(v)) => put(buff, offset, &v.to_be_bytes())?,
        (Primitive::U16, Value::U16(v)) => put(buff, offset, &v.to_be_bytes())?,
        (Primitive::I32, Value::I32(v)) => put(buff, offset, &v.to_be_bytes())?,
        (Primitive::U32, Value::U32(v)) => put(buff, offset, &v.to_be_bytes())?,
        (Primitive::I64, Value::I64(v)) => put(buff, offset, &v.to_be_bytes())?,
        (Primitive::U64, Value::U64(v)) => put(buff, offset, &v.to_be_bytes())?,
        (Primitive::F32, Value::F32(v)) => put(buff, offset, &v.to_be_bytes())?,
        (Primitive::F64, Value::F64(v)) => put(buff, offset, &v.to_be_bytes())?,
        _ => return Err(type_mismatch(p, value)),
    }
    Ok(p.size())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_i32_big_endian() {
        let buff = [0x00, 0x00, 0x01, 0x2C];
        let (value, size) = read(Primitive::I32, &buff, 0).unwrap();
        assert_eq!(value, Some(Value::I32(300)));
        assert_eq!(size, 4);
    }

    #[test]
    fn read_i16_negative() {
        let buff = [0xFF, 0xFF];
        let (value, _) = read(Primitive::I16, &buff, 0).unwrap();
        assert_eq!(value, Some(Value::I16(-1)));
    }

    #[test]
    fn read_at_offset() {
        let buff = [0xAA, 0xAA, 0x00, 0x2A];
        let (value, _) = read(Primitive::I16, &buff, 2).unwrap();
        assert_eq!(value, Some(Value::I16(42)));
    }

    #[test]
    fn read_pad_produces_no_value() {
        let (value, size) = read(Primitive::Pad, &[0xFF], 0).unwrap();
        assert_eq!(value, None);
        assert_eq!(size, 1);
    }

    #[test]
    fn read_pad_still_checks_bounds() {
        assert_eq!(
            read(Primitive::Pad, &[], 0),
            Err(Error::ShortBuffer { offset: 0, needed: 1, remaining: 0 })
        );
    }

    #[test]
    fn read_short_buffer() {
        let buff = [0x00, 0x01];
        assert_eq!(
            read(Primitive::I64, &buff, 1),
            Err(Error::ShortBuffer { offset: 1, needed: 8, remaining: 1 })
        );
    }

    #[test]
    fn write_q_big_endian() {
        let mut buff = [0u8; 8];
        let size = write(Primitive::I64, &mut buff, 0, &Value::I64(-2)).unwrap();
        assert_eq!(size, 8);
        assert_eq!(buff, [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE]);
    }

    #[test]
    fn write_then_read_every_width() {
        let cases = [
            (Primitive::Bool, Value::Bool(true)),
            (Primitive::I8, Value::I8(-5)),
            (Primitive::U8, Value::U8(200)),
            (Primitive::I16, Value::I16(-300)),
            (Primitive::U16, Value::U16(60000)),
            (Primitive::I32, Value::I32(-70000)),
            (Primitive::U32, Value::U32(3_000_000_000)),
            (Primitive::I64, Value::I64(i64::MIN)),
            (Primitive::U64, Value::U64(u64::MAX)),
            (Primitive::F32, Value::F32(1.5)),
            (Primitive::F64, Value::F64(-0.25)),
            (Primitive::Char, Value::Bytes(vec![b'k'])),
        ];
        let mut buff = [0u8; 8];
        for (p, v) in cases {
            let size = write(p, &mut buff, 0, &v).unwrap();
            assert_eq!(size, p.size());
            let (back, consumed) = read(p, &buff, 0).unwrap();
            assert_eq!(back.as_ref(), Some(&v), "token '{}'", p.code());
            assert_eq!(consumed, size);
        }
    }

    #[test]
    fn write_type_mismatch() {
        let mut buff = [0u8; 4];
        let err = write(Primitive::I32, &mut buff, 0, &Value::U32(1)).unwrap_err();
        assert_eq!(
            err,
            Error::ValueType { token: 'i', expected: "I32", found: "U32" }
        );
        // nothing written
        assert_eq!(buff, [0u8; 4]);
    }

    #[test]
    fn write_short_buffer_leaves_buffer_untouched() {
        let mut buff = [0u8; 3];
        let err = write(Primitive::I32, &mut buff, 0, &Value::I32(1)).unwrap_err();
        assert!(matches!(err, Error::ShortBuffer { needed: 4, .. }));
        assert_eq!(buff, [0u8; 3]);
    }

    #[test]
    fn check_agrees_with_write() {
        assert!(check(Primitive::I32, &Value::I32(0)).is_ok());
        assert!(check(Primitive::Char, &Value::Bytes(vec![1, 2])).is_err());
        assert!(check(Primitive::F32, &Value::F64(0.0)).is_err());
    }
}

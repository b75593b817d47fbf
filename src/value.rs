//! The decoded value tree.
//!
//! Decoding produces an ordered sequence of [`Value`]s mirroring the format
//! string: one scalar per primitive token, [`Value::Bytes`] for `S`/`Y`
//! payloads, [`Value::Null`] for absent (-1 length) fields, [`Value::U64`]
//! for varints, and one [`Value::Array`] nesting level per `[...]` group.
//! The same enum carries encode arguments.

/// A single decoded value or encode argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent marker: an `S`/`Y` field whose length prefix was -1.
    Null,
    Bool(bool),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    /// Raw payload of an `S`/`Y` field or a `c`/`s` byte.
    Bytes(Vec<u8>),
    /// One `[...]` nesting level.
    Array(Vec<Value>),
}

impl Value {
    /// Variant name for error reporting.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::I8(_) => "I8",
            Self::U8(_) => "U8",
            Self::I16(_) => "I16",
            Self::U16(_) => "U16",
            Self::I32(_) => "I32",
            Self::U32(_) => "U32",
            Self::I64(_) => "I64",
            Self::U64(_) => "U64",
            Self::F32(_) => "F32",
            Self::F64(_) => "F64",
            Self::Bytes(_) => "Bytes",
            Self::Array(_) => "Array",
        }
    }

    /// Coerces any non-negative integer variant to a varint payload.
    /// Returns `None` for negative values and non-integer variants; varints
    /// on the wire are unsigned (no zigzag).
    pub fn as_varint(&self) -> Option<u64> {
        match *self {
            Self::U8(v) => Some(u64::from(v)),
            Self::U16(v) => Some(u64::from(v)),
            Self::U32(v) => Some(u64::from(v)),
            Self::U64(v) => Some(v),
            Self::I8(v) => u64::try_from(v).ok(),
            Self::I16(v) => u64::try_from(v).ok(),
            Self::I32(v) => u64::try_from(v).ok(),
            Self::I64(v) => u64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Borrows the payload of a `Bytes` value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Borrows the elements of an `Array` value.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// True for the absent marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Self::Bytes(b.to_vec())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Bytes(s.as_bytes().to_vec())
    }
}

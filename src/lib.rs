//! kpack — Kafka wire-format codec driven by struct-style format strings.
//!
//! Decoding and encoding share one format mini-language: the usual
//! fixed-width codes (`b`, `h`, `i`, `q`, ...) extended with `S`
//! (INT16-length string), `Y` (INT32-length bytes), `V` (unsigned varint)
//! and `[...]` (INT32-count array). Spaces in formats are ignored, and the
//! wire is always big-endian. Buffers stay caller-owned: every call takes a
//! borrowed byte slice plus an offset and returns the bytes it consumed or
//! produced, with no state kept between calls.
//!
//! # Example
//!
//! ```
//! use kpack::{decode, encode, Value};
//!
//! // A produce-style body: partition, varint record count, leader epoch.
//! let mut buff = [0u8; 16];
//! let written = encode("iVi", &mut buff, 0, &[
//!     Value::I32(1),
//!     Value::U64(300),
//!     Value::I32(2),
//! ])?;
//! assert_eq!(written, 10);
//!
//! let values = decode("iVi", &buff[..written], 0)?;
//! assert_eq!(values, vec![Value::I32(1), Value::U64(300), Value::I32(2)]);
//! # Ok::<(), kpack::Error>(())
//! ```

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod format;
mod primitive;
pub mod value;
pub mod varint;

pub use decoder::decode;
pub use encoder::encode;
pub use error::{Error, Result};
pub use value::Value;
pub use varint::{decode_varint, encode_varint};

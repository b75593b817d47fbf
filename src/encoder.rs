//! Format-string driven encoding.
//!
//! Encode covers fixed-width primitive runs and varint slots only; `[`,
//! `S` and `Y` are decode-side constructs here and are rejected up front
//! (richer encode shapes are layered on top by the protocol message
//! builders, not by this codec).
//!
//! Encoding is two-pass: the first pass binds arguments to tokens,
//! validates their types and computes the exact byte size; the buffer is
//! only touched once the whole operation is known to fit. Argument-count,
//! type and short-buffer errors therefore never leave a partially-written
//! buffer behind.

use log::trace;

use crate::format::{self, Primitive, Token};
use crate::varint::{encode_varint, varint_size};
use crate::{primitive, Error, Result, Value};

/// One validated write, produced by the sizing pass.
enum Op<'a> {
    /// `x` — one zero byte, no argument.
    Pad,
    /// A fixed-width primitive bound to its argument.
    Fixed(Primitive, &'a Value),
    /// A varint slot with its argument already coerced.
    Varint(u64),
}

/// Encodes `args` into `buff` at `offset` according to `fmt`.
///
/// Arguments are consumed positionally, one per value-taking token
/// (`x` consumes none and writes a zero byte). Surplus arguments are
/// ignored; too few fail with [`Error::ArgumentCount`]. Returns the total
/// bytes written.
///
/// # Examples
///
/// ```
/// use kpack::{encode, Value};
///
/// let mut buff = [0u8; 10];
/// let written = encode("iVi", &mut buff, 0, &[
///     Value::I32(1),
///     Value::U64(300),
///     Value::I32(2),
/// ])?;
/// assert_eq!(written, 10);
/// assert_eq!(&buff[4..6], &[0xAC, 0x02]); // varint 300
/// # Ok::<(), kpack::Error>(())
/// ```
pub fn encode(fmt: &str, buff: &mut [u8], offset: usize, args: &[Value]) -> Result<usize> {
    let tokens = format::parse(fmt)?;
    trace!("encode fmt={fmt:?} offset={offset} args={}", args.len());

    let (ops, size) = plan(&tokens, args)?;
    if buff.len() < offset + size {
        return Err(Error::short(offset, size, buff.len()));
    }

    let mut pos = offset;
    for op in ops {
        pos += match op {
            Op::Pad => {
                buff[pos] = 0;
                1
            }
            Op::Fixed(p, value) => primitive::write(p, buff, pos, value)?,
            Op::Varint(v) => encode_varint(buff, pos, v)?,
        };
    }
    Ok(pos - offset)
}

/// Sizing pass: binds each token to its argument, validates, and returns
/// the write plan with the total encoded size. Touches no buffer.
fn plan<'a>(tokens: &[Token], args: &'a [Value]) -> Result<(Vec<Op<'a>>, usize)> {
    let required = tokens
        .iter()
        .filter(|t| match t {
            Token::Primitive(p) => p.takes_arg(),
            Token::Varint => true,
            _ => false,
        })
        .count();
    if args.len() < required {
        return Err(Error::ArgumentCount { required, supplied: args.len() });
    }

    let mut ops = Vec::with_capacity(tokens.len());
    let mut size = 0;
    let mut next = 0;
    for token in tokens {
        match token {
            Token::Array(_) | Token::Str | Token::Bytes => {
                return Err(Error::UnsupportedToken { token: token.code() });
            }
            Token::Primitive(Primitive::Pad) => {
                ops.push(Op::Pad);
                size += 1;
            }
            Token::Primitive(p) => {
                let value = &args[next];
                next += 1;
                primitive::check(*p, value)?;
                ops.push(Op::Fixed(*p, value));
                size += p.size();
            }
            Token::Varint => {
                let value = &args[next];
                next += 1;
                let v = value.as_varint().ok_or(Error::ValueType {
                    token: 'V',
                    expected: "non-negative integer",
                    found: value.type_name(),
                })?;
                ops.push(Op::Varint(v));
                size += varint_size(v);
            }
        }
    }
    Ok((ops, size))
}

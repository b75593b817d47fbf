//! Format-string grammar and tokenizer.
//!
//! The format mini-language extends the usual struct pack codes with three
//! Kafka constructs: `S` (INT16-length string), `Y` (INT32-length bytes) and
//! `V` (unsigned varint), plus `[...]` for INT32-count arrays. ASCII
//! whitespace is ignored. A leading `!`, `>` or `<` order marker is stripped
//! and ignored: the wire is always network (big-endian) order.
//!
//! Tokenizing is a single validation pass. The decode and encode walkers
//! operate on the resulting token list and never re-inspect raw characters,
//! so unknown tokens and unbalanced brackets are rejected here, up front.

use crate::{Error, Result};

/// A fixed-width primitive format code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// `x` — one pad byte, consumes/produces no value.
    Pad,
    /// `c` / `s` — one raw byte, decoded as a 1-byte [`Value::Bytes`](crate::Value::Bytes).
    Char,
    /// `?` — one byte, zero = false.
    Bool,
    /// `b`
    I8,
    /// `B`
    U8,
    /// `h`
    I16,
    /// `H`
    U16,
    /// `i` / `l`
    I32,
    /// `I` / `L`
    U32,
    /// `q`
    I64,
    /// `Q`
    U64,
    /// `f`
    F32,
    /// `d`
    F64,
}

impl Primitive {
    /// Maps a format character to its primitive, if it is one.
    pub fn from_code(ch: char) -> Option<Self> {
        match ch {
            'x' => Some(Self::Pad),
            'c' | 's' => Some(Self::Char),
            '?' => Some(Self::Bool),
            'b' => Some(Self::I8),
            'B' => Some(Self::U8),
            'h' => Some(Self::I16),
            'H' => Some(Self::U16),
            'i' | 'l' => Some(Self::I32),
            'I' | 'L' => Some(Self::U32),
            'q' => Some(Self::I64),
            'Q' => Some(Self::U64),
            'f' => Some(Self::F32),
            'd' => Some(Self::F64),
            _ => None,
        }
    }

    /// Canonical format character for this primitive.
    pub fn code(self) -> char {
        match self {
            Self::Pad => 'x',
            Self::Char => 'c',
            Self::Bool => '?',
            Self::I8 => 'b',
            Self::U8 => 'B',
            Self::I16 => 'h',
            Self::U16 => 'H',
            Self::I32 => 'i',
            Self::U32 => 'I',
            Self::I64 => 'q',
            Self::U64 => 'Q',
            Self::F32 => 'f',
            Self::F64 => 'd',
        }
    }

    /// Fixed wire size in bytes.
    pub fn size(self) -> usize {
        match self {
            Self::Pad | Self::Char | Self::Bool | Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
        }
    }

    /// Whether this code consumes an encode argument / produces a decoded
    /// value. Only padding does not.
    pub fn takes_arg(self) -> bool {
        !matches!(self, Self::Pad)
    }
}

/// One token of a parsed format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A fixed-width primitive code.
    Primitive(Primitive),
    /// `S` — INT16 big-endian length, then that many bytes; -1 = absent.
    Str,
    /// `Y` — INT32 big-endian length, then that many bytes; -1 = absent.
    Bytes,
    /// `V` — unsigned varint.
    Varint,
    /// `[...]` — INT32 big-endian element count, then `count` repetitions
    /// of the inner token sequence.
    Array(Vec<Token>),
}

impl Token {
    /// The format character this token was parsed from (arrays report `[`).
    pub fn code(&self) -> char {
        match self {
            Self::Primitive(p) => p.code(),
            Self::Str => 'S',
            Self::Bytes => 'Y',
            Self::Varint => 'V',
            Self::Array(_) => '[',
        }
    }
}

/// Parses a format string into its token list.
///
/// Strips ASCII whitespace, strips one leading order marker, then walks the
/// remaining characters with an explicit bracket stack. Fails with
/// [`Error::UnknownToken`] or [`Error::UnbalancedBrackets`]; never produces
/// a partially-valid token list.
pub fn parse(fmt: &str) -> Result<Vec<Token>> {
    let normalized: Vec<char> = fmt.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let chars = match normalized.first() {
        // It's always network ordering; the marker carries no information.
        Some('!' | '>' | '<') => &normalized[1..],
        _ => &normalized[..],
    };

    // Stack of open `[` groups; the bottom frame is the top-level sequence.
    let mut stack: Vec<Vec<Token>> = vec![Vec::new()];
    for (position, &ch) in chars.iter().enumerate() {
        match ch {
            '[' => stack.push(Vec::new()),
            ']' => {
                let inner = stack.pop().ok_or(Error::UnbalancedBrackets)?;
                let parent = stack.last_mut().ok_or(Error::UnbalancedBrackets)?;
                parent.push(Token::Array(inner));
            }
            'S' => stack.last_mut().ok_or(Error::UnbalancedBrackets)?.push(Token::Str),
            'Y' => stack.last_mut().ok_or(Error::UnbalancedBrackets)?.push(Token::Bytes),
            'V' => stack.last_mut().ok_or(Error::UnbalancedBrackets)?.push(Token::Varint),
            _ => match Primitive::from_code(ch) {
                Some(p) => stack
                    .last_mut()
                    .ok_or(Error::UnbalancedBrackets)?
                    .push(Token::Primitive(p)),
                None => return Err(Error::UnknownToken { token: ch, position }),
            },
        }
    }

    if stack.len() != 1 {
        return Err(Error::UnbalancedBrackets);
    }
    Ok(stack.pop().unwrap_or_default())
}

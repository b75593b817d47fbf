//! Central error types for the wire-format codec.
//!
//! Every failure at this layer is corruption-class, not transient: callers
//! get the offset and token that triggered it and must not retry.

use core::fmt;

/// All error conditions raised by the format-string codec.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A format string's `[` and `]` do not balance.
    UnbalancedBrackets,
    /// A format character outside the token alphabet.
    UnknownToken {
        /// The offending character.
        token: char,
        /// Its position in the normalized format string (whitespace and
        /// any leading order marker already stripped).
        position: usize,
    },
    /// A read or write would run past the end of the buffer.
    ShortBuffer {
        /// Buffer offset at which the access started.
        offset: usize,
        /// Bytes the access required.
        needed: usize,
        /// Bytes actually remaining at `offset`.
        remaining: usize,
    },
    /// Too few encode arguments for the format string's placeholders.
    ArgumentCount {
        /// Argument-consuming placeholders in the format string.
        required: usize,
        /// Arguments actually supplied.
        supplied: usize,
    },
    /// An encode argument's variant does not match its format token.
    ValueType {
        /// The format token the argument was bound to.
        token: char,
        /// Variant the token requires.
        expected: &'static str,
        /// Variant actually supplied.
        found: &'static str,
    },
    /// A length prefix was negative but not the `-1` absent marker
    /// (Kafka wire format: NULLABLE_STRING / NULLABLE_BYTES).
    InvalidLength {
        /// The token whose prefix was read (`S` or `Y`).
        token: char,
        /// The decoded prefix value.
        length: i32,
        /// Buffer offset of the prefix.
        offset: usize,
    },
    /// A varint encoding does not fit in a u64.
    VarintOverflow {
        /// Buffer offset of the varint's first byte.
        offset: usize,
    },
    /// A token the encode path does not support (`[`, `S`, `Y`).
    /// Decode is the complete contract; encode covers fixed-width runs
    /// and varints only.
    UnsupportedToken {
        /// The rejected token.
        token: char,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnbalancedBrackets => write!(f, "unbalanced brackets in format string"),
            Self::UnknownToken { token, position } => {
                write!(f, "unknown format token '{token}' at position {position}")
            }
            Self::ShortBuffer { offset, needed, remaining } => write!(
                f,
                "short buffer: need {needed} byte(s) at offset {offset}, {remaining} remaining"
            ),
            Self::ArgumentCount { required, supplied } => write!(
                f,
                "format string requires {required} argument(s), {supplied} supplied"
            ),
            Self::ValueType { token, expected, found } => write!(
                f,
                "token '{token}' expects a {expected} argument, got {found}"
            ),
            Self::InvalidLength { token, length, offset } => write!(
                f,
                "invalid length prefix {length} for token '{token}' at offset {offset} (only -1 marks absence)"
            ),
            Self::VarintOverflow { offset } => {
                write!(f, "varint at offset {offset} overflows u64")
            }
            Self::UnsupportedToken { token } => write!(
                f,
                "token '{token}' is not supported by encode (fixed-width and varint only)"
            ),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Builds a `ShortBuffer` error for an access of `needed` bytes at
    /// `offset` into a buffer of `len` total bytes.
    pub(crate) fn short(offset: usize, needed: usize, len: usize) -> Self {
        Self::ShortBuffer {
            offset,
            needed,
            remaining: len.saturating_sub(offset),
        }
    }
}

/// A convenience `Result` type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    /// Every variant must produce a Display string carrying enough context
    /// to diagnose the failure without a debugger.

    #[test]
    fn short_buffer_display() {
        let e = Error::short(10, 4, 12);
        let msg = e.to_string();
        assert!(msg.contains("offset 10"), "{msg}");
        assert!(msg.contains("need 4"), "{msg}");
        assert!(msg.contains("2 remaining"), "{msg}");
    }

    #[test]
    fn short_buffer_offset_past_end() {
        // remaining saturates instead of underflowing
        let e = Error::short(20, 1, 12);
        assert_eq!(
            e,
            Error::ShortBuffer { offset: 20, needed: 1, remaining: 0 }
        );
    }

    #[test]
    fn unknown_token_display() {
        let e = Error::UnknownToken { token: 'z', position: 3 };
        let msg = e.to_string();
        assert!(msg.contains('z'), "{msg}");
        assert!(msg.contains('3'), "{msg}");
    }

    #[test]
    fn argument_count_display() {
        let e = Error::ArgumentCount { required: 3, supplied: 1 };
        let msg = e.to_string();
        assert!(msg.contains('3'), "{msg}");
        assert!(msg.contains('1'), "{msg}");
    }

    #[test]
    fn value_type_display() {
        let e = Error::ValueType { token: 'i', expected: "I32", found: "Bytes" };
        let msg = e.to_string();
        assert!(msg.contains("'i'"), "{msg}");
        assert!(msg.contains("I32"), "{msg}");
        assert!(msg.contains("Bytes"), "{msg}");
    }

    #[test]
    fn invalid_length_display() {
        let e = Error::InvalidLength { token: 'S', length: -7, offset: 2 };
        let msg = e.to_string();
        assert!(msg.contains("-7"), "{msg}");
        assert!(msg.contains("'S'"), "{msg}");
    }

    #[test]
    fn unsupported_token_display() {
        let e = Error::UnsupportedToken { token: '[' };
        assert!(e.to_string().contains("encode"), "{e}");
    }
}

//! The error taxonomy as seen across the public API.
//!
//! Everything here is corruption-class and must surface with offset/token
//! context rather than degrade into truncated or zero-filled data.

use kpack::{decode, decode_varint, encode, encode_varint, Error, Value};

#[test]
fn malformed_format_unbalanced() {
    assert_eq!(decode("[i", &[0; 8], 0), Err(Error::UnbalancedBrackets));
    assert_eq!(decode("i]", &[0; 8], 0), Err(Error::UnbalancedBrackets));
    assert_eq!(
        encode("[[i]", &mut [0; 8], 0, &[]),
        Err(Error::UnbalancedBrackets)
    );
}

#[test]
fn malformed_format_unknown_token() {
    assert_eq!(
        decode("iz", &[0; 8], 0),
        Err(Error::UnknownToken { token: 'z', position: 1 })
    );
}

#[test]
fn decode_short_buffer_reports_offset() {
    // i consumes 4, second i starts at 4 with 2 bytes left
    let err = decode("ii", &[0; 6], 0).unwrap_err();
    assert_eq!(err, Error::ShortBuffer { offset: 4, needed: 4, remaining: 2 });
}

#[test]
fn decode_short_buffer_inside_array() {
    let buff = [0, 0, 0, 2, 0, 0, 0, 1]; // claims 2 elements, holds 1
    let err = decode("[i]", &buff, 0).unwrap_err();
    assert_eq!(err, Error::ShortBuffer { offset: 8, needed: 4, remaining: 0 });
}

#[test]
fn decode_offset_beyond_buffer() {
    let err = decode("h", &[0; 4], 10).unwrap_err();
    assert_eq!(err, Error::ShortBuffer { offset: 10, needed: 2, remaining: 0 });
}

#[test]
fn encode_short_buffer_before_any_write() {
    let mut buff = [0x55u8; 9];
    let err = encode("qh", &mut buff, 0, &[Value::I64(1), Value::I16(2)]).unwrap_err();
    assert_eq!(err, Error::ShortBuffer { offset: 0, needed: 10, remaining: 9 });
    assert_eq!(buff, [0x55; 9], "failed encode must not mutate the buffer");
}

#[test]
fn encode_argument_count() {
    let err = encode("iVhx", &mut [0; 16], 0, &[Value::I32(1)]).unwrap_err();
    // x is padding and takes no argument
    assert_eq!(err, Error::ArgumentCount { required: 3, supplied: 1 });
}

#[test]
fn encode_rejects_decode_only_tokens() {
    for fmt in ["[i]", "S", "Y", "i[h]"] {
        let err = encode(fmt, &mut [0; 16], 0, &[Value::I32(1)]).unwrap_err();
        assert!(
            matches!(err, Error::UnsupportedToken { .. }),
            "{fmt}: {err}"
        );
    }
}

#[test]
fn varint_errors() {
    assert_eq!(
        decode_varint(&[0x80, 0x80], 0),
        Err(Error::ShortBuffer { offset: 2, needed: 1, remaining: 0 })
    );
    let eleven = [0x80u8; 10];
    let mut buff = [0u8; 11];
    buff[..10].copy_from_slice(&eleven);
    buff[10] = 0x01;
    assert_eq!(decode_varint(&buff, 0), Err(Error::VarintOverflow { offset: 0 }));

    assert_eq!(
        encode_varint(&mut [0u8; 0], 0, 0),
        Err(Error::ShortBuffer { offset: 0, needed: 1, remaining: 0 })
    );
}

#[test]
fn errors_format_for_diagnostics() {
    let err = decode("S", &[0x00, 0x09], 0).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("offset 2"), "{msg}");
    assert!(msg.contains("9 byte"), "{msg}");
}

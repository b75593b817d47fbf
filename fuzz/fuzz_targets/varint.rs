#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any successfully decoded varint must re-encode to the value it
    // decoded from (canonical encodings round-trip byte-for-byte too,
    // but over-long zero-padded ones only value-round-trip).
    if let Ok((size, value)) = kpack::decode_varint(data, 0) {
        let mut buff = [0u8; 10];
        let written = kpack::encode_varint(&mut buff, 0, value).unwrap();
        assert!(written <= size);
        let (consumed, back) = kpack::decode_varint(&buff, 0).unwrap();
        assert_eq!(back, value);
        assert_eq!(consumed, written);
    }
});

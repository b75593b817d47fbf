#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First chunk plays the format string, the rest the wire buffer.
    // Decode must reject garbage with an error, never panic or hang.
    if data.is_empty() {
        return;
    }
    let fmt_len = (data[0] as usize % 16).min(data.len() - 1);
    let (fmt, buff) = data[1..].split_at(fmt_len);
    if let Ok(fmt) = std::str::from_utf8(fmt) {
        let _ = kpack::decode(fmt, buff, 0);
    }
});

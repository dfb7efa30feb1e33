#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use utf8text::{Endianness, OptimizationConfig, Text, codec, utf8_to_utf16, utf16_to_utf8};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    bytes: &'a [u8],
    split_at: usize,
    big_endian: bool,
}

fuzz_target!(|input: Input<'_>| {
    let Input {
        bytes,
        split_at,
        big_endian,
    } = input;

    // The validator must agree with the standard library, position included.
    match (codec::check(bytes), std::str::from_utf8(bytes)) {
        (Ok(count), Ok(s)) => assert_eq!(count, s.chars().count()),
        (Err(ours), Err(theirs)) => {
            assert_eq!(ours.valid_up_to(), theirs.valid_up_to());
            assert_eq!(ours.error_len(), theirs.error_len());
        }
        (ours, theirs) => panic!("disagreement: {ours:?} vs {theirs:?}"),
    }

    // Unvalidated content must never panic when addressed or decoded.
    let trusted = Text::with_config(bytes, OptimizationConfig::trusted()).unwrap();
    assert_eq!(trusted.symbols().count(), trusted.symbol_count());
    let _ = trusted.byte_width_at(split_at);

    // Unvalidated pieces may cut a symbol; the count must heal when joined.
    let cut = split_at % (bytes.len() + 1);
    let mut joined = Text::with_config(&bytes[..cut], OptimizationConfig::trusted()).unwrap();
    joined.push_bytes(&bytes[cut..]).unwrap();
    assert_eq!(joined.symbol_count(), trusted.symbol_count());

    let Ok(text) = Text::from_bytes(bytes) else {
        return;
    };

    // Appending in two pieces gives the same count as constructing at once.
    let mut pieced = Text::new();
    if pieced.push_bytes(&bytes[..cut]).is_ok() {
        pieced.push_bytes(&bytes[cut..]).unwrap();
        assert_eq!(pieced, text);
        assert_eq!(pieced.symbol_count(), text.symbol_count());
    }

    let endianness = if big_endian {
        Endianness::Big
    } else {
        Endianness::Little
    };
    let wide = utf8_to_utf16(&text, endianness, false);
    let back = utf16_to_utf8(&wide, Some(wide.len()), endianness).unwrap();
    assert_eq!(back, text);
});

//! Operations at the encoding boundary: UTF-16 conversion, joining and ASCII
//! digit classification.
//!
//! Surrogate arithmetic follows UTF-16: a high unit in `D800..DC00` and the
//! low unit after it in `DC00..E000` encode
//! `((high - 0xD800) << 10) + (low - 0xDC00) + 0x10000`. Unpaired surrogates
//! have no UTF-8 encoding and are replaced with `U+FFFD`.

use alloc::vec::Vec;

use tracing::debug;

use crate::{
    binary::Endianness,
    codec::{self, REPLACEMENT},
    error::{Result, TextError},
    text::Text,
};

/// UTF-8 byte order mark.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// UTF-16 little-endian byte order mark.
pub const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];
/// UTF-16 big-endian byte order mark.
pub const UTF16BE_BOM: [u8; 2] = [0xFE, 0xFF];

const HIGH_SURROGATES: core::ops::Range<u16> = 0xD800..0xDC00;
const LOW_SURROGATES: core::ops::Range<u16> = 0xDC00..0xE000;

/// Decodes UTF-16 code units stored as bytes in `endianness` order.
///
/// With `length: Some(n)` exactly the first `n` bytes are read and zero units
/// among them are content. With `None` reading stops at the first zero unit,
/// or at the end of `bytes` if there is none.
///
/// ```rust
/// use utf8text::{Endianness, utf16_to_utf8};
///
/// let clef = [0x34, 0xD8, 0x1E, 0xDD, 0x00, 0x00];
/// let text = utf16_to_utf8(&clef, None, Endianness::Little).unwrap();
/// assert_eq!(text.as_bytes(), &[0xF0, 0x9D, 0x84, 0x9E]);
/// ```
///
/// # Errors
///
/// Returns a value error if `n` is odd, or an index error if `n` exceeds
/// `bytes.len()`.
pub fn utf16_to_utf8(bytes: &[u8], length: Option<usize>, endianness: Endianness) -> Result<Text> {
    let read_unit = |pair: &[u8]| {
        let pair = [pair[0], pair[1]];
        match endianness {
            Endianness::Little => u16::from_le_bytes(pair),
            Endianness::Big => u16::from_be_bytes(pair),
        }
    };
    match length {
        Some(len) => {
            if len % 2 != 0 {
                return Err(TextError::Value("utf-16 byte length must be even"));
            }
            let bytes = bytes
                .get(..len)
                .ok_or(TextError::index(len, bytes.len() + 1))?;
            Ok(decode_units(bytes.chunks_exact(2).map(read_unit)))
        }
        None => Ok(decode_units(
            bytes
                .chunks_exact(2)
                .map(read_unit)
                .take_while(|&unit| unit != 0),
        )),
    }
}

/// Decodes UTF-16 code units that are already in native form.
#[must_use]
pub fn utf16_units_to_utf8(units: &[u16]) -> Text {
    decode_units(units.iter().copied())
}

fn decode_units(units: impl Iterator<Item = u16>) -> Text {
    let mut units = units.peekable();
    let mut out = Vec::with_capacity(units.size_hint().0);
    let mut symbols = 0;
    while let Some(unit) = units.next() {
        let code_point = if HIGH_SURROGATES.contains(&unit) {
            match units.next_if(|low| LOW_SURROGATES.contains(low)) {
                Some(low) => {
                    ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00) + 0x10000
                }
                None => {
                    debug!(unit, "unpaired high surrogate");
                    REPLACEMENT
                }
            }
        } else if LOW_SURROGATES.contains(&unit) {
            debug!(unit, "unpaired low surrogate");
            REPLACEMENT
        } else {
            u32::from(unit)
        };
        let pushed = codec::push_code_point(&mut out, code_point);
        debug_assert!(pushed, "surrogates are replaced before encoding");
        symbols += 1;
    }
    Text::from_valid_content(out, symbols)
}

/// Encodes `text` as UTF-16 code units.
///
/// Code points above `U+FFFF` become surrogate pairs; anything that is not a
/// Unicode scalar value (possible only for unvalidated content) becomes
/// `U+FFFD`.
#[must_use]
pub fn utf8_to_utf16_units(text: &Text) -> Vec<u16> {
    let mut units = Vec::with_capacity(text.symbol_count());
    for code_point in text.code_points() {
        push_units(&mut units, code_point);
    }
    units
}

#[allow(clippy::cast_possible_truncation)]
fn push_units(units: &mut Vec<u16>, code_point: u32) {
    let code_point = if char::from_u32(code_point).is_some() {
        code_point
    } else {
        REPLACEMENT
    };
    if code_point <= 0xFFFF {
        units.push(code_point as u16);
    } else {
        let v = code_point - 0x10000;
        units.push(0xD800 + (v >> 10) as u16);
        units.push(0xDC00 + (v & 0x3FF) as u16);
    }
}

/// Encodes `text` as UTF-16 bytes in `endianness` order, optionally followed
/// by a two-byte zero terminator. The byte length is the vector's length.
///
/// ```rust
/// use utf8text::{Endianness, Text, utf8_to_utf16};
///
/// let bytes = utf8_to_utf16(&Text::from("a𝄞"), Endianness::Big, true);
/// assert_eq!(bytes, [0x00, 0x61, 0xD8, 0x34, 0xDD, 0x1E, 0x00, 0x00]);
/// ```
#[must_use]
pub fn utf8_to_utf16(text: &Text, endianness: Endianness, null_terminated: bool) -> Vec<u8> {
    let units = utf8_to_utf16_units(text);
    let mut out = Vec::with_capacity(units.len() * 2 + 2);
    for unit in units {
        let pair = match endianness {
            Endianness::Little => unit.to_le_bytes(),
            Endianness::Big => unit.to_be_bytes(),
        };
        out.extend_from_slice(&pair);
    }
    if null_terminated {
        out.extend_from_slice(&[0, 0]);
    }
    out
}

/// Concatenates `components` with `separator` between neighbours.
///
/// ```rust
/// use utf8text::{Text, join};
///
/// let parts = [Text::from("Hello"), Text::from("World")];
/// assert_eq!(join(&parts, &Text::from("_")).unwrap(), "Hello_World");
/// ```
///
/// # Errors
///
/// Returns an encoding error if a component or the separator holds
/// unvalidated bytes that are not valid UTF-8.
pub fn join<'a, I>(components: I, separator: &Text) -> Result<Text>
where
    I: IntoIterator<Item = &'a Text>,
{
    let mut out = Text::new();
    for (i, component) in components.into_iter().enumerate() {
        if i > 0 {
            out.push_text(separator)?;
        }
        out.push_text(component)?;
    }
    Ok(out)
}

/// Whether `code_point` is an ASCII decimal digit. Other Unicode digits are
/// not recognised.
#[must_use]
pub fn is_digit(code_point: u32) -> bool {
    (u32::from(b'0')..=u32::from(b'9')).contains(&code_point)
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use rstest::rstest;

    use super::*;
    use crate::OptimizationConfig;

    #[test]
    fn surrogate_pair_decodes_to_four_bytes() {
        let le = [0x34, 0xD8, 0x1E, 0xDD];
        let t = utf16_to_utf8(&le, Some(4), Endianness::Little).unwrap();
        assert_eq!(t.as_bytes(), &[0xF0, 0x9D, 0x84, 0x9E]);
        assert_eq!(t.symbol_count(), 1);
        assert_eq!(t.code_point_at(0).unwrap(), 0x1D11E);

        let be = [0xD8, 0x34, 0xDD, 0x1E];
        assert_eq!(utf16_to_utf8(&be, Some(4), Endianness::Big).unwrap(), t);
    }

    #[rstest]
    #[case(&[0x0041], "A")]
    #[case(&[0x00A3, 0x0035], "£5")]
    #[case(&[0x2211], "∑")]
    #[case(&[0xD834, 0xDD1E], "𝄞")]
    #[case(&[0xD834], "\u{FFFD}")]
    #[case(&[0xDD1E, 0x0041], "\u{FFFD}A")]
    #[case(&[0xD834, 0x0041], "\u{FFFD}A")]
    #[case(&[0xD834, 0xD834, 0xDD1E], "\u{FFFD}𝄞")]
    fn decode_native_units(#[case] units: &[u16], #[case] expected: &str) {
        let t = utf16_units_to_utf8(units);
        assert_eq!(t, expected);
        assert_eq!(t.symbol_count(), expected.chars().count());
    }

    #[test]
    fn unknown_length_stops_at_zero_unit() {
        let bytes = [0x61, 0x00, 0x62, 0x00, 0x00, 0x00, 0x63, 0x00];
        let t = utf16_to_utf8(&bytes, None, Endianness::Little).unwrap();
        assert_eq!(t, "ab");

        let t = utf16_to_utf8(&bytes, Some(8), Endianness::Little).unwrap();
        assert_eq!(t.as_bytes(), b"ab\0c");

        let unterminated = [0x61, 0x00];
        assert_eq!(
            utf16_to_utf8(&unterminated, None, Endianness::Little).unwrap(),
            "a"
        );
    }

    #[test]
    fn length_errors() {
        let bytes = [0x61, 0x00, 0x62];
        assert!(matches!(
            utf16_to_utf8(&bytes, Some(3), Endianness::Little),
            Err(TextError::Value(_))
        ));
        assert_eq!(
            utf16_to_utf8(&bytes, Some(4), Endianness::Little),
            Err(TextError::index(4, 4))
        );
    }

    #[test]
    fn encode_to_utf16() {
        let t = Text::from("a£∑𝄞");
        assert_eq!(
            utf8_to_utf16_units(&t),
            vec![0x0061, 0x00A3, 0x2211, 0xD834, 0xDD1E]
        );
        assert_eq!(
            utf8_to_utf16(&t, Endianness::Little, false),
            vec![0x61, 0x00, 0xA3, 0x00, 0x11, 0x22, 0x34, 0xD8, 0x1E, 0xDD]
        );
        let terminated = utf8_to_utf16(&Text::new(), Endianness::Big, true);
        assert_eq!(terminated, vec![0, 0]);
    }

    #[test]
    fn boms_are_plain_data() {
        let t = Text::from_bytes(&UTF8_BOM).unwrap();
        assert_eq!(t.code_point_at(0).unwrap(), 0xFEFF);

        let le = utf16_to_utf8(&UTF16LE_BOM, Some(2), Endianness::Little).unwrap();
        assert_eq!(le.as_bytes(), &UTF8_BOM);
        let be = utf16_to_utf8(&UTF16BE_BOM, Some(2), Endianness::Big).unwrap();
        assert_eq!(be, le);
    }

    #[test]
    fn unvalidated_content_encodes_replacement() {
        let t = Text::with_config(&[0xFF], OptimizationConfig::trusted()).unwrap();
        assert_eq!(utf8_to_utf16_units(&t), vec![0xFFFD]);
    }

    #[test]
    fn join_places_separator_between_only() {
        let parts: Vec<Text> = ["Hello", "World"].into_iter().map(Text::from).collect();
        assert_eq!(join(&parts, &Text::from("_")).unwrap(), "Hello_World");
        assert_eq!(join(&parts[..1], &Text::from("_")).unwrap(), "Hello");
        assert_eq!(join(&Vec::<Text>::new(), &Text::from("_")).unwrap(), "");

        let joined = join(&parts, &Text::from("∑")).unwrap();
        assert_eq!(joined.symbol_count(), 11);
    }

    #[test]
    fn join_checks_unvalidated_components() {
        let bad = Text::with_config(&[0xFF], OptimizationConfig::trusted()).unwrap();
        assert!(join([&bad], &Text::new()).is_err());
    }

    #[rstest]
    #[case('0', true)]
    #[case('9', true)]
    #[case('/', false)]
    #[case(':', false)]
    #[case('٣', false)]
    #[case('５', false)]
    fn digits_are_ascii_only(#[case] ch: char, #[case] expected: bool) {
        assert_eq!(is_digit(ch as u32), expected);
    }
}

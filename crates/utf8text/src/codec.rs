//! UTF-8 classification, validation and decoding over raw byte slices.
//!
//! The codec is stateless: every function takes the bytes it works on and
//! returns plain values. [`check`] is the single validation entry point used by
//! the text type; it runs a small scanner state machine with two states:
//!
//! - *expect lead byte*: the next byte starts a symbol and declares its width.
//! - *expect continuation*: `remaining` continuation bytes are still owed to
//!   the current symbol, the next of which must fall in `lo..=hi`.
//!
//! Any byte outside the expected class is an error. Input is accepted only if
//! it drains while expecting a lead byte.
//!
//! Validation is strict: overlong encodings, UTF-16 surrogate code points and
//! values above `U+10FFFF` are rejected, matching [`core::str::from_utf8`].
//! [`lead_width`] and [`decode`] on the other hand look only at bit patterns,
//! so they can still walk content that was adopted without validation.

use alloc::vec::Vec;

use crate::{
    binary::{Endianness, pack_u32},
    error::EncodingError,
};

/// Code point substituted for bytes that do not decode.
pub const REPLACEMENT: u32 = 0xFFFD;

/// Width in bytes declared by a symbol's lead byte, or `None` if `byte` cannot
/// start a symbol.
///
/// ```rust
/// use utf8text::codec::lead_width;
///
/// assert_eq!(lead_width(b'a'), Some(1));
/// assert_eq!(lead_width(0xD7), Some(2));
/// assert_eq!(lead_width(0xE2), Some(3));
/// assert_eq!(lead_width(0xF0), Some(4));
/// assert_eq!(lead_width(0x80), None);
/// ```
#[inline]
#[must_use]
pub fn lead_width(byte: u8) -> Option<usize> {
    match byte.leading_ones() {
        0 => Some(1),
        2 => Some(2),
        3 => Some(3),
        4 => Some(4),
        _ => None,
    }
}

/// Whether `byte` matches `10xxxxxx`.
#[inline]
#[must_use]
pub fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    ExpectLead,
    ExpectContinuation { remaining: u8, lo: u8, hi: u8 },
}

/// Continuation bytes owed after `lead` and the accepted range of the first
/// one, or `None` if `lead` is not a well-formed lead byte.
#[inline]
fn continuation_plan(lead: u8) -> Option<ScanState> {
    let (remaining, lo, hi) = match lead {
        0xC2..=0xDF => (1, 0x80, 0xBF),
        0xE0 => (2, 0xA0, 0xBF),
        0xE1..=0xEC | 0xEE..=0xEF => (2, 0x80, 0xBF),
        0xED => (2, 0x80, 0x9F),
        0xF0 => (3, 0x90, 0xBF),
        0xF1..=0xF3 => (3, 0x80, 0xBF),
        0xF4 => (3, 0x80, 0x8F),
        _ => return None,
    };
    Some(ScanState::ExpectContinuation { remaining, lo, hi })
}

/// Validates `bytes` and returns the number of symbols they contain.
///
/// # Errors
///
/// Returns an [`EncodingError`] locating the first malformed or truncated
/// symbol.
#[allow(clippy::cast_possible_truncation)]
pub fn check(bytes: &[u8]) -> Result<usize, EncodingError> {
    let mut state = ScanState::ExpectLead;
    let mut symbol_start = 0;
    let mut count = 0;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        match state {
            ScanState::ExpectLead => {
                symbol_start = i;
                if byte.is_ascii() {
                    // ASCII runs need no state changes.
                    let run = bytes[i..].iter().take_while(|b| b.is_ascii()).count();
                    count += run;
                    i += run;
                    continue;
                }
                state = continuation_plan(byte).ok_or(EncodingError {
                    valid_up_to: i,
                    error_len: Some(1),
                })?;
            }
            ScanState::ExpectContinuation { remaining, lo, hi } => {
                if !(lo..=hi).contains(&byte) {
                    return Err(EncodingError {
                        valid_up_to: symbol_start,
                        error_len: Some((i - symbol_start) as u8),
                    });
                }
                state = if remaining == 1 {
                    count += 1;
                    ScanState::ExpectLead
                } else {
                    ScanState::ExpectContinuation {
                        remaining: remaining - 1,
                        lo: 0x80,
                        hi: 0xBF,
                    }
                };
            }
        }
        i += 1;
    }

    match state {
        ScanState::ExpectLead => Ok(count),
        ScanState::ExpectContinuation { .. } => Err(EncodingError {
            valid_up_to: symbol_start,
            error_len: None,
        }),
    }
}

/// Whether `bytes` is well-formed UTF-8 made of complete symbols.
#[must_use]
pub fn validate(bytes: &[u8]) -> bool {
    check(bytes).is_ok()
}

/// Decodes the symbol starting at `offset`, returning its code point and
/// width.
///
/// Only the bit layout is checked: the lead byte must declare a width and
/// that many bytes must follow as continuation bytes. Returns `None` otherwise
/// or when `offset` is past the end.
#[must_use]
pub fn decode(bytes: &[u8], offset: usize) -> Option<(u32, usize)> {
    let lead = *bytes.get(offset)?;
    let width = lead_width(lead)?;
    let tail = bytes.get(offset + 1..offset + width)?;
    if !tail.iter().copied().all(is_continuation) {
        return None;
    }
    let payload = match width {
        1 => return Some((u32::from(lead), 1)),
        2 => lead & 0x1F,
        3 => lead & 0x0F,
        _ => lead & 0x07,
    };
    let code_point = tail
        .iter()
        .fold(u32::from(payload), |acc, &b| (acc << 6) | u32::from(b & 0x3F));
    Some((code_point, width))
}

/// Counts symbols by hopping from lead byte to lead byte.
///
/// Does not validate. Every byte that does not start a decodable symbol
/// counts as one symbol of its own, matching what [`Symbols`] yields.
#[must_use]
pub fn count_symbols(bytes: &[u8]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        i += if bytes[i].is_ascii() {
            1
        } else {
            decode(bytes, i).map_or(1, |(_, width)| width)
        };
        count += 1;
    }
    count
}

/// Encodes `code_point` into `buf`, returning the written bytes, or `None` if
/// it is not a Unicode scalar value.
pub fn encode(code_point: u32, buf: &mut [u8; 4]) -> Option<&[u8]> {
    let ch = char::from_u32(code_point)?;
    Some(ch.encode_utf8(buf).as_bytes())
}

/// Appends the encoding of `code_point` to `dst`. Returns `false` and leaves
/// `dst` untouched if it is not a Unicode scalar value.
pub fn push_code_point(dst: &mut Vec<u8>, code_point: u32) -> bool {
    let mut tmp = [0u8; 4];
    match encode(code_point, &mut tmp) {
        Some(bytes) => {
            dst.extend_from_slice(bytes);
            true
        }
        None => false,
    }
}

/// One symbol located in a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    /// Byte offset of the symbol's first byte.
    pub offset: usize,
    /// Number of bytes the symbol occupies (1-4).
    pub width: usize,
    /// Decoded code point.
    pub code_point: u32,
}

impl Symbol {
    /// Byte range covered by this symbol.
    #[must_use]
    pub fn range(&self) -> core::ops::Range<usize> {
        self.offset..self.offset + self.width
    }
}

/// Iterator over the [`Symbol`]s of a byte slice.
///
/// In fixed-width mode every symbol is exactly `width` bytes and a trailing
/// partial chunk is ignored. Otherwise bytes that do not decode yield a
/// one-byte [`REPLACEMENT`] symbol.
#[derive(Debug, Clone)]
pub struct Symbols<'a> {
    bytes: &'a [u8],
    offset: usize,
    fixed_width: Option<usize>,
}

impl<'a> Symbols<'a> {
    /// Walks variable-width UTF-8.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            fixed_width: None,
        }
    }

    /// Walks `bytes` as a sequence of `width`-byte symbols.
    #[must_use]
    pub fn fixed(bytes: &'a [u8], width: usize) -> Self {
        Self {
            bytes,
            offset: 0,
            fixed_width: Some(width.max(1)),
        }
    }
}

/// Code point of a fixed-width chunk: decoded when its lead byte agrees with
/// the chunk width, otherwise the raw bytes packed high byte first.
fn fixed_code_point(chunk: &[u8]) -> u32 {
    match decode(chunk, 0) {
        Some((code_point, width)) if width == chunk.len() => code_point,
        _ => pack_u32(chunk, Endianness::Little).unwrap_or(REPLACEMENT),
    }
}

impl Iterator for Symbols<'_> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        let offset = self.offset;
        let (code_point, width) = match self.fixed_width {
            Some(width) => {
                let chunk = self.bytes.get(offset..offset + width)?;
                (fixed_code_point(chunk), width)
            }
            None if offset < self.bytes.len() => {
                decode(self.bytes, offset).unwrap_or((REPLACEMENT, 1))
            }
            None => return None,
        };
        self.offset += width;
        Some(Symbol {
            offset,
            width,
            code_point,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.bytes.len().saturating_sub(self.offset);
        match self.fixed_width {
            Some(width) => (rest / width, Some(rest / width)),
            None => (rest.div_ceil(4), Some(rest)),
        }
    }
}

impl core::iter::FusedIterator for Symbols<'_> {}

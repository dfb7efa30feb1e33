//! A null-terminated, UTF-8 aware text value.
//!
//! [`Text`] owns a byte buffer that always ends in a `0` byte and caches how
//! many symbols (encoded code points) it holds. It is addressed both by byte
//! offset and by symbol index, and converts between the two. Around it sit the
//! stateless [`codec`], UTF-16 interop ([`utf16_to_utf8`], [`utf8_to_utf16`]),
//! and byte packing with explicit [`Endianness`].
//!
//! ```rust
//! use utf8text::{Endianness, Text, utf8_to_utf16, utf16_to_utf8};
//!
//! let text = Text::from_bytes("£5".as_bytes())?;
//! assert_eq!(text.symbol_count(), 2);
//! assert_eq!(text.byte_index_of_symbol(1)?, 2);
//!
//! let wide = utf8_to_utf16(&text, Endianness::Little, false);
//! assert_eq!(utf16_to_utf8(&wide, Some(wide.len()), Endianness::Little)?, text);
//! # Ok::<(), utf8text::TextError>(())
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod binary;
pub mod codec;
mod error;
mod ops;
mod options;
mod text;

#[cfg(test)]
mod tests;

pub use binary::{
    Endianness, pack_u16, pack_u32, pack_u32_native, pack_u64, system_endianness,
};
pub use error::{ConversionError, EncodingError, Result, TextError};
pub use ops::{
    UTF8_BOM, UTF16BE_BOM, UTF16LE_BOM, is_digit, join, utf8_to_utf16, utf8_to_utf16_units,
    utf16_to_utf8, utf16_units_to_utf8,
};
pub use options::{OptimizationConfig, SymbolWidth};
pub use text::{Primitive, Text};

/// Sentinel for callers that store "no index" or "unspecified length" in a
/// plain integer.
pub const NPOS: usize = usize::MAX;

/// Flattens an optional index to [`NPOS`] when absent.
#[must_use]
pub fn to_npos(index: Option<usize>) -> usize {
    index.unwrap_or(NPOS)
}

/// Reads [`NPOS`] back as `None`.
#[must_use]
pub fn from_npos(raw: usize) -> Option<usize> {
    (raw != NPOS).then_some(raw)
}

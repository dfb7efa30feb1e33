use core::fmt;

use thiserror::Error;

/// Shorthand for results produced by this crate.
pub type Result<T, E = TextError> = core::result::Result<T, E>;

/// Every failure a text operation can report.
///
/// Errors are raised at the operation that observes the invalid condition and
/// never leave an already constructed [`Text`](crate::Text) in a broken state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// Input bytes are not well-formed UTF-8.
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),
    /// A symbol or byte index is outside the valid range.
    #[error("index {index} out of range for length {len}")]
    Index {
        /// The rejected index.
        index: usize,
        /// The exclusive upper bound the index was checked against.
        len: usize,
    },
    /// Numeric parsing failed or a packing request would lose data.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),
    /// A structurally invalid argument was supplied.
    #[error("value error: {0}")]
    Value(&'static str),
}

impl TextError {
    pub(crate) fn index(index: usize, len: usize) -> Self {
        Self::Index { index, len }
    }
}

/// Position information for a UTF-8 validation failure.
///
/// Modelled on [`core::str::Utf8Error`]: `valid_up_to` bytes were decoded
/// successfully before the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingError {
    pub(crate) valid_up_to: usize,
    pub(crate) error_len: Option<u8>,
}

impl EncodingError {
    /// Number of leading bytes that form complete, valid symbols.
    #[must_use]
    pub fn valid_up_to(&self) -> usize {
        self.valid_up_to
    }

    /// Width of the offending byte sequence, or `None` when the input ended in
    /// the middle of a symbol.
    #[must_use]
    pub fn error_len(&self) -> Option<usize> {
        self.error_len.map(usize::from)
    }

    pub(crate) fn shifted(self, by: usize) -> Self {
        Self {
            valid_up_to: self.valid_up_to + by,
            ..self
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error_len {
            Some(len) => write!(
                f,
                "invalid utf-8 sequence of {len} bytes from index {}",
                self.valid_up_to
            ),
            None => write!(
                f,
                "incomplete utf-8 byte sequence from index {}",
                self.valid_up_to
            ),
        }
    }
}

impl core::error::Error for EncodingError {}

#[allow(clippy::cast_possible_truncation)]
impl From<core::str::Utf8Error> for EncodingError {
    fn from(e: core::str::Utf8Error) -> Self {
        Self {
            valid_up_to: e.valid_up_to(),
            error_len: e.error_len().map(|len| len as u8),
        }
    }
}

/// Reasons a conversion can fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionError {
    /// The text is not a decimal number of the requested shape.
    #[error("text is not numeric")]
    NotNumeric,
    /// The number does not fit the requested type.
    #[error("number out of range for target type")]
    OutOfRange,
    /// The text is not a recognised boolean spelling.
    #[error("text is not a boolean")]
    NotBoolean,
    /// More source bytes were given than the target integer can hold.
    #[error("cannot pack {len} bytes into a {max}-byte integer")]
    PackOverflow {
        /// Number of source bytes.
        len: usize,
        /// Width of the target integer in bytes.
        max: usize,
    },
}

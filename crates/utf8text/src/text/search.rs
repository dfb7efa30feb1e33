//! Prefix/suffix tests, pattern search and splitting.
//!
//! Patterns are matched as raw bytes. A well-formed UTF-8 pattern always
//! starts with a lead byte, and a lead byte can never be mistaken for a
//! continuation byte, so any match of such a pattern begins on a symbol
//! boundary.

use alloc::vec::Vec;

use bstr::ByteSlice;

use super::Text;
use crate::error::{Result, TextError};

impl Text {
    /// Whether the content begins with `prefix`.
    #[must_use]
    pub fn starts_with(&self, prefix: impl AsRef<[u8]>) -> bool {
        self.as_bytes().starts_with(prefix.as_ref())
    }

    /// Whether the content ends with `suffix`.
    #[must_use]
    pub fn ends_with(&self, suffix: impl AsRef<[u8]>) -> bool {
        self.as_bytes().ends_with(suffix.as_ref())
    }

    /// Whether `pattern` occurs anywhere in the content.
    #[must_use]
    pub fn contains(&self, pattern: impl AsRef<[u8]>) -> bool {
        self.as_bytes().contains_str(pattern.as_ref())
    }

    /// Symbol index of the first occurrence of `pattern`.
    ///
    /// An empty pattern matches at index `0`.
    ///
    /// ```rust
    /// use utf8text::Text;
    ///
    /// let text = Text::from("£5 or £6");
    /// assert_eq!(text.find_first("£"), Some(0));
    /// assert_eq!(text.find_last("£"), Some(6));
    /// assert_eq!(text.find_first("€"), None);
    /// ```
    #[must_use]
    pub fn find_first(&self, pattern: impl AsRef<[u8]>) -> Option<usize> {
        let byte_index = self.as_bytes().find(pattern.as_ref())?;
        Some(self.symbols_before(byte_index))
    }

    /// Symbol index of the last occurrence of `pattern`.
    ///
    /// An empty pattern matches at the end, i.e. at `symbol_count()`.
    #[must_use]
    pub fn find_last(&self, pattern: impl AsRef<[u8]>) -> Option<usize> {
        let byte_index = self.as_bytes().rfind(pattern.as_ref())?;
        Some(self.symbols_before(byte_index))
    }

    /// Splits the content on every occurrence of `delimiter`.
    ///
    /// Adjacent delimiters produce empty segments, and so do delimiters at
    /// either end. Segments keep this text's configuration.
    ///
    /// # Errors
    ///
    /// Returns a value error if `delimiter` is empty, or an encoding error if
    /// a delimiter that cuts through symbols leaves an invalid segment.
    pub fn split(&self, delimiter: impl AsRef<[u8]>) -> Result<Vec<Self>> {
        let delimiter = delimiter.as_ref();
        if delimiter.is_empty() {
            return Err(TextError::Value("split delimiter must not be empty"));
        }
        self.as_bytes()
            .split_str(delimiter)
            .map(|segment| self.derive(segment))
            .collect()
    }
}

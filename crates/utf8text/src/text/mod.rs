//! The [`Text`] value: an owned, null-terminated UTF-8 buffer with a cached
//! symbol count.
//!
//! Two coordinate spaces address the same buffer: byte offsets into the
//! content, and symbol indices counting decoded code points. Symbol positions
//! are not cached; anything addressed by symbol index walks the buffer from
//! the start (except in fixed-width mode, where offsets are computed).
//!
//! Invariants, holding after every public call returns:
//! - the buffer ends with exactly one terminating `0` byte that is not part of
//!   the content;
//! - the cached symbol count equals the number of symbols in the content, or
//!   `content_len / width` in fixed-width mode;
//! - content of a value whose configuration validates is well-formed UTF-8.

mod append;
mod numeric;
mod search;
#[cfg(feature = "serde")]
mod serde_impl;

use alloc::{string::String, vec, vec::Vec};
use core::{cmp::Ordering, fmt, hash, str::FromStr};

use bstr::{BStr, ByteSlice};
use tracing::{debug, trace};

pub use self::append::Primitive;
use crate::{
    codec::{self, Symbol, Symbols},
    error::{EncodingError, Result, TextError},
    options::OptimizationConfig,
};

/// An owned UTF-8 string with a trailing null byte.
///
/// # Examples
///
/// ```rust
/// use utf8text::Text;
///
/// let text = Text::from_bytes("aל∑".as_bytes()).unwrap();
/// assert_eq!(text.symbol_count(), 3);
/// assert_eq!(text.byte_len(), 7);
/// assert_eq!(text.symbol_width_at(2).unwrap(), 3);
///
/// assert!(Text::from_bytes(&[0x80, b'a']).is_err());
/// ```
#[derive(Clone)]
pub struct Text {
    buf: Vec<u8>,
    symbol_count: usize,
    config: OptimizationConfig,
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

/// Symbol count of `bytes` under `config`, validating if required.
fn measure(bytes: &[u8], config: OptimizationConfig) -> Result<usize> {
    if let Some(width) = config.symbol_width() {
        return Ok(bytes.len() / width);
    }
    if !config.validates() {
        trace!(len = bytes.len(), "skipping utf-8 validation");
        return Ok(codec::count_symbols(bytes));
    }
    codec::check(bytes).map_err(|e| {
        debug!(valid_up_to = e.valid_up_to(), "rejected invalid utf-8");
        TextError::Encoding(e)
    })
}

impl Text {
    /// An empty text with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::empty(OptimizationConfig::default())
    }

    /// An empty text carrying `config`.
    #[must_use]
    pub fn empty(config: OptimizationConfig) -> Self {
        Self {
            buf: vec![0],
            symbol_count: 0,
            config,
        }
    }

    /// Copies `bytes` into a new text, validating them.
    ///
    /// `bytes` need not be null-terminated; a `0` byte inside it is content.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if `bytes` is not valid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::with_config(bytes, OptimizationConfig::default())
    }

    /// Copies `bytes` into a new text carrying `config`.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if `config` validates and `bytes` is not
    /// valid UTF-8.
    pub fn with_config(bytes: &[u8], config: OptimizationConfig) -> Result<Self> {
        let symbol_count = measure(bytes, config)?;
        let mut buf = Vec::with_capacity(bytes.len() + 1);
        buf.extend_from_slice(bytes);
        buf.push(0);
        Ok(Self {
            buf,
            symbol_count,
            config,
        })
    }

    /// Copies the bytes of `source` up to (not including) its first `0` byte.
    /// If there is none the whole slice is taken.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if `config` validates and the bytes are not
    /// valid UTF-8.
    pub fn from_nul_terminated(source: &[u8], config: OptimizationConfig) -> Result<Self> {
        let end = source.find_byte(0).unwrap_or(source.len());
        Self::with_config(&source[..end], config)
    }

    /// Adopts `buf` without copying it.
    ///
    /// `buf` must hold the content followed by a single terminating `0` byte.
    /// Ownership moves into the text; the content is validated unless `config`
    /// says otherwise.
    ///
    /// # Errors
    ///
    /// Returns a value error if `buf` is not null-terminated, or an encoding
    /// error if validation fails. Either way `buf` is dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use utf8text::{OptimizationConfig, Text};
    ///
    /// let text = Text::from_owned_bytes(b"abc\0".to_vec(), OptimizationConfig::default()).unwrap();
    /// assert_eq!(text, "abc");
    /// ```
    pub fn from_owned_bytes(buf: Vec<u8>, config: OptimizationConfig) -> Result<Self> {
        let Some((&0, content)) = buf.split_last() else {
            return Err(TextError::Value("adopted buffer is not null-terminated"));
        };
        let symbol_count = measure(content, config)?;
        trace!(len = buf.len(), "adopted buffer");
        Ok(Self {
            buf,
            symbol_count,
            config,
        })
    }

    /// Builds a text from content bytes already known to hold `symbol_count`
    /// valid symbols.
    pub(crate) fn from_valid_content(mut content: Vec<u8>, symbol_count: usize) -> Self {
        debug_assert_eq!(codec::check(&content), Ok(symbol_count));
        content.push(0);
        Self {
            buf: content,
            symbol_count,
            config: OptimizationConfig::default(),
        }
    }

    /// A new text over a slice of this one's content, keeping the
    /// configuration.
    pub(crate) fn derive(&self, bytes: &[u8]) -> Result<Self> {
        Self::with_config(bytes, self.config)
    }

    // ── Queries ────────────────────────────────────────────────────────────

    /// Number of symbols in the content.
    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    /// Size of the buffer in bytes: the content plus the terminator.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.buf.len()
    }

    /// Size of the content in bytes.
    #[must_use]
    pub fn content_len(&self) -> usize {
        self.buf.len() - 1
    }

    /// Whether the text has no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbol_count == 0
    }

    /// The configuration this text was built with.
    #[must_use]
    pub fn config(&self) -> OptimizationConfig {
        self.config
    }

    /// Content bytes, without the terminator.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.content_len()]
    }

    /// The whole buffer, terminator included.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf
    }

    /// Content viewed as a byte string.
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        self.as_bytes().as_bstr()
    }

    /// Content as `&str`.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if the content was accepted without
    /// validation and is not valid UTF-8.
    pub fn to_str(&self) -> Result<&str> {
        core::str::from_utf8(self.as_bytes()).map_err(|e| EncodingError::from(e).into())
    }

    /// Gives up the buffer, returning the content without the terminator.
    #[must_use]
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.buf.pop();
        self.buf
    }

    /// Moves the contents out, leaving an empty text with the same
    /// configuration behind.
    #[must_use]
    pub fn take(&mut self) -> Self {
        let config = self.config;
        core::mem::replace(self, Self::empty(config))
    }

    /// Removes all content, keeping the allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.buf.push(0);
        self.symbol_count = 0;
    }

    // ── Symbols ────────────────────────────────────────────────────────────

    /// Iterates over the symbols of the content.
    #[must_use]
    pub fn symbols(&self) -> Symbols<'_> {
        match self.config.symbol_width() {
            Some(width) => Symbols::fixed(self.as_bytes(), width),
            None => Symbols::new(self.as_bytes()),
        }
    }

    /// Iterates over the code points of the content.
    pub fn code_points(&self) -> impl Iterator<Item = u32> + '_ {
        self.symbols().map(|s| s.code_point)
    }

    /// Locates symbol `index`.
    ///
    /// # Errors
    ///
    /// Returns an index error if `index >= symbol_count()`.
    pub fn symbol(&self, index: usize) -> Result<Symbol> {
        if index >= self.symbol_count {
            return Err(TextError::index(index, self.symbol_count));
        }
        let found = match self.config.symbol_width() {
            Some(width) => {
                let offset = index * width;
                Symbols::fixed(&self.as_bytes()[offset..], width)
                    .next()
                    .map(|s| Symbol { offset, ..s })
            }
            None => self.symbols().nth(index),
        };
        found.ok_or(TextError::index(index, self.symbol_count))
    }

    /// A new text holding only symbol `index`.
    ///
    /// # Errors
    ///
    /// Returns an index error if `index >= symbol_count()`.
    pub fn symbol_at(&self, index: usize) -> Result<Self> {
        let symbol = self.symbol(index)?;
        self.derive(&self.as_bytes()[symbol.range()])
    }

    /// Code point of symbol `index`.
    ///
    /// # Errors
    ///
    /// Returns an index error if `index >= symbol_count()`.
    pub fn code_point_at(&self, index: usize) -> Result<u32> {
        self.symbol(index).map(|s| s.code_point)
    }

    /// Byte width (1-4) of symbol `index`.
    ///
    /// # Errors
    ///
    /// Returns an index error if `index >= symbol_count()`.
    pub fn symbol_width_at(&self, index: usize) -> Result<usize> {
        self.symbol(index).map(|s| s.width)
    }

    // ── Coordinate mapping ─────────────────────────────────────────────────

    /// Byte offset at which symbol `index` starts.
    ///
    /// # Errors
    ///
    /// Returns an index error if `index >= symbol_count()`.
    pub fn byte_index_of_symbol(&self, index: usize) -> Result<usize> {
        self.symbol(index).map(|s| s.offset)
    }

    /// Index of the symbol that contains byte `byte_index`.
    ///
    /// # Errors
    ///
    /// Returns an index error if `byte_index >= content_len()`.
    pub fn symbol_index_of_byte(&self, byte_index: usize) -> Result<usize> {
        if byte_index >= self.content_len() {
            return Err(TextError::index(byte_index, self.content_len()));
        }
        Ok(self.symbols_before(byte_index))
    }

    /// Number of symbols that end at or before `byte_index`. For a byte inside
    /// the content this is the index of the symbol containing it; for
    /// `content_len()` it is the symbol count.
    pub(crate) fn symbols_before(&self, byte_index: usize) -> usize {
        match self.config.symbol_width() {
            Some(width) => (byte_index / width).min(self.symbol_count),
            None => self
                .symbols()
                .take_while(|s| s.offset + s.width <= byte_index)
                .count(),
        }
    }

    /// Byte offset of symbol `index`, allowing `index == symbol_count()` for
    /// the end of the content.
    pub(crate) fn symbol_start_or_end(&self, index: usize) -> usize {
        match self.config.symbol_width() {
            Some(width) => index * width,
            None => self
                .symbols()
                .nth(index)
                .map_or(self.content_len(), |s| s.offset),
        }
    }

    /// Width of the symbol starting at `byte_offset`.
    ///
    /// Returns `None` if `byte_offset` is not the start of a complete symbol.
    #[must_use]
    pub fn byte_width_at(&self, byte_offset: usize) -> Option<usize> {
        match self.config.symbol_width() {
            Some(width) => (byte_offset % width == 0
                && byte_offset
                    .checked_add(width)
                    .is_some_and(|end| end <= self.content_len()))
            .then_some(width),
            None => codec::decode(self.as_bytes(), byte_offset).map(|(_, width)| width),
        }
    }

    // ── Mutation ───────────────────────────────────────────────────────────

    /// Replaces the content with a copy of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if validation fails; the text is unchanged.
    pub fn assign(&mut self, bytes: &[u8]) -> Result<()> {
        let symbol_count = measure(bytes, self.config)?;
        self.buf.clear();
        self.buf.extend_from_slice(bytes);
        self.buf.push(0);
        self.symbol_count = symbol_count;
        Ok(())
    }

    /// Replaces the content with a deep copy of `other`, configuration
    /// included.
    pub fn assign_text(&mut self, other: &Self) {
        self.clone_from(other);
    }

    /// Replaces the content by adopting `buf`. See
    /// [`from_owned_bytes`](Self::from_owned_bytes).
    ///
    /// # Errors
    ///
    /// Fails like `from_owned_bytes`; the text is unchanged.
    pub fn assign_owned(&mut self, buf: Vec<u8>) -> Result<()> {
        *self = Self::from_owned_bytes(buf, self.config)?;
        Ok(())
    }

    /// Appends `bytes`, of which `known_symbols` may already be known.
    ///
    /// Only the appended bytes are validated; the existing content is known to
    /// be valid already.
    fn append_bytes(&mut self, bytes: &[u8], known_symbols: Option<usize>) -> Result<()> {
        let added = match (self.config.symbol_width(), known_symbols) {
            (Some(_), _) => 0,
            (None, Some(n)) => n,
            (None, None) => measure(bytes, self.config)
                .map_err(|e| shift_encoding_error(e, self.content_len()))?,
        };
        // Only unvalidated content can end in a partial symbol.
        let seam = match self.config.symbol_width() {
            Some(_) => None,
            None => dangling_lead(self.as_bytes())
                .map(|start| (start, codec::count_symbols(&self.as_bytes()[start..]))),
        };
        self.buf.pop();
        self.buf.extend_from_slice(bytes);
        self.buf.push(0);
        self.symbol_count = match (self.config.symbol_width(), seam) {
            (Some(width), _) => self.content_len() / width,
            (None, Some((start, before))) => {
                trace!(start, "recounting across a partial symbol");
                self.symbol_count - before + codec::count_symbols(&self.as_bytes()[start..])
            }
            (None, None) => self.symbol_count + added,
        };
        Ok(())
    }

    /// Appends the content of `other`.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if this text validates and `other` holds
    /// unvalidated bytes that turn out to be invalid.
    pub fn push_text(&mut self, other: &Self) -> Result<()> {
        let trusted = other.config.symbol_width().is_none()
            && (other.config.validates() || !self.config.validates());
        self.append_bytes(other.as_bytes(), trusted.then_some(other.symbol_count))
    }

    /// Appends raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if this text validates and `bytes` is not
    /// valid UTF-8; the text is unchanged.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.append_bytes(bytes, None)
    }

    /// Appends a string slice.
    pub fn push_str(&mut self, s: &str) {
        let result = self.append_bytes(s.as_bytes(), Some(s.chars().count()));
        debug_assert!(result.is_ok());
    }

    /// Makes the content `times` copies of itself. `times == 0` empties it.
    ///
    /// # Errors
    ///
    /// Returns a value error if the result would not fit in memory.
    pub fn repeat(&mut self, times: usize) -> Result<()> {
        if times == 0 {
            self.clear();
            return Ok(());
        }
        let content_len = self.content_len();
        if content_len == 0 {
            return Ok(());
        }
        let total = content_len
            .checked_mul(times)
            .and_then(|n| n.checked_add(1))
            .ok_or(TextError::Value("repeated text length overflows"))?;
        let joins_copies =
            self.config.symbol_width().is_none() && dangling_lead(self.as_bytes()).is_some();
        let mut buf = Vec::with_capacity(total);
        for _ in 0..times {
            buf.extend_from_slice(&self.buf[..content_len]);
        }
        buf.push(0);
        self.buf = buf;
        self.symbol_count = match self.config.symbol_width() {
            Some(width) => self.content_len() / width,
            None if joins_copies => codec::count_symbols(self.as_bytes()),
            None => self.symbol_count * times,
        };
        Ok(())
    }

    /// A new text holding `times` copies of this one.
    ///
    /// # Errors
    ///
    /// Returns a value error if the result would not fit in memory.
    pub fn repeated(&self, times: usize) -> Result<Self> {
        let mut out = self.clone();
        out.repeat(times)?;
        Ok(out)
    }

    /// Collapses every run of back-to-back occurrences of `pattern` into a
    /// single occurrence.
    ///
    /// ```rust
    /// use utf8text::Text;
    ///
    /// let mut path = Text::from("a//b///c/");
    /// path.remove_consecutive_duplicates("/").unwrap();
    /// assert_eq!(path, "a/b/c/");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a value error if `pattern` is empty, or an encoding error if
    /// removing a pattern that splits symbols would leave invalid content.
    pub fn remove_consecutive_duplicates(&mut self, pattern: impl AsRef<[u8]>) -> Result<()> {
        let pattern = pattern.as_ref();
        if pattern.is_empty() {
            return Err(TextError::Value("pattern must not be empty"));
        }
        let haystack = self.as_bytes();
        let mut out = Vec::with_capacity(self.buf.len());
        let mut copied_to = 0;
        let mut previous_end = None;
        for start in haystack.find_iter(pattern) {
            let end = start + pattern.len();
            if previous_end == Some(start) {
                copied_to = end;
            } else {
                out.extend_from_slice(&haystack[copied_to..end]);
                copied_to = end;
            }
            previous_end = Some(end);
        }
        if previous_end.is_none() {
            return Ok(());
        }
        out.extend_from_slice(&haystack[copied_to..]);
        let symbol_count = measure(&out, self.config)?;
        out.push(0);
        self.buf = out;
        self.symbol_count = symbol_count;
        Ok(())
    }
}

/// Offset of a trailing lead byte whose symbol is cut off by the end of
/// `content`. Appended continuation bytes can complete it, so symbols from
/// here on must be recounted.
///
/// Any earlier byte is settled: a symbol is at most four bytes, and a lead
/// byte is never absorbed into a preceding symbol.
fn dangling_lead(content: &[u8]) -> Option<usize> {
    let from = content.len().saturating_sub(3);
    let start = (from..content.len())
        .rev()
        .find(|&i| !codec::is_continuation(content[i]))?;
    (codec::lead_width(content[start]).is_some_and(|w| w > 1)
        && codec::decode(content, start).is_none())
    .then_some(start)
}

fn shift_encoding_error(e: TextError, by: usize) -> TextError {
    match e {
        TextError::Encoding(inner) => TextError::Encoding(inner.shifted(by)),
        other => other,
    }
}

// ── Comparison ─────────────────────────────────────────────────────────────

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.buf == other.buf
    }
}

impl Eq for Text {}

impl hash::Hash for Text {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        hash::Hash::hash(&self.buf, state);
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<[u8]> for Text {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialOrd for Text {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders by code point, symbol by symbol. Bytes break ties so the ordering
/// agrees with equality for content that was not validated.
impl Ord for Text {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code_points()
            .cmp(other.code_points())
            .then_with(|| self.as_bytes().cmp(other.as_bytes()))
    }
}

// ── Formatting and conversions ─────────────────────────────────────────────

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_bstr(), f)
    }
}

impl AsRef<[u8]> for Text {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self::from_valid_content(s.as_bytes().to_vec(), s.chars().count())
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        let symbol_count = s.chars().count();
        Self::from_valid_content(s.into_bytes(), symbol_count)
    }
}

impl TryFrom<&[u8]> for Text {
    type Error = TextError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<Vec<u8>> for Text {
    type Error = TextError;

    /// Takes `content` (no terminator) without copying it.
    fn try_from(mut content: Vec<u8>) -> Result<Self> {
        let symbol_count = measure(&content, OptimizationConfig::default())?;
        content.push(0);
        Ok(Self {
            buf: content,
            symbol_count,
            config: OptimizationConfig::default(),
        })
    }
}

impl FromStr for Text {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};

    use rstest::rstest;

    use super::*;

    fn text(s: &str) -> Text {
        Text::from(s)
    }

    #[test]
    fn empty_text_is_just_a_terminator() {
        let t = Text::new();
        assert_eq!(t.as_bytes_with_nul(), &[0]);
        assert_eq!(t.byte_len(), 1);
        assert_eq!(t.content_len(), 0);
        assert!(t.is_empty());
        assert_eq!(Text::default(), t);
    }

    #[test]
    fn mixed_width_scenario() {
        let t = Text::from_bytes("aל∑".as_bytes()).unwrap();
        assert_eq!(t.symbol_count(), 3);
        assert_eq!(t.byte_len(), 7);
        let widths: Vec<_> = (0..3).map(|i| t.symbol_width_at(i).unwrap()).collect();
        assert_eq!(widths, [1, 2, 3]);
    }

    #[test]
    fn pound_five_scenario() {
        let t = text("£5");
        assert_eq!(t.byte_index_of_symbol(1).unwrap(), 2);
        assert_eq!(t.symbol_width_at(0).unwrap(), 2);
        assert_eq!(t.symbol_index_of_byte(1).unwrap(), 0);
        assert_eq!(t.symbol_index_of_byte(2).unwrap(), 1);
    }

    #[test]
    fn construction_rejects_invalid_bytes() {
        let err = Text::from_bytes(&[b'o', b'k', 0x80]).unwrap_err();
        match err {
            TextError::Encoding(e) => assert_eq!(e.valid_up_to(), 2),
            other => panic!("expected encoding error, got {other:?}"),
        }
    }

    #[test]
    fn skip_validation_accepts_anything() {
        let t = Text::with_config(&[0x80, b'a'], OptimizationConfig::trusted()).unwrap();
        assert_eq!(t.symbol_count(), 2);
        assert!(t.to_str().is_err());
        assert_eq!(t.code_point_at(0).unwrap(), codec::REPLACEMENT);
    }

    #[test]
    fn fixed_width_counts_by_division() {
        let config = OptimizationConfig::fixed_width(2).unwrap();
        let t = Text::with_config(b"abcdefg", config).unwrap();
        assert_eq!(t.symbol_count(), 3);
        assert_eq!(t.byte_index_of_symbol(2).unwrap(), 4);
        assert_eq!(t.symbol_index_of_byte(5).unwrap(), 2);
        assert_eq!(t.symbol_at(1).unwrap().as_bytes(), b"cd");
        assert_eq!(t.byte_width_at(2), Some(2));
        assert_eq!(t.byte_width_at(3), None);
        assert_eq!(t.byte_width_at(6), None);
        assert!(t.symbol(3).is_err());
    }

    #[test]
    fn nul_terminated_source_stops_at_first_zero() {
        let t = Text::from_nul_terminated(b"ab\0cd", OptimizationConfig::default()).unwrap();
        assert_eq!(t, "ab");
        let t = Text::from_nul_terminated(b"abc", OptimizationConfig::default()).unwrap();
        assert_eq!(t, "abc");
    }

    #[test]
    fn explicit_length_keeps_interior_zero() {
        let t = Text::from_bytes(b"a\0b").unwrap();
        assert_eq!(t.symbol_count(), 3);
        assert_eq!(t.as_bytes_with_nul(), b"a\0b\0");
    }

    #[test]
    fn adoption_requires_terminator() {
        let config = OptimizationConfig::default();
        let buf = "∑x\0".as_bytes().to_vec();
        let ptr = buf.as_ptr();
        let t = Text::from_owned_bytes(buf, config).unwrap();
        assert_eq!(t.as_bytes_with_nul().as_ptr(), ptr);
        assert_eq!(t.symbol_count(), 2);

        assert_eq!(
            Text::from_owned_bytes(b"abc".to_vec(), config),
            Err(TextError::Value("adopted buffer is not null-terminated"))
        );
        assert!(Text::from_owned_bytes(Vec::new(), config).is_err());
        assert!(matches!(
            Text::from_owned_bytes(vec![0xC3, 0], config),
            Err(TextError::Encoding(_))
        ));
    }

    #[test]
    fn take_leaves_empty_source() {
        let mut a = text("moved");
        let b = a.take();
        assert_eq!(b, "moved");
        assert!(a.is_empty());
        assert_eq!(a.byte_len(), 1);
    }

    #[test]
    fn clone_is_deep() {
        let a = text("deep");
        let mut b = a.clone();
        b.push_str("er");
        assert_eq!(a, "deep");
        assert_eq!(b, "deeper");
        assert_ne!(a.as_bytes().as_ptr(), b.as_bytes().as_ptr());
    }

    #[test]
    fn index_errors() {
        let t = text("ab");
        assert_eq!(t.symbol_at(2), Err(TextError::index(2, 2)));
        assert_eq!(t.byte_index_of_symbol(5), Err(TextError::index(5, 2)));
        assert_eq!(t.symbol_index_of_byte(2), Err(TextError::index(2, 2)));
    }

    #[rstest]
    #[case(0, Some(1))]
    #[case(1, Some(2))]
    #[case(2, None)]
    #[case(3, Some(4))]
    #[case(4, None)]
    #[case(7, None)]
    #[case(100, None)]
    fn byte_width_at_boundaries(#[case] offset: usize, #[case] expected: Option<usize>) {
        let t = text("aל𝄞");
        assert_eq!(t.byte_width_at(offset), expected);
    }

    #[rstest]
    #[case(1, crate::NPOS)]
    #[case(1, usize::MAX - 1)]
    #[case(2, crate::NPOS - 1)]
    #[case(2, usize::MAX - 3)]
    fn fixed_width_byte_width_far_past_end(#[case] width: u8, #[case] offset: usize) {
        let config = OptimizationConfig::fixed_width(width).unwrap();
        let t = Text::with_config(b"abcd", config).unwrap();
        assert_eq!(t.byte_width_at(offset), None);
    }

    #[test]
    fn assign_is_atomic() {
        let mut t = text("keep");
        assert!(t.assign(&[0xFF]).is_err());
        assert_eq!(t, "keep");
        t.assign("∑∑".as_bytes()).unwrap();
        assert_eq!(t.symbol_count(), 2);

        let other = Text::with_config(b"xy", OptimizationConfig::trusted()).unwrap();
        t.assign_text(&other);
        assert_eq!(t, other);
        assert_eq!(t.config(), OptimizationConfig::trusted());

        t.assign_owned(b"zz\0".to_vec()).unwrap();
        assert_eq!(t, "zz");
        assert!(t.assign_owned(b"zz".to_vec()).is_err());
        assert_eq!(t, "zz");
    }

    #[test]
    fn push_text_updates_count() {
        let mut t = text("a");
        t.push_text(&text("ל∑")).unwrap();
        assert_eq!(t, "aל∑");
        assert_eq!(t.symbol_count(), 3);
        assert_eq!(t.byte_len(), 7);
    }

    #[test]
    fn push_bytes_validates_only_new_bytes() {
        let mut t = text("ab");
        let err = t.push_bytes(&[b'c', 0xE2, 0x88]).unwrap_err();
        match err {
            TextError::Encoding(e) => {
                assert_eq!(e.valid_up_to(), 3);
                assert_eq!(e.error_len(), None);
            }
            other => panic!("expected encoding error, got {other:?}"),
        }
        assert_eq!(t, "ab");
        t.push_bytes(&[0xE2, 0x88, 0x91]).unwrap();
        assert_eq!(t, "ab∑");
    }

    #[test]
    fn pushing_unvalidated_text_into_validated_text_checks_it() {
        let mut t = text("ok");
        let raw = Text::with_config(&[0x80], OptimizationConfig::trusted()).unwrap();
        assert!(t.push_text(&raw).is_err());
        assert_eq!(t, "ok");
    }

    #[test]
    fn unvalidated_push_completes_a_cut_symbol() {
        let mut t = Text::with_config(&[0xE2], OptimizationConfig::trusted()).unwrap();
        assert_eq!(t.symbol_count(), 1);
        t.push_bytes(&[0x88, 0x91]).unwrap();
        assert_eq!(t, "∑");
        assert_eq!(t.symbol_count(), 1);
        assert_eq!(t.symbols().count(), 1);
        assert_eq!(t.symbol_width_at(0).unwrap(), 3);
        assert_eq!(t.code_point_at(0).unwrap(), 0x2211);
    }

    #[test]
    fn unvalidated_symbol_assembled_over_several_pushes() {
        let mut t = Text::with_config(b"a", OptimizationConfig::trusted()).unwrap();
        for piece in [&[0xF0_u8][..], &[0x9D], &[0x84, 0x9E, b'b']] {
            t.push_bytes(piece).unwrap();
            assert_eq!(t.symbol_count(), t.symbols().count());
        }
        assert_eq!(t, "a𝄞b");
        assert_eq!(t.symbol_count(), 3);

        let tail = Text::with_config(&[0x91], OptimizationConfig::trusted()).unwrap();
        let mut head = Text::with_config(&[0xE2, 0x88], OptimizationConfig::trusted()).unwrap();
        head.push_text(&tail).unwrap();
        assert_eq!(head.symbol_count(), 1);
    }

    #[test]
    fn unvalidated_repeat_joins_copies() {
        let mut t = Text::with_config(&[0x91, 0xE2, 0x88], OptimizationConfig::trusted()).unwrap();
        assert_eq!(t.symbol_count(), 3);
        t.repeat(2).unwrap();
        // 91 | E2 88 91 | E2 88
        assert_eq!(t.symbol_count(), 4);
        assert_eq!(t.symbols().count(), 4);
        assert_eq!(t.code_point_at(1).unwrap(), 0x2211);
    }

    #[test]
    fn push_into_fixed_width_recomputes_by_division() {
        let mut t = Text::empty(OptimizationConfig::fixed_width(2).unwrap());
        t.push_str("abc");
        assert_eq!(t.symbol_count(), 1);
        t.push_str("d");
        assert_eq!(t.symbol_count(), 2);
    }

    #[rstest]
    #[case(0, "")]
    #[case(1, "ab∑")]
    #[case(3, "ab∑ab∑ab∑")]
    fn repeat_appends_copies(#[case] times: usize, #[case] expected: &str) {
        let mut t = text("ab∑");
        t.repeat(times).unwrap();
        assert_eq!(t, expected);
        assert_eq!(t.symbol_count(), expected.chars().count());
        assert_eq!(text("ab∑").repeated(times).unwrap(), expected);
    }

    #[test]
    fn repeat_overflow_is_value_error() {
        let mut t = text("ab");
        assert!(matches!(t.repeat(usize::MAX), Err(TextError::Value(_))));
        assert_eq!(t, "ab");
    }

    #[rstest]
    #[case("a//b///c/", "/", "a/b/c/")]
    #[case("////", "/", "/")]
    #[case("no separators", "/", "no separators")]
    #[case("∑∑∑x∑", "∑", "∑x∑")]
    #[case("abababcab", "ab", "abcab")]
    #[case("", "x", "")]
    fn remove_consecutive_duplicates_collapses_runs(
        #[case] input: &str,
        #[case] pattern: &str,
        #[case] expected: &str,
    ) {
        let mut t = text(input);
        t.remove_consecutive_duplicates(pattern).unwrap();
        assert_eq!(t, expected);
        assert_eq!(t.symbol_count(), expected.chars().count());
    }

    #[test]
    fn remove_consecutive_duplicates_rejects_empty_pattern() {
        let mut t = text("aa");
        assert!(matches!(
            t.remove_consecutive_duplicates(""),
            Err(TextError::Value(_))
        ));
    }

    #[test]
    fn equality_ignores_config() {
        let a = text("same");
        let b = Text::with_config(b"same", OptimizationConfig::trusted()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, text("Same"));
    }

    #[test]
    fn ordering_is_by_code_point() {
        let mut items = [text("b"), text("ab"), text("∑"), text("a"), text("")];
        items.sort();
        let rendered: Vec<_> = items.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["", "a", "ab", "b", "∑"]);
        assert!(text("z") < text("é"));
    }

    #[test]
    fn display_and_debug_go_through_bstr() {
        let t = text("hi ∑");
        assert_eq!(t.to_string(), "hi ∑");
        assert_eq!(alloc::format!("{t:?}"), "\"hi ∑\"");
        let raw = Text::with_config(&[b'a', 0xFF], OptimizationConfig::trusted()).unwrap();
        assert_eq!(raw.to_string(), "a\u{FFFD}");
    }

    #[test]
    fn conversions() {
        let t: Text = "x∑".parse().unwrap();
        assert_eq!(t.symbol_count(), 2);
        assert_eq!(Text::from(alloc::string::String::from("x∑")), t);
        assert_eq!(Text::try_from("x∑".as_bytes()).unwrap(), t);
        assert_eq!(Text::try_from("x∑".as_bytes().to_vec()).unwrap(), t);
        assert!(Text::try_from(alloc::vec![0xC0_u8]).is_err());
        assert_eq!(t.clone().into_bytes(), "x∑".as_bytes());
        assert_eq!(t.to_str().unwrap(), "x∑");
    }

    #[test]
    fn clear_keeps_config() {
        let mut t = Text::with_config(b"abc", OptimizationConfig::trusted()).unwrap();
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.byte_len(), 1);
        assert_eq!(t.config(), OptimizationConfig::trusted());
    }
}

//! Per-value settings that trade input checking for speed.

use crate::error::{Result, TextError};

/// Byte width shared by every symbol of a fixed-width text.
///
/// Only the widths a UTF-8 symbol can have are representable. With the
/// `serde` feature it (de)serializes as the plain number, and any other
/// number is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
#[repr(u8)]
pub enum SymbolWidth {
    /// One byte, e.g. ASCII.
    One = 1,
    /// Two bytes.
    Two = 2,
    /// Three bytes.
    Three = 3,
    /// Four bytes.
    Four = 4,
}

impl SymbolWidth {
    /// The width in bytes.
    #[must_use]
    pub const fn get(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for SymbolWidth {
    type Error = TextError;

    fn try_from(width: u8) -> Result<Self> {
        match width {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            _ => Err(TextError::Value("fixed width must be between 1 and 4")),
        }
    }
}

impl From<SymbolWidth> for u8 {
    fn from(width: SymbolWidth) -> Self {
        width as u8
    }
}

/// Per-value optimization settings for [`Text`](crate::Text).
///
/// The configuration decides how much work construction and mutation spend on
/// checking input. It is carried by every text value, inherited by values
/// derived from it (substrings, split segments, ...) and ignored by equality.
///
/// # Examples
///
/// ```rust
/// use utf8text::{OptimizationConfig, Text};
///
/// // Known-ASCII data: one byte per symbol, no per-symbol classification.
/// let config = OptimizationConfig::fixed_width(1).unwrap();
/// let text = Text::with_config(b"HELLO", config).unwrap();
/// assert_eq!(text.symbol_count(), 5);
/// ```
///
/// # Default
///
/// Input is validated and symbols are variable width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationConfig {
    /// Whether raw input bytes are accepted without UTF-8 validation.
    ///
    /// The caller vouches that the bytes are well-formed. Content that breaks
    /// that promise is still memory safe but decodes with replacement
    /// symbols.
    ///
    /// # Default
    ///
    /// `false`
    pub skip_validation: bool,

    /// Byte width every symbol is assumed to have.
    ///
    /// When set, symbols are never classified: the symbol count is the
    /// content length divided by this width and symbol `i` starts at byte
    /// `i * width`. Implies that input is not validated.
    ///
    /// # Default
    ///
    /// `None`
    pub fixed_width: Option<SymbolWidth>,
}

impl OptimizationConfig {
    /// Validate every input; variable-width symbols.
    #[must_use]
    pub const fn validated() -> Self {
        Self {
            skip_validation: false,
            fixed_width: None,
        }
    }

    /// Trust input to be valid UTF-8; variable-width symbols.
    #[must_use]
    pub const fn trusted() -> Self {
        Self {
            skip_validation: true,
            fixed_width: None,
        }
    }

    /// Treat every symbol as `width` bytes.
    ///
    /// # Errors
    ///
    /// Returns a value error unless `1 <= width <= 4`.
    pub fn fixed_width(width: u8) -> Result<Self> {
        Ok(Self {
            skip_validation: true,
            fixed_width: Some(SymbolWidth::try_from(width)?),
        })
    }

    /// Whether construction runs the UTF-8 validator.
    #[must_use]
    pub fn validates(&self) -> bool {
        !self.skip_validation && self.fixed_width.is_none()
    }

    pub(crate) fn symbol_width(&self) -> Option<usize> {
        self.fixed_width.map(SymbolWidth::get)
    }
}

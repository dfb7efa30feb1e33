//! Decimal classification, numeric/boolean parsing and symbol-range copies.
//!
//! The accepted grammar is deliberately small:
//!
//! ```text
//! uint  := '+'? digit+
//! int   := ('+' | '-')? digit+
//! float := ('+' | '-')? (digit | '.')*      -- at most one '.', one digit or more
//! ```
//!
//! where `digit` is an ASCII `0`-`9` as decided by [`is_digit`].

use core::str::FromStr;

use bstr::BString;

use super::Text;
use crate::{
    error::{ConversionError, Result, TextError},
    ops::is_digit,
};

const PLUS: u32 = b'+' as u32;
const MINUS: u32 = b'-' as u32;
const POINT: u32 = b'.' as u32;

#[derive(Clone, Copy)]
enum Shape {
    Unsigned,
    Signed,
    Float,
}

impl Text {
    fn has_shape(&self, shape: Shape) -> bool {
        let mut code_points = self.code_points().peekable();
        let sign_allowed = |cp: u32| match shape {
            Shape::Unsigned => cp == PLUS,
            Shape::Signed | Shape::Float => cp == PLUS || cp == MINUS,
        };
        let _ = code_points.next_if(|&cp| sign_allowed(cp));
        let mut digits = 0usize;
        let mut points = 0usize;
        for cp in code_points {
            if is_digit(cp) {
                digits += 1;
            } else if cp == POINT && matches!(shape, Shape::Float) && points == 0 {
                points += 1;
            } else {
                return false;
            }
        }
        digits > 0
    }

    /// Whether the content is an optionally signed run of decimal digits.
    #[must_use]
    pub fn is_int(&self) -> bool {
        self.has_shape(Shape::Signed)
    }

    /// Whether the content is a run of decimal digits, optionally preceded by
    /// `+`.
    #[must_use]
    pub fn is_uint(&self) -> bool {
        self.has_shape(Shape::Unsigned)
    }

    /// Whether the content is an optionally signed decimal number with at
    /// most one `.`.
    #[must_use]
    pub fn is_float(&self) -> bool {
        self.has_shape(Shape::Float)
    }

    fn parse_as<T: FromStr>(&self, shape: Shape) -> Result<T> {
        if !self.has_shape(shape) {
            return Err(ConversionError::NotNumeric.into());
        }
        // The shape check leaves only ASCII in the content.
        let digits =
            core::str::from_utf8(self.as_bytes()).map_err(|_| ConversionError::NotNumeric)?;
        digits
            .parse()
            .map_err(|_| TextError::Conversion(ConversionError::OutOfRange))
    }

    /// Parses `true`/`false`/`1`/`0`, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns a conversion error for any other content.
    pub fn to_bool(&self) -> Result<bool> {
        let bytes = self.as_bytes();
        if bytes == b"1" || bytes.eq_ignore_ascii_case(b"true") {
            Ok(true)
        } else if bytes == b"0" || bytes.eq_ignore_ascii_case(b"false") {
            Ok(false)
        } else {
            Err(ConversionError::NotBoolean.into())
        }
    }

    /// Parses the content as a decimal `i8`.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if the content is not an integer or does
    /// not fit.
    pub fn to_int8(&self) -> Result<i8> {
        self.parse_as(Shape::Signed)
    }

    /// Parses the content as a decimal `i16`.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if the content is not an integer or does
    /// not fit.
    pub fn to_int16(&self) -> Result<i16> {
        self.parse_as(Shape::Signed)
    }

    /// Parses the content as a decimal `i32`.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if the content is not an integer or does
    /// not fit.
    pub fn to_int32(&self) -> Result<i32> {
        self.parse_as(Shape::Signed)
    }

    /// Parses the content as a decimal `i64`.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if the content is not an integer or does
    /// not fit.
    pub fn to_int64(&self) -> Result<i64> {
        self.parse_as(Shape::Signed)
    }

    /// Parses the content as a decimal `u8`.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if the content is not an unsigned integer
    /// or does not fit.
    pub fn to_uint8(&self) -> Result<u8> {
        self.parse_as(Shape::Unsigned)
    }

    /// Parses the content as a decimal `u16`.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if the content is not an unsigned integer
    /// or does not fit.
    pub fn to_uint16(&self) -> Result<u16> {
        self.parse_as(Shape::Unsigned)
    }

    /// Parses the content as a decimal `u32`.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if the content is not an unsigned integer
    /// or does not fit.
    pub fn to_uint32(&self) -> Result<u32> {
        self.parse_as(Shape::Unsigned)
    }

    /// Parses the content as a decimal `u64`.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if the content is not an unsigned integer
    /// or does not fit.
    pub fn to_uint64(&self) -> Result<u64> {
        self.parse_as(Shape::Unsigned)
    }

    /// Parses the content as an `f32`.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if the content is not a decimal number.
    pub fn to_float32(&self) -> Result<f32> {
        self.parse_as(Shape::Float)
    }

    /// Parses the content as an `f64`.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if the content is not a decimal number.
    pub fn to_float64(&self) -> Result<f64> {
        self.parse_as(Shape::Float)
    }

    /// Copies up to `len` symbols starting at symbol `start`.
    ///
    /// `start == symbol_count()` yields an empty text; `len` is clamped to
    /// the symbols that remain.
    ///
    /// ```rust
    /// use utf8text::Text;
    ///
    /// let text = Text::from("Hello World");
    /// assert_eq!(text.substring(0, 5).unwrap(), "Hello");
    /// assert_eq!(text.substring(6, 100).unwrap(), "World");
    /// assert!(text.substring(11, 1).unwrap().is_empty());
    /// assert!(text.substring(12, 0).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an index error if `start > symbol_count()`.
    pub fn substring(&self, start: usize, len: usize) -> Result<Self> {
        let count = self.symbol_count();
        if start > count {
            return Err(TextError::index(start, count + 1));
        }
        let end = start + len.min(count - start);
        let from = self.symbol_start_or_end(start);
        let to = self.symbol_start_or_end(end);
        self.derive(&self.as_bytes()[from..to])
    }

    /// Copies the content as an undecoded byte string.
    #[must_use]
    pub fn to_generic_text(&self) -> BString {
        BString::from(self.as_bytes())
    }
}

//! Appending primitive values in their canonical text form.

use alloc::string::{String, ToString};

use super::Text;
use crate::error::Result;

/// A value that can be appended to a [`Text`].
///
/// Numbers and booleans are appended as their canonical decimal text
/// (`true`, `-12`, `1.5`, `NaN`); texts and strings verbatim; bytes verbatim
/// after validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive<'a> {
    /// A boolean.
    Bool(bool),
    /// An `i8`.
    I8(i8),
    /// An `i16`.
    I16(i16),
    /// An `i32`.
    I32(i32),
    /// An `i64`.
    I64(i64),
    /// An `isize`.
    Isize(isize),
    /// A `u8`.
    U8(u8),
    /// A `u16`.
    U16(u16),
    /// A `u32`.
    U32(u32),
    /// A `u64`.
    U64(u64),
    /// A `usize`.
    Usize(usize),
    /// An `f32`.
    F32(f32),
    /// An `f64`.
    F64(f64),
    /// Another text value.
    Text(&'a Text),
    /// A string slice.
    Str(&'a str),
    /// Raw bytes, validated unless the target skips validation.
    Bytes(&'a [u8]),
}

macro_rules! primitive_from {
    ( $( $ty:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$ty> for Primitive<'_> {
                fn from(v: $ty) -> Self {
                    Primitive::$variant(v)
                }
            }
        )*
    };
}

primitive_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

impl<'a> From<&'a Text> for Primitive<'a> {
    fn from(v: &'a Text) -> Self {
        Primitive::Text(v)
    }
}

impl<'a> From<&'a str> for Primitive<'a> {
    fn from(v: &'a str) -> Self {
        Primitive::Str(v)
    }
}

impl<'a> From<&'a [u8]> for Primitive<'a> {
    fn from(v: &'a [u8]) -> Self {
        Primitive::Bytes(v)
    }
}

impl Primitive<'_> {
    /// Decimal rendering of scalar variants; `None` for texts and bytes.
    fn render(&self) -> Option<String> {
        Some(match *self {
            Primitive::Bool(v) => v.to_string(),
            Primitive::I8(v) => v.to_string(),
            Primitive::I16(v) => v.to_string(),
            Primitive::I32(v) => v.to_string(),
            Primitive::I64(v) => v.to_string(),
            Primitive::Isize(v) => v.to_string(),
            Primitive::U8(v) => v.to_string(),
            Primitive::U16(v) => v.to_string(),
            Primitive::U32(v) => v.to_string(),
            Primitive::U64(v) => v.to_string(),
            Primitive::Usize(v) => v.to_string(),
            Primitive::F32(v) => v.to_string(),
            Primitive::F64(v) => v.to_string(),
            Primitive::Text(_) | Primitive::Str(_) | Primitive::Bytes(_) => return None,
        })
    }
}

impl Text {
    /// Appends `value`, returning `self` for chaining.
    ///
    /// ```rust
    /// use utf8text::Text;
    ///
    /// let mut line = Text::from("x=");
    /// line.append(-3_i32)?.append(", ok=")?.append(true)?.append(", r=")?.append(0.5_f64)?;
    /// assert_eq!(line, "x=-3, ok=true, r=0.5");
    /// # Ok::<(), utf8text::TextError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an encoding error if `value` carries bytes that fail
    /// validation; the text is unchanged.
    pub fn append<'a>(&mut self, value: impl Into<Primitive<'a>>) -> Result<&mut Self> {
        let value = value.into();
        match value {
            Primitive::Text(other) => self.push_text(other)?,
            Primitive::Str(s) => self.push_str(s),
            Primitive::Bytes(bytes) => self.push_bytes(bytes)?,
            scalar => {
                if let Some(rendered) = scalar.render() {
                    // Decimal renderings are ASCII: one symbol per byte.
                    self.append_bytes(rendered.as_bytes(), Some(rendered.len()))?;
                }
            }
        }
        Ok(self)
    }
}

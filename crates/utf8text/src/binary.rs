//! Endianness detection and fixed-width byte packing.

use crate::error::{ConversionError, Result};

/// Byte order of a multi-byte value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Endianness {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
}

impl Endianness {
    /// Byte order of the running process.
    ///
    /// Determined by looking at how a known two-byte value is laid out in
    /// memory, so the answer is the same for every call.
    #[must_use]
    pub fn system() -> Self {
        let probe = 0x0102_u16.to_ne_bytes();
        if probe[0] == 0x02 {
            Self::Little
        } else {
            Self::Big
        }
    }

    /// Whether this is the byte order of the running process.
    #[must_use]
    pub fn is_native(self) -> bool {
        self == Self::system()
    }

    /// The opposite byte order.
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Self::Big => Self::Little,
            Self::Little => Self::Big,
        }
    }
}

impl Default for Endianness {
    fn default() -> Self {
        Self::system()
    }
}

/// Byte order of the running process. See [`Endianness::system`].
#[must_use]
pub fn system_endianness() -> Endianness {
    Endianness::system()
}

/// Folds up to `N` bytes into a `u64`.
///
/// With [`Endianness::Little`] `bytes[0]` ends up in the most significant
/// position; with [`Endianness::Big`] it ends up in the least significant one.
fn pack<const N: usize>(bytes: &[u8], endianness: Endianness) -> Result<u64> {
    if bytes.len() > N {
        return Err(ConversionError::PackOverflow {
            len: bytes.len(),
            max: N,
        }
        .into());
    }
    let fold = |acc: u64, &b: &u8| (acc << 8) | u64::from(b);
    Ok(match endianness {
        Endianness::Little => bytes.iter().fold(0, fold),
        Endianness::Big => bytes.iter().rev().fold(0, fold),
    })
}

/// Packs up to four bytes into a `u32`.
///
/// # Errors
///
/// Returns a conversion error if `bytes` holds more than four bytes.
///
/// # Examples
///
/// ```rust
/// use utf8text::{Endianness, pack_u32};
///
/// let packed = pack_u32(&[0xAE, 0x72, 0x8B, 0x10], Endianness::Little).unwrap();
/// assert_eq!(packed, 2_926_742_288);
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn pack_u32(bytes: &[u8], endianness: Endianness) -> Result<u32> {
    pack::<4>(bytes, endianness).map(|v| v as u32)
}

/// Packs up to four bytes into a `u32` using the system byte order.
///
/// # Errors
///
/// Returns a conversion error if `bytes` holds more than four bytes.
pub fn pack_u32_native(bytes: &[u8]) -> Result<u32> {
    pack_u32(bytes, Endianness::system())
}

/// Packs up to two bytes into a `u16`.
///
/// # Errors
///
/// Returns a conversion error if `bytes` holds more than two bytes.
#[allow(clippy::cast_possible_truncation)]
pub fn pack_u16(bytes: &[u8], endianness: Endianness) -> Result<u16> {
    pack::<2>(bytes, endianness).map(|v| v as u16)
}

/// Packs up to eight bytes into a `u64`.
///
/// # Errors
///
/// Returns a conversion error if `bytes` holds more than eight bytes.
pub fn pack_u64(bytes: &[u8], endianness: Endianness) -> Result<u64> {
    pack::<8>(bytes, endianness)
}

//! Byte-order handling for the 4-byte length field.
//!
//! The conversion helpers keep Clippy expectations scoped to the points where
//! bytes meet integers, so the decoder and encoder can stay explicit about
//! wire endianness without repeating lint annotations.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::error::ConfigError;

/// Size of the length field preceding every payload.
pub const LENGTH_FIELD_SIZE: usize = 4;

/// Byte order of the length field.
///
/// Parsed from the configuration tokens `"LE"` and `"BE"`.
///
/// # Examples
///
/// ```
/// use lengthframe::Endianness;
///
/// let endianness: Endianness = "LE".parse().expect("valid token");
/// assert_eq!(endianness, Endianness::Little);
/// assert!("le".parse::<Endianness>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Endianness {
    /// Least significant byte first (`"LE"`).
    Little,
    /// Most significant byte first (`"BE"`).
    #[default]
    Big,
}

impl Endianness {
    /// Configuration token for this byte order.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Little => "LE",
            Self::Big => "BE",
        }
    }

    /// Parse a length field from its on-wire representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use lengthframe::Endianness;
    ///
    /// assert_eq!(Endianness::Big.read_length([0, 0, 1, 2]), 0x0102);
    /// assert_eq!(Endianness::Little.read_length([2, 1, 0, 0]), 0x0102);
    /// ```
    #[must_use]
    pub fn read_length(self, bytes: [u8; LENGTH_FIELD_SIZE]) -> u32 {
        match self {
            Self::Little => {
                #[expect(
                    clippy::little_endian_bytes,
                    reason = "The length field is configured as little-endian."
                )]
                u32::from_le_bytes(bytes)
            }
            Self::Big => {
                #[expect(
                    clippy::big_endian_bytes,
                    reason = "The length field is configured as big-endian."
                )]
                u32::from_be_bytes(bytes)
            }
        }
    }

    /// Serialise a length field in this byte order.
    ///
    /// # Examples
    ///
    /// ```
    /// use lengthframe::Endianness;
    ///
    /// assert_eq!(Endianness::Big.write_length(0x0102), [0, 0, 1, 2]);
    /// assert_eq!(Endianness::Little.write_length(0x0102), [2, 1, 0, 0]);
    /// ```
    #[must_use]
    pub fn write_length(self, value: u32) -> [u8; LENGTH_FIELD_SIZE] {
        match self {
            Self::Little => {
                #[expect(
                    clippy::little_endian_bytes,
                    reason = "The length field is configured as little-endian."
                )]
                value.to_le_bytes()
            }
            Self::Big => {
                #[expect(
                    clippy::big_endian_bytes,
                    reason = "The length field is configured as big-endian."
                )]
                value.to_be_bytes()
            }
        }
    }
}

impl FromStr for Endianness {
    type Err = ConfigError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "LE" => Ok(Self::Little),
            "BE" => Ok(Self::Big),
            other => Err(ConfigError::InvalidEndianness {
                token: other.to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for Endianness {
    type Error = ConfigError;

    fn try_from(token: String) -> Result<Self, Self::Error> { token.parse() }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.token()) }
}

//! Decoder configuration.
//!
//! A [`DecoderConfig`] is fixed when a decoder is built. It can be assembled
//! from typed values, from untyped parts (validated), or deserialised with
//! `serde`, in which case the same validation applies.

use serde::Deserialize;

use crate::{byte_order::Endianness, error::ConfigError};

/// Immutable framing parameters shared by the decoder and encoder.
///
/// # Examples
///
/// ```
/// use lengthframe::{DecoderConfig, Endianness};
///
/// let config = DecoderConfig::new(Endianness::Little, 1024, true);
/// assert_eq!(config.endianness(), Endianness::Little);
/// assert_eq!(config.max_payload_length(), 1024);
/// assert!(config.length_includes_self());
///
/// assert!(DecoderConfig::try_from_parts("XX", 1024, false).is_err());
/// assert!(DecoderConfig::try_from_parts("BE", -1, false).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawDecoderConfig")]
pub struct DecoderConfig {
    endianness: Endianness,
    max_payload_length: usize,
    length_includes_self: bool,
}

/// Default payload bound: the largest length a 4-byte field can declare.
pub const DEFAULT_MAX_PAYLOAD_LENGTH: usize = u32::MAX as usize;

impl DecoderConfig {
    /// Construct a configuration from typed values.
    #[must_use]
    pub const fn new(
        endianness: Endianness,
        max_payload_length: usize,
        length_includes_self: bool,
    ) -> Self {
        Self {
            endianness,
            max_payload_length,
            length_includes_self,
        }
    }

    /// Construct a configuration from untyped parts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndianness`] if `endianness` is not
    /// `"LE"` or `"BE"`, and [`ConfigError::InvalidMaxPayloadLength`] if
    /// `max_payload_length` is negative or exceeds `usize::MAX`.
    pub fn try_from_parts(
        endianness: &str,
        max_payload_length: i64,
        length_includes_self: bool,
    ) -> Result<Self, ConfigError> {
        let endianness = endianness.parse()?;
        let max_payload_length = usize::try_from(max_payload_length).map_err(|_| {
            ConfigError::InvalidMaxPayloadLength {
                value: max_payload_length,
            }
        })?;
        Ok(Self::new(
            endianness,
            max_payload_length,
            length_includes_self,
        ))
    }

    /// Replace the byte order of the length field.
    #[must_use]
    pub const fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    /// Replace the maximum accepted payload length.
    #[must_use]
    pub const fn with_max_payload_length(mut self, max_payload_length: usize) -> Self {
        self.max_payload_length = max_payload_length;
        self
    }

    /// Set whether the length field counts its own 4 bytes.
    #[must_use]
    pub const fn with_length_includes_self(mut self, length_includes_self: bool) -> Self {
        self.length_includes_self = length_includes_self;
        self
    }

    /// Byte order of the length field.
    #[must_use]
    pub const fn endianness(&self) -> Endianness { self.endianness }

    /// Largest payload accepted, measured after the self-inclusion adjustment.
    #[must_use]
    pub const fn max_payload_length(&self) -> usize { self.max_payload_length }

    /// Whether the declared length includes the length field itself.
    #[must_use]
    pub const fn length_includes_self(&self) -> bool { self.length_includes_self }
}

impl Default for DecoderConfig {
    fn default() -> Self { Self::new(Endianness::Big, DEFAULT_MAX_PAYLOAD_LENGTH, false) }
}

/// Serde shape of [`DecoderConfig`] prior to validation.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDecoderConfig {
    #[serde(default)]
    endianness: Endianness,
    #[serde(default = "default_max_payload_length")]
    max_payload_length: i64,
    #[serde(default)]
    length_includes_self: bool,
}

#[expect(
    clippy::cast_possible_wrap,
    reason = "u32::MAX always fits in i64"
)]
const fn default_max_payload_length() -> i64 { DEFAULT_MAX_PAYLOAD_LENGTH as i64 }

impl TryFrom<RawDecoderConfig> for DecoderConfig {
    type Error = ConfigError;

    fn try_from(raw: RawDecoderConfig) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            raw.endianness.token(),
            raw.max_payload_length,
            raw.length_includes_self,
        )
    }
}

//! Error types for the framing layer.
//!
//! The taxonomy is closed and split by when a failure can happen:
//!
//! - [`ConfigError`]: rejected configuration, raised while constructing a decoder and never
//!   deferred to [`feed`](crate::FrameDecoder::feed).
//! - [`DecodeError`]: malformed stream ("bad data"). Each variant maps to a stable
//!   [`DecodeReason`] so callers can branch without matching on messages.
//! - [`EncodeError`]: a payload that cannot be represented on the wire.
//! - [`StreamError`]: what the I/O adapters surface, wrapping the above plus transport errors.

use std::{fmt, io};

use bytes::Bytes;
use thiserror::Error;

/// Leftover bytes shown in full before the hex dump is truncated.
const HEX_PREVIEW_LIMIT: usize = 32;

/// Construction-time configuration errors.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The endianness token was neither `"LE"` nor `"BE"`.
    #[error("invalid endianness {token:?}: expected \"LE\" or \"BE\"")]
    InvalidEndianness {
        /// Token that was rejected.
        token: String,
    },

    /// The maximum payload length was negative or not representable.
    #[error("invalid max payload length {value}: must be a non-negative integer")]
    InvalidMaxPayloadLength {
        /// Value that was rejected.
        value: i64,
    },
}

/// Machine-readable reason attached to every [`DecodeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecodeReason {
    /// A self-inclusive length field declared fewer than 4 bytes.
    LengthBelowHeader,
    /// The payload length exceeded the configured maximum.
    OversizedFrame,
    /// Input ended part-way through a length field.
    EofMidLength,
    /// Input ended part-way through a payload.
    EofMidData,
}

impl DecodeReason {
    /// Stable identifier suitable for logs and metrics labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LengthBelowHeader => "length_below_header",
            Self::OversizedFrame => "oversized_frame",
            Self::EofMidLength => "eof_mid_length",
            Self::EofMidData => "eof_mid_data",
        }
    }
}

impl fmt::Display for DecodeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Malformed-stream errors.
///
/// All variants are the same "bad data" kind: the stream can no longer be
/// trusted and decoding stops. The end-of-stream variants keep the leftover
/// bytes for diagnostics; their `Display` output includes a hex dump.
///
/// # Examples
///
/// ```
/// use lengthframe::{DecodeError, DecodeReason};
///
/// let err = DecodeError::OversizedFrame { size: 2000, max: 1024 };
/// assert_eq!(err.reason(), DecodeReason::OversizedFrame);
/// assert_eq!(err.to_string(), "frame size exceeds max length: 2000 > 1024");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A self-inclusive length field declared fewer bytes than the field itself.
    #[error("self-inclusive length field cannot be less than 4: declared {declared}")]
    LengthBelowHeader {
        /// Value read from the length field.
        declared: u32,
    },

    /// The payload length exceeds the configured maximum.
    #[error("frame size exceeds max length: {size} > {max}")]
    OversizedFrame {
        /// Payload length after any self-inclusion adjustment.
        size: usize,
        /// Configured maximum payload length.
        max: usize,
    },

    /// Input ended before a complete length field arrived.
    #[error(
        "stream ended in the middle of a frame length: {} of 4 bytes [{}]",
        .remaining.len(),
        HexPreview(.remaining)
    )]
    EofMidLength {
        /// Bytes of the incomplete length field.
        remaining: Bytes,
    },

    /// Input ended before a complete payload arrived.
    #[error(
        "stream ended in the middle of frame data: {} of {expected} bytes [{}]",
        .remaining.len(),
        HexPreview(.remaining)
    )]
    EofMidData {
        /// Payload length announced by the length field.
        expected: usize,
        /// Payload bytes received before the end of input.
        remaining: Bytes,
    },
}

impl DecodeError {
    /// Reason code for this error.
    #[must_use]
    pub const fn reason(&self) -> DecodeReason {
        match self {
            Self::LengthBelowHeader { .. } => DecodeReason::LengthBelowHeader,
            Self::OversizedFrame { .. } => DecodeReason::OversizedFrame,
            Self::EofMidLength { .. } => DecodeReason::EofMidLength,
            Self::EofMidData { .. } => DecodeReason::EofMidData,
        }
    }

    /// Bytes left in the decoder when input ended; empty for other errors.
    #[must_use]
    pub fn leftover(&self) -> &[u8] {
        match self {
            Self::EofMidLength { remaining } | Self::EofMidData { remaining, .. } => remaining,
            Self::LengthBelowHeader { .. } | Self::OversizedFrame { .. } => &[],
        }
    }

    /// Returns true if the error was raised by the end-of-input check.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EofMidLength { .. } | Self::EofMidData { .. })
    }
}

impl From<DecodeError> for io::Error {
    fn from(err: DecodeError) -> Self {
        let kind = if err.is_eof() {
            io::ErrorKind::UnexpectedEof
        } else {
            io::ErrorKind::InvalidData
        };
        io::Error::new(kind, err)
    }
}

/// Errors raised while writing a frame.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The payload exceeds the configured maximum.
    #[error("frame size exceeds max length: {size} > {max}")]
    OversizedFrame {
        /// Payload length.
        size: usize,
        /// Configured maximum payload length.
        max: usize,
    },

    /// The declared length does not fit in the 4-byte length field.
    #[error("frame of {size} bytes does not fit a 32-bit length field")]
    LengthOverflow {
        /// Payload length.
        size: usize,
    },
}

impl From<EncodeError> for io::Error {
    fn from(err: EncodeError) -> Self { io::Error::new(io::ErrorKind::InvalidInput, err) }
}

/// Errors surfaced by the I/O adapters ([`LengthFrameCodec`](crate::LengthFrameCodec) and
/// [`FrameReader`](crate::FrameReader)).
#[derive(Debug, Error)]
pub enum StreamError {
    /// The byte stream was malformed.
    #[error("bad data: {0}")]
    Decode(#[from] DecodeError),

    /// A frame could not be written.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// The underlying byte source or sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StreamError {
    /// Returns the decode error if the stream was malformed.
    #[must_use]
    pub fn as_decode(&self) -> Option<&DecodeError> {
        match self {
            Self::Decode(err) => Some(err),
            Self::Encode(_) | Self::Io(_) => None,
        }
    }
}

impl From<StreamError> for io::Error {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::Decode(e) => e.into(),
            StreamError::Encode(e) => e.into(),
            StreamError::Io(e) => e,
        }
    }
}

/// Hex rendering of leftover bytes, truncated after [`HEX_PREVIEW_LIMIT`] bytes.
struct HexPreview<'a>(&'a [u8]);

impl fmt::Display for HexPreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.get(..HEX_PREVIEW_LIMIT) {
            Some(head) if head.len() < self.0.len() => write!(
                f,
                "{}... (+{} bytes)",
                hex::encode(head),
                self.0.len() - head.len()
            ),
            _ => f.write_str(&hex::encode(self.0)),
        }
    }
}

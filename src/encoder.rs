//! Writer for the length-prefixed wire format.
//!
//! [`FrameEncoder`] is the inverse of [`FrameDecoder`](crate::FrameDecoder):
//! bytes it produces decode back to the same payloads under the same
//! [`DecoderConfig`].

use bytes::{BufMut, BytesMut};

use crate::{byte_order::LENGTH_FIELD_SIZE, config::DecoderConfig, error::EncodeError};

/// Encoder writing `[length][payload]` records.
///
/// # Examples
///
/// ```
/// use bytes::BytesMut;
/// use lengthframe::{DecoderConfig, Endianness, FrameEncoder};
///
/// let encoder = FrameEncoder::new(DecoderConfig::new(Endianness::Little, 64, true));
/// let mut wire = BytesMut::new();
/// encoder.encode(b"abc", &mut wire).expect("payload fits");
/// assert_eq!(&wire[..], &[7, 0, 0, 0, b'a', b'b', b'c']);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameEncoder {
    config: DecoderConfig,
}

impl FrameEncoder {
    /// Create an encoder using the framing parameters in `config`.
    #[must_use]
    pub const fn new(config: DecoderConfig) -> Self { Self { config } }

    /// Configuration this encoder was built with.
    #[must_use]
    pub const fn config(&self) -> &DecoderConfig { &self.config }

    /// Value the length field takes for a payload of `payload_len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::OversizedFrame`] if the payload exceeds the
    /// configured maximum and [`EncodeError::LengthOverflow`] if the length
    /// field cannot represent it.
    pub fn declared_length(&self, payload_len: usize) -> Result<u32, EncodeError> {
        let max = self.config.max_payload_length();
        if payload_len > max {
            return Err(EncodeError::OversizedFrame {
                size: payload_len,
                max,
            });
        }
        let declared = if self.config.length_includes_self() {
            payload_len.checked_add(LENGTH_FIELD_SIZE)
        } else {
            Some(payload_len)
        };
        declared
            .and_then(|len| u32::try_from(len).ok())
            .ok_or(EncodeError::LengthOverflow { size: payload_len })
    }

    /// Append one frame carrying `payload` to `dst`.
    ///
    /// Nothing is written when an error is returned.
    ///
    /// # Errors
    ///
    /// See [`declared_length`](Self::declared_length).
    pub fn encode(&self, payload: &[u8], dst: &mut BytesMut) -> Result<(), EncodeError> {
        let declared = self.declared_length(payload.len())?;
        dst.reserve(LENGTH_FIELD_SIZE + payload.len());
        dst.put_slice(&self.config.endianness().write_length(declared));
        dst.put_slice(payload);
        Ok(())
    }
}

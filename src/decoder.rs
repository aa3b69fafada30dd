//! Incremental decoder for length-prefixed frames.
//!
//! [`FrameDecoder`] accepts input in chunks of any size and emits each
//! complete payload as soon as its last byte arrives. Chunk boundaries never
//! affect which frames or errors are produced.
//!
//! ```
//! use bytes::Bytes;
//! use lengthframe::{DecoderConfig, Endianness, FrameDecoder};
//!
//! let mut decoder = FrameDecoder::new(DecoderConfig::new(Endianness::Big, 16, false));
//!
//! assert!(decoder.feed(Bytes::from_static(&[0, 0, 0])).expect("valid input").is_empty());
//! let frames = decoder
//!     .feed(Bytes::from_static(&[2, b'h', b'i', 0, 0]))
//!     .expect("valid input");
//! assert_eq!(frames, vec![&b"hi"[..]]);
//!
//! // Two bytes of the next length field are still pending.
//! assert!(decoder.finish().is_err());
//! ```

use bytes::{Buf, Bytes};
use tracing::{debug, trace};

use crate::{
    buffer::SegmentBuffer,
    byte_order::LENGTH_FIELD_SIZE,
    config::DecoderConfig,
    error::{ConfigError, DecodeError},
};

/// Position of the decoder within the current frame.
#[derive(Clone, Debug, PartialEq, Eq)]
enum State {
    /// The next bytes are a length field.
    AwaitingLength,
    /// A length field was accepted; `payload_len` bytes of payload follow.
    AwaitingData { payload_len: usize },
    /// Decoding stopped on a malformed stream.
    Failed(DecodeError),
}

/// Streaming decoder turning a byte stream into frame payloads.
///
/// Frames are returned as [`Bytes`] slices of the decoder's working buffer,
/// so emitting a frame does not copy its payload.
#[derive(Debug)]
pub struct FrameDecoder {
    config: DecoderConfig,
    state: State,
    pending: SegmentBuffer,
}

impl FrameDecoder {
    /// Create a decoder awaiting its first length field.
    #[must_use]
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            state: State::AwaitingLength,
            pending: SegmentBuffer::new(),
        }
    }

    /// Create a decoder from untyped configuration parts.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] under the same conditions as
    /// [`DecoderConfig::try_from_parts`].
    pub fn try_new(
        endianness: &str,
        max_payload_length: i64,
        length_includes_self: bool,
    ) -> Result<Self, ConfigError> {
        DecoderConfig::try_from_parts(endianness, max_payload_length, length_includes_self)
            .map(Self::new)
    }

    /// Configuration this decoder was built with.
    #[must_use]
    pub fn config(&self) -> &DecoderConfig { &self.config }

    /// Number of received bytes not yet emitted as part of a frame.
    #[must_use]
    pub fn buffered_len(&self) -> usize { self.pending.len() }

    /// Returns true if the decoder sits at a frame boundary.
    #[must_use]
    pub fn is_awaiting_length(&self) -> bool { self.state == State::AwaitingLength }

    /// Feed the next chunk and collect the frames it completes.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the stream is malformed. The decoder is
    /// then failed and returns the same error from every later call.
    pub fn feed(&mut self, chunk: impl Into<Bytes>) -> Result<Vec<Bytes>, DecodeError> {
        let mut frames = Vec::new();
        self.feed_with(chunk, |frame| frames.push(frame))?;
        Ok(frames)
    }

    /// Feed the next chunk, handing each completed frame to `on_frame` in
    /// stream order before returning.
    ///
    /// Frames completed before a malformed length field is reached are still
    /// delivered.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the stream is malformed. The decoder is
    /// then failed and returns the same error from every later call.
    pub fn feed_with<F>(
        &mut self,
        chunk: impl Into<Bytes>,
        mut on_frame: F,
    ) -> Result<(), DecodeError>
    where
        F: FnMut(Bytes),
    {
        if let State::Failed(err) = &self.state {
            return Err(err.clone());
        }

        self.pending.push(chunk.into());
        if self.pending.len() < self.bytes_needed() {
            return Ok(());
        }

        let mut working = self.pending.take_contiguous();
        match self.drain(&mut working, &mut on_frame) {
            Ok(()) => {
                self.pending.push(working);
                Ok(())
            }
            Err(err) => {
                debug!(
                    reason = %err.reason(),
                    error = %err,
                    "rejecting malformed frame stream"
                );
                self.pending.clear();
                self.state = State::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Signal the end of input.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::EofMidLength`] or [`DecodeError::EofMidData`]
    /// if input stopped inside a frame, carrying the leftover bytes, or the
    /// stored error if the decoder had already failed.
    pub fn finish(mut self) -> Result<(), DecodeError> {
        let remaining = self.pending.take_contiguous();
        let err = match self.state {
            State::AwaitingLength if remaining.is_empty() => {
                trace!("frame stream finished at a frame boundary");
                return Ok(());
            }
            State::AwaitingLength => DecodeError::EofMidLength { remaining },
            State::AwaitingData { payload_len } => DecodeError::EofMidData {
                expected: payload_len,
                remaining,
            },
            State::Failed(err) => return Err(err),
        };
        debug!(
            reason = %err.reason(),
            leftover = err.leftover().len(),
            "frame stream ended inside a frame"
        );
        Err(err)
    }

    /// Bytes that must be buffered before draining can make progress.
    fn bytes_needed(&self) -> usize {
        match self.state {
            State::AwaitingLength => LENGTH_FIELD_SIZE,
            State::AwaitingData { payload_len } => payload_len,
            State::Failed(_) => 0,
        }
    }

    /// Consume as many frames as possible from `working`, leaving the
    /// unconsumed tail in place.
    fn drain<F>(&mut self, working: &mut Bytes, on_frame: &mut F) -> Result<(), DecodeError>
    where
        F: FnMut(Bytes),
    {
        loop {
            match self.state {
                State::AwaitingLength => {
                    let Some(field) = working
                        .get(..LENGTH_FIELD_SIZE)
                        .and_then(|slice| <[u8; LENGTH_FIELD_SIZE]>::try_from(slice).ok())
                    else {
                        return Ok(());
                    };
                    let declared = self.config.endianness().read_length(field);
                    let payload_len = self.payload_length(declared)?;
                    trace!(declared, payload_len, "read frame length");
                    working.advance(LENGTH_FIELD_SIZE);
                    self.state = State::AwaitingData { payload_len };
                }
                State::AwaitingData { payload_len } => {
                    if working.len() < payload_len {
                        return Ok(());
                    }
                    let frame = working.split_to(payload_len);
                    self.state = State::AwaitingLength;
                    trace!(len = frame.len(), "decoded frame");
                    on_frame(frame);
                }
                State::Failed(ref err) => return Err(err.clone()),
            }
        }
    }

    /// Translate a declared length into a payload length and bound-check it.
    ///
    /// The self-inclusion adjustment is applied before the bound check, so a
    /// declared length of `max + 4` is accepted when the field includes itself.
    fn payload_length(&self, declared: u32) -> Result<usize, DecodeError> {
        let declared_len = declared as usize;
        let payload_len = if self.config.length_includes_self() {
            declared_len
                .checked_sub(LENGTH_FIELD_SIZE)
                .ok_or(DecodeError::LengthBelowHeader { declared })?
        } else {
            declared_len
        };
        let max = self.config.max_payload_length();
        if payload_len > max {
            return Err(DecodeError::OversizedFrame {
                size: payload_len,
                max,
            });
        }
        Ok(payload_len)
    }
}

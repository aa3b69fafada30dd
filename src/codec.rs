//! `tokio-util` codec adapter for the frame decoder.
//!
//! [`LengthFrameCodec`] implements [`Decoder`] and [`Encoder`] so the same
//! framing can drive [`FramedRead`] and `FramedWrite`. Decoding hands the
//! whole read buffer to a [`FrameDecoder`] on every call, so split reads are
//! handled by the core decoder rather than by re-scanning `src`. Frames
//! completed by one read are queued and returned one per `decode` call.
//!
//! ```
//! use futures::StreamExt;
//! use lengthframe::{DecoderConfig, codec::read_frames};
//!
//! # async fn demo() {
//! let wire: &[u8] = &[0, 0, 0, 2, b'o', b'k'];
//! let mut frames = read_frames(wire, DecoderConfig::default());
//! let frame = frames.next().await.expect("one frame").expect("well formed");
//! assert_eq!(&frame[..], b"ok");
//! assert!(frames.next().await.is_none());
//! # }
//! ```

use std::collections::VecDeque;

use bytes::{Bytes, BytesMut};
use tokio::io::AsyncRead;
use tokio_util::codec::{Decoder, Encoder, FramedRead};

use crate::{
    config::DecoderConfig,
    decoder::FrameDecoder,
    encoder::FrameEncoder,
    error::{DecodeError, StreamError},
};

/// Length-prefixed codec backed by [`FrameDecoder`] and [`FrameEncoder`].
#[derive(Debug)]
pub struct LengthFrameCodec {
    /// `None` once end of input has been processed.
    decoder: Option<FrameDecoder>,
    encoder: FrameEncoder,
    ready: VecDeque<Bytes>,
    /// Error to report once the frames preceding it have been returned.
    failure: Option<DecodeError>,
}

impl LengthFrameCodec {
    /// Construct a codec for the framing described by `config`.
    #[must_use]
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            decoder: Some(FrameDecoder::new(config)),
            encoder: FrameEncoder::new(config),
            ready: VecDeque::new(),
            failure: None,
        }
    }

    /// Framing parameters used by this codec.
    #[must_use]
    pub fn config(&self) -> &DecoderConfig { self.encoder.config() }
}

impl Default for LengthFrameCodec {
    fn default() -> Self { Self::new(DecoderConfig::default()) }
}

impl Decoder for LengthFrameCodec {
    type Item = Bytes;
    type Error = StreamError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(frame) = self.ready.pop_front() {
            return Ok(Some(frame));
        }
        if let Some(err) = self.failure.take() {
            return Err(err.into());
        }
        let Some(decoder) = self.decoder.as_mut() else {
            return Ok(None);
        };
        if src.is_empty() {
            return Ok(None);
        }

        let ready = &mut self.ready;
        if let Err(err) = decoder.feed_with(src.split().freeze(), |frame| ready.push_back(frame)) {
            self.decoder = None;
            if self.ready.is_empty() {
                return Err(err.into());
            }
            self.failure = Some(err);
        }
        Ok(self.ready.pop_front())
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }
        if let Some(decoder) = self.decoder.take() {
            decoder.finish()?;
        }
        Ok(None)
    }
}

impl Encoder<Bytes> for LengthFrameCodec {
    type Error = StreamError;

    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encoder.encode(&item, dst)?;
        Ok(())
    }
}

impl Encoder<&[u8]> for LengthFrameCodec {
    type Error = StreamError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encoder.encode(item, dst)?;
        Ok(())
    }
}

/// Wrap `reader` in a stream of decoded frames.
///
/// The stream ends after the final frame when input stops at a frame
/// boundary, or yields a single error and then ends.
pub fn read_frames<R: AsyncRead>(
    reader: R,
    config: DecoderConfig,
) -> FramedRead<R, LengthFrameCodec> {
    FramedRead::new(reader, LengthFrameCodec::new(config))
}

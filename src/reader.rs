//! Blocking frame iterator over a [`Read`] source.

use std::{
    collections::VecDeque,
    io::{self, Read},
};

use bytes::Bytes;

use crate::{config::DecoderConfig, decoder::FrameDecoder, error::StreamError};

/// Default number of bytes requested from the source per read.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Iterator yielding the frames of a byte source.
///
/// The iterator is finite and fused: it ends after the last frame when input
/// stops at a frame boundary, or after yielding the first error.
///
/// # Examples
///
/// ```
/// use lengthframe::{DecoderConfig, FrameReader};
///
/// let wire: &[u8] = &[0, 0, 0, 1, b'x', 0, 0, 0, 0];
/// let frames: Vec<_> = FrameReader::new(wire, DecoderConfig::default())
///     .collect::<Result<_, _>>()
///     .expect("well-formed stream");
/// assert_eq!(frames, vec![&b"x"[..], b""]);
/// ```
#[derive(Debug)]
pub struct FrameReader<R> {
    source: R,
    decoder: Option<FrameDecoder>,
    ready: VecDeque<Bytes>,
    /// Error to report once the frames preceding it have been yielded.
    failure: Option<StreamError>,
    /// Read buffer reused across calls; only the bytes read are queued.
    scratch: Vec<u8>,
}

impl<R: Read> FrameReader<R> {
    /// Read from `source` in chunks of [`DEFAULT_CHUNK_SIZE`] bytes.
    pub fn new(source: R, config: DecoderConfig) -> Self {
        Self::with_chunk_size(source, config, DEFAULT_CHUNK_SIZE)
    }

    /// Read from `source` in chunks of at most `chunk_size` bytes.
    ///
    /// A `chunk_size` of zero is treated as one.
    pub fn with_chunk_size(source: R, config: DecoderConfig, chunk_size: usize) -> Self {
        Self {
            source,
            decoder: Some(FrameDecoder::new(config)),
            ready: VecDeque::new(),
            failure: None,
            scratch: vec![0; chunk_size.max(1)],
        }
    }

    /// Consume the iterator, returning the underlying source.
    pub fn into_inner(self) -> R { self.source }

    /// Read one chunk and feed it. Returns `Ok(false)` once input has ended.
    fn fill(&mut self, decoder: &mut FrameDecoder) -> Result<bool, StreamError> {
        let read = loop {
            match self.source.read(&mut self.scratch) {
                Ok(read) => break read,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err.into()),
            }
        };
        if read == 0 {
            return Ok(false);
        }
        let chunk = Bytes::copy_from_slice(&self.scratch[..read]);
        let ready = &mut self.ready;
        decoder.feed_with(chunk, |frame| ready.push_back(frame))?;
        Ok(true)
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<Bytes, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(frame) = self.ready.pop_front() {
                return Some(Ok(frame));
            }
            if let Some(err) = self.failure.take() {
                return Some(Err(err));
            }
            let mut decoder = self.decoder.take()?;
            match self.fill(&mut decoder) {
                Ok(true) => self.decoder = Some(decoder),
                Ok(false) => return decoder.finish().err().map(|err| Err(err.into())),
                Err(err) => self.failure = Some(err),
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for FrameReader<R> {}

#[cfg(test)]
mod tests {
    use std::io::{self, Read};

    use rstest::rstest;

    use super::FrameReader;
    use crate::{DecodeReason, DecoderConfig, Endianness, StreamError};

    /// Source returning `Interrupted` before every successful read.
    struct Flaky<'a> {
        data: &'a [u8],
        interrupt: bool,
    }

    impl Read for Flaky<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::ErrorKind::Interrupted.into());
            }
            self.data.read(buf)
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    const WIRE: &[u8] = &[2, 0, 0, 0, 9, 8, 0, 0, 0, 0, 1, 0, 0, 0, 7];

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(64)]
    fn yields_frames_for_any_chunk_size(#[case] chunk_size: usize) {
        let config = DecoderConfig::new(Endianness::Little, 16, false);
        let frames: Vec<_> = FrameReader::with_chunk_size(WIRE, config, chunk_size)
            .collect::<Result<_, _>>()
            .expect("well-formed stream");
        assert_eq!(frames, vec![&[9_u8, 8][..], b"", &[7]]);
    }

    #[test]
    fn retries_interrupted_reads() {
        let source = Flaky {
            data: WIRE,
            interrupt: false,
        };
        let config = DecoderConfig::new(Endianness::Little, 16, false);
        let count = FrameReader::with_chunk_size(source, config, 4)
            .map(|frame| frame.expect("valid"))
            .count();
        assert_eq!(count, 3);
    }

    #[test]
    fn stops_after_the_first_error() {
        let config = DecoderConfig::new(Endianness::Little, 16, false);
        let mut reader = FrameReader::new(&WIRE[..WIRE.len() - 1], config);
        assert!(reader.next().expect("first").is_ok());
        assert!(reader.next().expect("second").is_ok());
        let err = reader.next().expect("error").expect_err("truncated payload");
        assert_eq!(
            err.as_decode().map(crate::DecodeError::reason),
            Some(DecodeReason::EofMidData)
        );
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }

    #[test]
    fn frames_before_a_malformed_length_come_first() {
        let config = DecoderConfig::new(Endianness::Little, 1, false);
        let wire: &[u8] = &[1, 0, 0, 0, 5, 2, 0, 0, 0, 6, 6];
        let mut reader = FrameReader::new(wire, config);
        assert_eq!(&reader.next().expect("frame").expect("valid")[..], &[5]);
        let err = reader.next().expect("error").expect_err("oversized");
        assert_eq!(
            err.as_decode().map(crate::DecodeError::reason),
            Some(DecodeReason::OversizedFrame)
        );
        assert!(reader.next().is_none());
    }

    #[test]
    fn surfaces_source_errors() {
        let mut reader = FrameReader::new(Broken, DecoderConfig::default());
        let err = reader.next().expect("error").expect_err("read failure");
        assert!(matches!(err, StreamError::Io(ref e) if e.kind() == io::ErrorKind::ConnectionReset));
        assert!(reader.next().is_none());
    }

    #[test]
    fn empty_source_yields_nothing() {
        assert_eq!(FrameReader::new(io::empty(), DecoderConfig::default()).count(), 0);
    }
}

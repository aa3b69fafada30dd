//! Shared utilities for integration tests.
//!
//! Provides wire encoding and chunked decoding helpers so each test binary
//! can compare decoder output across chunkings.

// Items in this shared module may not be used by all test binaries that import it.
#![allow(
    dead_code,
    reason = "shared test utilities are not used by all test binaries"
)]

use bytes::{Bytes, BytesMut};
use lengthframe::{DecodeError, DecoderConfig, FrameDecoder, FrameEncoder};

/// Payload lengths exercised by the round-trip suites.
pub const PAYLOAD_LENGTHS: &[usize] = &[0, 1, 2, 4, 5, 10, 200, 2_000, 20_000, 200_000];

/// Deterministic payload of `len` bytes whose contents depend on `seed`.
pub fn payload(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| seed.wrapping_add(u8::try_from(i % 256).unwrap_or_default()))
        .collect()
}

/// One payload per entry of [`PAYLOAD_LENGTHS`].
pub fn sample_payloads() -> Vec<Vec<u8>> {
    PAYLOAD_LENGTHS
        .iter()
        .zip(0_u8..)
        .map(|(len, seed)| payload(*len, seed))
        .collect()
}

/// Encode `payloads` back to back using `config`.
pub fn encode_all(config: DecoderConfig, payloads: &[Vec<u8>]) -> Vec<u8> {
    let encoder = FrameEncoder::new(config);
    let mut wire = BytesMut::new();
    for payload in payloads {
        encoder.encode(payload, &mut wire).expect("payload fits");
    }
    wire.to_vec()
}

/// Everything a decoder produced for one chunking of a stream.
#[derive(Debug, PartialEq, Eq)]
pub struct Outcome {
    pub frames: Vec<Bytes>,
    pub end: Result<(), DecodeError>,
}

/// Feed `wire` to a fresh decoder split at the sizes yielded by `sizes`
/// (cycled), then finish.
pub fn decode_with_sizes(config: DecoderConfig, wire: &[u8], sizes: &[usize]) -> Outcome {
    let mut decoder = FrameDecoder::new(config);
    let mut frames = Vec::new();
    let mut rest = wire;
    for size in sizes.iter().cycle() {
        if rest.is_empty() {
            break;
        }
        let (chunk, tail) = rest.split_at((*size).clamp(1, rest.len()));
        rest = tail;
        if let Err(err) =
            decoder.feed_with(Bytes::copy_from_slice(chunk), |frame| frames.push(frame))
        {
            return Outcome {
                frames,
                end: Err(err),
            };
        }
    }
    Outcome {
        frames,
        end: decoder.finish(),
    }
}

/// Feed `wire` in fixed-size chunks.
pub fn decode_chunked(config: DecoderConfig, wire: &[u8], chunk_size: usize) -> Outcome {
    decode_with_sizes(config, wire, &[chunk_size])
}

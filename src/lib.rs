#![doc(html_root_url = "https://docs.rs/lengthframe/latest")]
//! Public API for the `lengthframe` library.
//!
//! This crate decodes streams of `[4-byte length][payload]` frames that
//! arrive in arbitrarily sized chunks. The core is [`FrameDecoder`], a push
//! decoder with a two-state machine and a deferred-concatenation buffer. The
//! [`codec`] and [`reader`] modules adapt it to `tokio` streams and blocking
//! [`std::io::Read`] sources.

mod buffer;
pub mod byte_order;
pub mod codec;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod reader;

pub use byte_order::{Endianness, LENGTH_FIELD_SIZE};
pub use codec::LengthFrameCodec;
pub use config::{DEFAULT_MAX_PAYLOAD_LENGTH, DecoderConfig};
pub use decoder::FrameDecoder;
pub use encoder::FrameEncoder;
pub use error::{ConfigError, DecodeError, DecodeReason, EncodeError, StreamError};
pub use reader::FrameReader;

//! Binary decoding a length-prefixed stream from a file or standard input.
//!
//! Prints one line per decoded frame and exits non-zero on malformed input.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use futures::StreamExt;
use lengthframe::{DecoderConfig, LengthFrameCodec};
use tokio::io::AsyncRead;
use tokio_util::codec::FramedRead;

#[tokio::main]
async fn main() -> ExitCode {
    // Diagnostics go to stderr so stdout carries only the frame listing.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = cli::Cli::parse();
    match run(cli).await {
        Ok(count) => {
            tracing::info!(frames = count, "stream decoded");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("lengthframe: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: cli::Cli) -> Result<usize, Box<dyn std::error::Error>> {
    let config = DecoderConfig::try_from_parts(
        &cli.endianness,
        cli.max_payload_length,
        cli.length_includes_self,
    )?;

    let input: Box<dyn AsyncRead + Unpin + Send> = match &cli.path {
        Some(path) => Box::new(tokio::fs::File::open(path).await?),
        None => Box::new(tokio::io::stdin()),
    };

    let mut frames =
        FramedRead::with_capacity(input, LengthFrameCodec::new(config), cli.chunk_size.max(1));
    let mut count = 0;
    while let Some(frame) = frames.next().await {
        let frame = frame?;
        println!("frame {count}: {} bytes", frame.len());
        count += 1;
    }
    Ok(count)
}

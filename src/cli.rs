//! Command line interface for the `lengthframe` binary.
//!
//! Describes the framing parameters and input source for decoding a
//! length-prefixed stream from a file or standard input.

use std::path::PathBuf;

use clap::Parser;

/// Command line arguments for the `lengthframe` binary.
#[derive(Debug, Parser)]
#[command(
    name = "lengthframe",
    version,
    about = "Decode a stream of length-prefixed frames"
)]
pub struct Cli {
    /// Byte order of the 4-byte length field (`LE` or `BE`).
    #[arg(short, long, default_value = "BE")]
    pub endianness: String,

    /// Largest payload accepted, in bytes.
    #[arg(short, long, default_value_t = 4_294_967_295, allow_negative_numbers = true)]
    pub max_payload_length: i64,

    /// The length field counts its own 4 bytes.
    #[arg(short, long)]
    pub length_includes_self: bool,

    /// Bytes requested from the input per read.
    #[arg(short, long, default_value_t = 64 * 1024)]
    pub chunk_size: usize,

    /// Input file; standard input when omitted.
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;

    #[test]
    fn defaults_to_big_endian_stdin() {
        let cli = Cli::parse_from(["lengthframe"]);
        assert_eq!(cli.endianness, "BE");
        assert_eq!(cli.max_payload_length, i64::from(u32::MAX));
        assert!(!cli.length_includes_self);
        assert!(cli.path.is_none());
    }

    #[test]
    fn parses_framing_options() {
        let cli = Cli::parse_from([
            "lengthframe",
            "--endianness",
            "LE",
            "--max-payload-length",
            "1024",
            "--length-includes-self",
            "--chunk-size",
            "1",
            "frames.bin",
        ]);
        assert_eq!(cli.endianness, "LE");
        assert_eq!(cli.max_payload_length, 1024);
        assert!(cli.length_includes_self);
        assert_eq!(cli.chunk_size, 1);
        assert_eq!(cli.path.as_deref(), Some(std::path::Path::new("frames.bin")));
    }
}

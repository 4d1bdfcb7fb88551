//! shamir: split a secret into K-of-N shares and combine them back.
//!
//! Share files use the raw wire format (`[index] || value`) unless `--hex` is given.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use zeroize::Zeroizing;

use shamir_gf256::entropy::OsSource;
use shamir_gf256::io::{self, OutputTarget, SecretSource, ShareEncoding};
use shamir_gf256::{SecretSharingScheme, ShamirConfig};

/// Threshold secret sharing over GF(2^8).
///
/// Any K of the N shares reconstruct the secret; fewer reveal nothing.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a secret into N share files
    Split(SplitArgs),
    /// Recover a secret from share files
    Combine(CombineArgs),
}

/// Field and tagging options shared by both directions.
#[derive(Args, Debug)]
struct SchemeArgs {
    /// Use the prefix tagging scheme so combine can detect bad share sets
    #[arg(short = 't', long)]
    tagged: bool,

    /// Reduction polynomial of the Galois field, decimal or 0x-hex (default 0x11B)
    #[arg(short = 'P', long, requires = "generator", value_parser = parse_u16)]
    poly: Option<u16>,

    /// Generator of the Galois field, decimal or 0x-hex (default 0x03)
    #[arg(short = 'G', long = "gen", requires = "poly", value_parser = parse_u8)]
    generator: Option<u8>,

    /// Read and write shares as hex text instead of raw bytes
    #[arg(long)]
    hex: bool,
}

impl SchemeArgs {
    fn config(&self) -> ShamirConfig {
        let mut config = ShamirConfig { tagged: self.tagged, ..ShamirConfig::default() };
        if let (Some(poly), Some(generator)) = (self.poly, self.generator) {
            config.modulus = poly;
            config.generator = generator;
        }
        config
    }

    fn encoding(&self) -> ShareEncoding {
        if self.hex {
            ShareEncoding::Hex
        } else {
            ShareEncoding::Binary
        }
    }
}

#[derive(Args, Debug)]
struct SplitArgs {
    #[command(flatten)]
    scheme: SchemeArgs,

    /// Number of shares required to recover the secret
    #[arg(short = 'k', long)]
    threshold: u8,

    /// Number of shares to generate in total
    #[arg(short = 'n', long)]
    count: u8,

    /// Input file (`-` or `stdin` for standard input; default: trailing words, else stdin)
    #[arg(short = 'i', long, value_name = "FILE")]
    input: Option<String>,

    /// Output name; `{i}` is replaced with the share index, otherwise the index is appended
    #[arg(short = 'o', long, value_name = "TEMPLATE", default_value = "")]
    output: String,

    /// Secret given inline, joined with spaces (after `--` if a word starts with `-`)
    words: Vec<String>,
}

#[derive(Args, Debug)]
struct CombineArgs {
    #[command(flatten)]
    scheme: SchemeArgs,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<String>,

    /// Share files to combine
    #[arg(required = true)]
    shares: Vec<PathBuf>,
}

fn parse_u16(text: &str) -> Result<u16, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(digits) => u16::from_str_radix(digits, 16),
        None => text.parse::<u16>(),
    };
    parsed.map_err(|e| format!("invalid number {:?}: {}", text, e))
}

fn parse_u8(text: &str) -> Result<u8, String> {
    let wide = parse_u16(text)?;
    u8::try_from(wide).map_err(|_| format!("{} does not fit in a byte", text))
}

fn split(args: SplitArgs) -> Result<()> {
    let scheme = args.scheme.config().scheme().context("building Galois field")?;

    let source = SecretSource::from_args(args.input.as_deref(), &args.words);
    let secret = io::read_secret(&source).context("reading input")?;

    let shares = scheme
        .split(&secret, args.threshold, args.count, &mut OsSource::new())
        .context("splitting secret")?;

    let written = io::write_shares(&args.output, &shares, args.scheme.encoding())
        .context("writing shares")?;
    for path in written {
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn combine(args: CombineArgs) -> Result<()> {
    let scheme = args.scheme.config().scheme().context("building Galois field")?;

    let shares = io::read_shares(&args.shares, args.scheme.encoding())
        .context("reading share files")?;

    let secret = Zeroizing::new(scheme.combine(&shares).context("combining shares")?);

    io::write_output(&OutputTarget::from_arg(args.output.as_deref()), &secret)
        .context("writing output")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Split(args) => split(args),
        Command::Combine(args) => combine(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_u16("0x11B"), Ok(0x11B));
        assert_eq!(parse_u16("283"), Ok(0x11B));
        assert_eq!(parse_u8("0x03"), Ok(3));
        assert!(parse_u8("0x100").is_err());
        assert!(parse_u16("zz").is_err());
    }

    #[test]
    fn test_field_flags_go_together() {
        assert!(Cli::try_parse_from(["shamir", "combine", "-P", "0x11D", "a"]).is_err());

        let cli = Cli::try_parse_from(["shamir", "combine", "-P", "0x11D", "-G", "2", "-t", "a", "b"])
            .unwrap();
        match cli.command {
            Command::Combine(args) => {
                let config = args.scheme.config();
                assert_eq!((config.modulus, config.generator, config.tagged), (0x11D, 2, true));
                assert_eq!(args.shares.len(), 2);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_split_args() {
        let cli = Cli::try_parse_from(["shamir", "split", "-k", "3", "-n", "5", "-o", "s{i}", "top", "secret"])
            .unwrap();
        match cli.command {
            Command::Split(args) => {
                assert_eq!((args.threshold, args.count), (3, 5));
                assert_eq!(args.output, "s{i}");
                assert_eq!(args.words, ["top", "secret"]);
                assert_eq!(args.scheme.config(), ShamirConfig::default());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_flags_after_inline_words() {
        let cli = Cli::try_parse_from(["shamir", "split", "-k", "2", "-n", "3", "top", "secret", "-t"])
            .unwrap();
        match cli.command {
            Command::Split(args) => {
                assert!(args.scheme.tagged);
                assert_eq!(args.words, ["top", "secret"]);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let cli = Cli::try_parse_from(["shamir", "split", "-k", "2", "-n", "3", "--", "-t", "x"])
            .unwrap();
        match cli.command {
            Command::Split(args) => {
                assert!(!args.scheme.tagged);
                assert_eq!(args.words, ["-t", "x"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}

//! Command-line interpretation.
//!
//! The argument surface is small enough that a plain token loop beats a
//! declarative parser here: duplicate-flag faults, the two-digit numeric
//! form, and the program-name personality all need exact control.

use std::path::PathBuf;

use crate::error::DriverError;

/// Program names ending in this suffix select decompression by default,
/// so the same binary can be installed under two personalities.
pub const DECOMPRESS_ALIAS: &str = "unbrio";

/// Help block printed to stderr on any usage fault.
pub const USAGE: &str = "\
Usage: brio [--quality n] [--window n] [--mode n] [--decompress] [--force] \
[--input filename] [--output filename] [--repeat iters] [--verbose]
  --quality: controls the compression-speed vs compression-density tradeoff.
             The higher the quality, the slower the compression.
             Range is 0 to 11. Defaults to 11.
  --window:  base 2 logarithm of the sliding window size.
             Range is 16 to 24. Defaults to 22.
  --mode:    the compression mode can be 0 for generic input, 1 for UTF-8
             encoded text, or 2 for WOFF 2.0 font data. Defaults to 0.
Usage example: brio -q 9 -w 24 -v -f -i INFILE -o OUTFILE";

/// Input class hint forwarded to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No assumptions about the input.
    Generic,
    /// UTF-8 encoded text.
    Text,
    /// WOFF 2.0 font data.
    Font,
}

impl Mode {
    /// Map a raw numeric token onto a mode. The parser accepts any one or
    /// two digit value, so unknown numbers degrade to [`Mode::Generic`].
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Mode::Text,
            2 => Mode::Font,
            _ => Mode::Generic,
        }
    }
}

/// Immutable run configuration, constructed once from the argument list and
/// consumed by every iteration of the run loop.
///
/// `quality`, `lgwin` and `mode` only matter when compressing.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub force: bool,
    pub quality: u32,
    pub decompress: bool,
    pub repeat: u32,
    pub verbose: bool,
    pub lgwin: u32,
    pub mode: Mode,
}

impl Config {
    /// Interpret the full argument list, program name included.
    ///
    /// Numeric flags accept one or two ASCII digits and nothing else; the
    /// documented ranges (0-11 for quality, 16-24 for window) are not
    /// enforced beyond that.
    pub fn from_args(args: &[String]) -> Result<Self, DriverError> {
        let program = args.first().map(String::as_str).unwrap_or("");
        let mut config = Config {
            input_path: None,
            output_path: None,
            force: false,
            quality: 11,
            decompress: program.ends_with(DECOMPRESS_ALIAS),
            repeat: 1,
            verbose: false,
            lgwin: 22,
            mode: Mode::Generic,
        };
        let mut k = 1;
        while k < args.len() {
            let arg = args[k].as_str();
            match arg {
                "--force" | "-f" => {
                    if config.force {
                        return Err(usage("--force given more than once"));
                    }
                    config.force = true;
                }
                "--decompress" | "--uncompress" | "-d" => {
                    config.decompress = true;
                }
                "--verbose" | "-v" => {
                    if config.verbose {
                        return Err(usage("--verbose given more than once"));
                    }
                    config.verbose = true;
                }
                // Flags below consume the following token, so they are only
                // recognized when one is left.
                _ if k + 1 < args.len() => {
                    let value = args[k + 1].as_str();
                    match arg {
                        "--input" | "--in" | "-i" => {
                            if config.input_path.is_some() {
                                return Err(usage("--input given more than once"));
                            }
                            config.input_path = Some(PathBuf::from(value));
                        }
                        "--output" | "--out" | "-o" => {
                            if config.output_path.is_some() {
                                return Err(usage("--output given more than once"));
                            }
                            config.output_path = Some(PathBuf::from(value));
                        }
                        "--quality" | "-q" => {
                            config.quality = numeric(arg, value)?;
                        }
                        "--repeat" | "-r" => {
                            config.repeat = numeric(arg, value)?;
                        }
                        "--window" | "-w" => {
                            config.lgwin = numeric(arg, value)?;
                        }
                        "--mode" | "-m" => {
                            config.mode = Mode::from_raw(numeric(arg, value)?);
                        }
                        _ => return Err(usage(format!("unrecognized option '{arg}'"))),
                    }
                    k += 1;
                }
                _ => return Err(usage(format!("unrecognized option '{arg}'"))),
            }
            k += 1;
        }
        Ok(config)
    }
}

fn usage(msg: impl Into<String>) -> DriverError {
    DriverError::Usage(msg.into())
}

fn numeric(flag: &str, value: &str) -> Result<u32, DriverError> {
    parse_two_digits(value)
        .ok_or_else(|| usage(format!("{flag} expects one or two digits, got '{value}'")))
}

/// Accept a bare one or two digit ASCII number, rejecting signs, spaces and
/// anything longer.
fn parse_two_digits(token: &str) -> Option<u32> {
    match token.as_bytes() {
        [a] if a.is_ascii_digit() => Some(u32::from(a - b'0')),
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
        }
        _ => None,
    }
}

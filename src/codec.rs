//! Boundary to the external compression engine.
//!
//! The driver only ever sees two single-shot operations with a boolean
//! success contract; everything about the bitstream lives behind them.

use std::io::{Read, Write};

use brotli::enc::backward_references::BrotliEncoderMode;
use brotli::enc::BrotliEncoderParams;
use log::debug;

use crate::config::{Config, Mode};

/// Encoder tuning taken from the run configuration.
#[derive(Debug, Clone, Copy)]
pub struct EncodeParams {
    pub quality: u32,
    pub lgwin: u32,
    pub mode: Mode,
}

impl EncodeParams {
    pub fn from_config(config: &Config) -> Self {
        EncodeParams {
            quality: config.quality,
            lgwin: config.lgwin,
            mode: config.mode,
        }
    }
}

/// Single-shot compression engine.
///
/// Both calls are opaque and potentially expensive. On failure the state of
/// the output stream is unspecified; the caller owns any cleanup.
pub trait Codec {
    fn compress(
        &self,
        params: &EncodeParams,
        input: &mut dyn Read,
        output: &mut dyn Write,
    ) -> bool;

    fn decompress(&self, input: &mut dyn Read, output: &mut dyn Write) -> bool;
}

/// Brotli-backed engine.
pub struct BrotliCodec;

impl Codec for BrotliCodec {
    fn compress(
        &self,
        params: &EncodeParams,
        mut input: &mut dyn Read,
        mut output: &mut dyn Write,
    ) -> bool {
        let enc = BrotliEncoderParams {
            quality: params.quality as i32,
            lgwin: params.lgwin as i32,
            mode: match params.mode {
                Mode::Generic => BrotliEncoderMode::BROTLI_MODE_GENERIC,
                Mode::Text => BrotliEncoderMode::BROTLI_MODE_TEXT,
                Mode::Font => BrotliEncoderMode::BROTLI_MODE_FONT,
            },
            ..BrotliEncoderParams::default()
        };
        match brotli::BrotliCompress(&mut input, &mut output, &enc) {
            Ok(_) => true,
            Err(e) => {
                debug!("encoder failed: {e}");
                false
            }
        }
    }

    fn decompress(&self, mut input: &mut dyn Read, mut output: &mut dyn Write) -> bool {
        match brotli::BrotliDecompress(&mut input, &mut output) {
            Ok(()) => true,
            Err(e) => {
                debug!("decoder failed: {e}");
                false
            }
        }
    }
}

//! Command-line driver around a byte-stream compression engine.
//!
//! The driver turns its argument list into an immutable run configuration,
//! opens input and output as plain byte streams over files or the standard
//! streams, repeats the configured operation for benchmarking, and reports
//! sizes and throughput afterwards. The engine itself sits behind the
//! [`codec::Codec`] trait and is consumed as a black box.

pub mod codec;
pub mod config;
pub mod error;
pub mod metrics;
pub mod run;
pub mod stream;

pub use codec::{BrotliCodec, Codec, EncodeParams};
pub use config::{Config, Mode, DECOMPRESS_ALIAS, USAGE};
pub use error::DriverError;
pub use metrics::RunMetrics;
pub use run::{execute, Transfer};

//! Post-run measurement and the verbose summary line.

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::config::Config;
use crate::run::Transfer;

/// Floor for the elapsed time, guarding the throughput division when a run
/// finishes faster than the clock resolves.
const MIN_ELAPSED_SECS: f64 = 1e-9;

/// Sizes and wall-clock time observed for a completed run. Derived after
/// the last repetition and used only for the report.
#[derive(Debug, Clone, Copy)]
pub struct RunMetrics {
    pub elapsed_secs: f64,
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl RunMetrics {
    /// Measure the finished run.
    ///
    /// Path-backed endpoints are sized on disk after all repetitions;
    /// standard-stream endpoints fall back to the byte counters from the
    /// last iteration.
    pub fn measure(config: &Config, elapsed: Duration, transfer: &Transfer) -> Self {
        RunMetrics {
            elapsed_secs: elapsed.as_secs_f64().max(MIN_ELAPSED_SECS),
            input_bytes: file_size(config.input_path.as_deref()).unwrap_or(transfer.bytes_in),
            output_bytes: file_size(config.output_path.as_deref()).unwrap_or(transfer.bytes_out),
        }
    }

    /// Print the single success summary line to standard output.
    ///
    /// The ratio is always compressed size over uncompressed size whichever
    /// direction the run went, and throughput counts the uncompressed bytes
    /// of every repetition in binary megabytes per second.
    pub fn report(&self, config: &Config) {
        let (uncompressed, compressed) = if config.decompress {
            (self.output_bytes, self.input_bytes)
        } else {
            (self.input_bytes, self.output_bytes)
        };
        let ratio = compressed as f64 * 100.0 / uncompressed as f64;
        let total_uncompressed = config.repeat as f64 * uncompressed as f64;
        let throughput = total_uncompressed / (1024.0 * 1024.0) / self.elapsed_secs;
        println!(
            "{} -> {}: {:.3}%   {:.3} sec   {:.3} MiB/s",
            uncompressed, compressed, ratio, self.elapsed_secs, throughput
        );
    }
}

fn file_size(path: Option<&Path>) -> Option<u64> {
    path.and_then(|p| fs::metadata(p).ok()).map(|m| m.len())
}

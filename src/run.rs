//! Sequential execution of the configured operation.

use std::fs;

use log::debug;

use crate::codec::{Codec, EncodeParams};
use crate::config::Config;
use crate::error::DriverError;
use crate::stream;

/// Bytes moved by the final iteration. Kept so runs bound to the standard
/// streams can still be sized for reporting.
#[derive(Debug, Default, Clone, Copy)]
pub struct Transfer {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

/// Run the configured operation once per requested repetition.
///
/// Every iteration opens fresh streams, so repeated runs benchmark handle
/// acquisition and cold caches too. Iterations are strictly sequential and
/// the first failure aborts the whole run; nothing is retried.
pub fn execute(config: &Config, codec: &dyn Codec) -> Result<Transfer, DriverError> {
    let mut transfer = Transfer::default();
    for iteration in 0..config.repeat {
        debug!("iteration {}/{}", iteration + 1, config.repeat);
        let mut input = stream::open_input(config.input_path.as_deref())?;
        let mut output = stream::open_output(config.output_path.as_deref(), config.force)?;
        if config.decompress {
            if !codec.decompress(&mut input, &mut output) {
                return Err(DriverError::CorruptInput);
            }
        } else {
            let params = EncodeParams::from_config(config);
            if !codec.compress(&params, &mut input, &mut output) {
                // Best-effort removal of the partial artifact.
                drop(output);
                if let Some(path) = &config.output_path {
                    let _ = fs::remove_file(path);
                }
                return Err(DriverError::CompressionFailed);
            }
        }
        transfer = Transfer {
            bytes_in: input.bytes_read(),
            bytes_out: output.bytes_written(),
        };
        input.close()?;
        output.close()?;
    }
    Ok(transfer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use std::cell::Cell;
    use std::io::{self, Read, Write};
    use std::path::Path;

    /// Copies input to output and counts invocations.
    struct PassthroughCodec {
        compress_calls: Cell<u32>,
        decompress_calls: Cell<u32>,
    }

    impl PassthroughCodec {
        fn new() -> Self {
            PassthroughCodec {
                compress_calls: Cell::new(0),
                decompress_calls: Cell::new(0),
            }
        }
    }

    impl Codec for PassthroughCodec {
        fn compress(
            &self,
            _params: &EncodeParams,
            input: &mut dyn Read,
            output: &mut dyn Write,
        ) -> bool {
            self.compress_calls.set(self.compress_calls.get() + 1);
            io::copy(input, output).is_ok()
        }

        fn decompress(&self, input: &mut dyn Read, output: &mut dyn Write) -> bool {
            self.decompress_calls.set(self.decompress_calls.get() + 1);
            io::copy(input, output).is_ok()
        }
    }

    /// Writes a few bytes, then reports failure.
    struct FailingCodec;

    impl Codec for FailingCodec {
        fn compress(
            &self,
            _params: &EncodeParams,
            _input: &mut dyn Read,
            output: &mut dyn Write,
        ) -> bool {
            let _ = output.write_all(b"partial");
            let _ = output.flush();
            false
        }

        fn decompress(&self, _input: &mut dyn Read, _output: &mut dyn Write) -> bool {
            false
        }
    }

    fn config(input: &Path, output: &Path) -> Config {
        Config {
            input_path: Some(input.to_path_buf()),
            output_path: Some(output.to_path_buf()),
            force: false,
            quality: 11,
            decompress: false,
            repeat: 1,
            verbose: false,
            lgwin: 22,
            mode: Mode::Generic,
        }
    }

    #[test]
    fn repeats_run_the_codec_each_time() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bin");
        let output = dir.path().join("out.bin");
        std::fs::write(&input, b"payload").unwrap();

        let codec = PassthroughCodec::new();
        let mut config = config(&input, &output);
        config.repeat = 3;
        config.force = true;
        let transfer = execute(&config, &codec).unwrap();

        assert_eq!(codec.compress_calls.get(), 3);
        assert_eq!(codec.decompress_calls.get(), 0);
        assert_eq!(transfer.bytes_in, 7);
        assert_eq!(transfer.bytes_out, 7);
        assert_eq!(std::fs::read(&output).unwrap(), b"payload");
    }

    #[test]
    fn repeat_without_force_hits_the_overwrite_guard() {
        // The guard applies on every iteration, so the second one refuses
        // the file the first one just created.
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bin");
        let output = dir.path().join("out.bin");
        std::fs::write(&input, b"payload").unwrap();

        let mut config = config(&input, &output);
        config.repeat = 2;
        let err = execute(&config, &PassthroughCodec::new()).unwrap_err();
        assert!(matches!(err, DriverError::OutputExists));
    }

    #[test]
    fn compression_failure_removes_partial_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bin");
        let output = dir.path().join("out.bin");
        std::fs::write(&input, b"payload").unwrap();

        let err = execute(&config(&input, &output), &FailingCodec).unwrap_err();
        assert!(matches!(err, DriverError::CompressionFailed));
        assert!(!output.exists());
    }

    #[test]
    fn decode_failure_is_corrupt_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bin");
        let output = dir.path().join("out.bin");
        std::fs::write(&input, b"not a bitstream").unwrap();

        let mut config = config(&input, &output);
        config.decompress = true;
        let err = execute(&config, &FailingCodec).unwrap_err();
        assert!(matches!(err, DriverError::CorruptInput));
    }

    #[test]
    fn missing_input_aborts_before_the_codec_runs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.bin");
        let output = dir.path().join("out.bin");

        let codec = PassthroughCodec::new();
        let err = execute(&config(&input, &output), &codec).unwrap_err();
        assert!(matches!(err, DriverError::Io { .. }));
        assert_eq!(codec.compress_calls.get(), 0);
        assert!(!output.exists());
    }
}

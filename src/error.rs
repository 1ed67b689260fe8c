use std::io;
use std::path::Path;

use thiserror::Error;

/// Top-level error for the driver.
///
/// Every component returns one of these instead of terminating; only the
/// binary entry point turns an error into a diagnostic and a non-zero exit.
#[derive(Error, Debug)]
pub enum DriverError {
    /// Malformed or conflicting command-line input. The binary prints the
    /// full help block for these; the message only feeds debug logging.
    #[error("{0}")]
    Usage(String),

    /// Output path is already occupied and overwriting was not forced.
    #[error("output file exists")]
    OutputExists,

    /// File open or close failure, with operation context.
    #[error("{msg}")]
    Io {
        msg: String,
        #[source]
        source: io::Error,
    },

    /// The decoder rejected its input stream.
    #[error("corrupt input")]
    CorruptInput,

    /// The encoder reported failure.
    #[error("compression failed")]
    CompressionFailed,
}

impl DriverError {
    /// Wrap an I/O error with the failed operation and path.
    pub fn io(operation: &str, path: Option<&Path>, source: io::Error) -> Self {
        DriverError::Io {
            msg: format_io_error(operation, path, &source),
            source,
        }
    }

    /// True for command-line faults, which get the help block instead of a
    /// one-line diagnostic.
    pub fn is_usage(&self) -> bool {
        matches!(self, DriverError::Usage(_))
    }
}

/// Format a user friendly I/O error message with a suggestion.
fn format_io_error(operation: &str, path: Option<&Path>, err: &io::Error) -> String {
    use io::ErrorKind::*;
    let suggestion = match err.kind() {
        NotFound => "Check that the file exists and the path is correct.",
        PermissionDenied => "Check permissions or run as a different user.",
        WriteZero => "Disk may be full. Free up space and try again.",
        _ => "Check permissions or free up disk space.",
    };
    match path {
        Some(path) => format!(
            "Error {} '{}': {}. {}",
            operation,
            path.display(),
            err,
            suggestion
        ),
        None => format!("Error {}: {}. {}", operation, err, suggestion),
    }
}

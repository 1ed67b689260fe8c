//! Byte-stream acquisition over files or the process standard streams.
//!
//! Streams carry raw bytes end to end; no newline translation happens on
//! any platform. Both directions count the bytes they move so runs bound to
//! the standard streams stay measurable after the fact.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Stdin, Stdout, Write};
use std::path::Path;

use log::debug;

use crate::error::DriverError;

/// Transfer buffer size for file-backed streams.
const BUFFER_SIZE: usize = 1 << 16;

/// Sequential byte source bound to a file or standard input, exclusively
/// owned by the iteration that opened it.
#[derive(Debug)]
pub struct InputStream {
    inner: InputKind,
    bytes_read: u64,
}

#[derive(Debug)]
enum InputKind {
    File(BufReader<File>),
    Stdin(Stdin),
}

/// Sequential byte sink bound to a file or standard output.
#[derive(Debug)]
pub struct OutputStream {
    inner: OutputKind,
    bytes_written: u64,
}

#[derive(Debug)]
enum OutputKind {
    File(BufWriter<File>),
    Stdout(Stdout),
}

/// Open the configured input, falling back to standard input when no path
/// is given. An open failure carries the underlying OS error.
pub fn open_input(path: Option<&Path>) -> Result<InputStream, DriverError> {
    let inner = match path {
        Some(path) => {
            debug!("opening input file {}", path.display());
            let file = File::open(path)
                .map_err(|e| DriverError::io("opening input file", Some(path), e))?;
            InputKind::File(BufReader::with_capacity(BUFFER_SIZE, file))
        }
        None => InputKind::Stdin(io::stdin()),
    };
    Ok(InputStream {
        inner,
        bytes_read: 0,
    })
}

/// Open the configured output, falling back to standard output when no path
/// is given.
///
/// Unless `force` is set, an already existing file at the path is refused
/// before anything is created or truncated.
pub fn open_output(path: Option<&Path>, force: bool) -> Result<OutputStream, DriverError> {
    let inner = match path {
        Some(path) => {
            if !force && path.exists() {
                return Err(DriverError::OutputExists);
            }
            debug!("creating output file {}", path.display());
            let file = File::create(path)
                .map_err(|e| DriverError::io("creating output file", Some(path), e))?;
            OutputKind::File(BufWriter::with_capacity(BUFFER_SIZE, file))
        }
        None => OutputKind::Stdout(io::stdout()),
    };
    Ok(OutputStream {
        inner,
        bytes_written: 0,
    })
}

impl InputStream {
    /// Bytes delivered to readers so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Release the handle. Reader teardown has no OS failure surface.
    pub fn close(self) -> Result<(), DriverError> {
        Ok(())
    }
}

impl Read for InputStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = match &mut self.inner {
            InputKind::File(file) => file.read(buf)?,
            InputKind::Stdin(stdin) => stdin.read(buf)?,
        };
        self.bytes_read += n as u64;
        Ok(n)
    }
}

impl OutputStream {
    /// Bytes accepted from writers so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush buffered data and release the handle. A flush failure here
    /// surfaces as a close error.
    pub fn close(self) -> Result<(), DriverError> {
        match self.inner {
            OutputKind::File(writer) => {
                writer
                    .into_inner()
                    .map_err(|e| DriverError::io("closing output file", None, e.into_error()))?;
                Ok(())
            }
            OutputKind::Stdout(mut stdout) => stdout
                .flush()
                .map_err(|e| DriverError::io("flushing standard output", None, e)),
        }
    }
}

impl Write for OutputStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = match &mut self.inner {
            OutputKind::File(file) => file.write(buf)?,
            OutputKind::Stdout(stdout) => stdout.write(buf)?,
        };
        self.bytes_written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            OutputKind::File(file) => file.flush(),
            OutputKind::Stdout(stdout) => stdout.flush(),
        }
    }
}

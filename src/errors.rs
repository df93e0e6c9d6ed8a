//! Various MP4-related errors.

use thiserror::Error;

/// Various `ctts` and atom related read/write errors.
#[derive(Debug, Error)]
pub enum Mp4Error {
    /// Converted `binrw::Error`.
    #[error("{0}")]
    BinError(binrw::Error),
    /// IO error while reading.
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
    /// Atom body is shorter than its own fields declare.
    #[error("Truncated data: expected {expected} bytes, got {got} bytes.")]
    TruncatedData { expected: u64, got: u64 },
    /// Caller passed a value outside the accepted domain,
    /// e.g. sample number `0` (sample numbers are 1-based).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The destination failed while writing an atom.
    #[error("Write failure: {0}")]
    WriteFailure(std::io::Error),
    /// Atom mismatch.
    #[error("Atom mismatch. Expected '{expected}', got '{got}'")]
    AtomMismatch { got: String, expected: String },
    /// Atom size field smaller than its own header,
    /// e.g. 0 (extends to end of file), which is not supported.
    #[error("Unexpected MP4 atom size of {len} bytes @ offset {offset}.")]
    UnexpectedAtomSize { len: u64, offset: u64 },
    /// Malformed `box:level` item in an info level string.
    #[error("Invalid info level '{0}', expected 'box:level'")]
    InvalidInfoLevel(String),
}

/// Returns the IO error that caused `err`, if any.
/// Derived readers/writers wrap errors in a backtrace.
fn root_io(err: binrw::Error) -> Result<std::io::Error, binrw::Error> {
    match err {
        binrw::Error::Io(e) => Ok(e),
        binrw::Error::Backtrace(bt) => root_io(*bt.error),
        e => Err(e),
    }
}

/// Converts `binrw::Error` to `Mp4Error`.
///
/// IO errors are unwrapped to `Mp4Error::IOError`.
impl From<binrw::Error> for Mp4Error {
    fn from(err: binrw::Error) -> Mp4Error {
        match root_io(err) {
            Ok(e) => Mp4Error::IOError(e),
            Err(e) => Mp4Error::BinError(e),
        }
    }
}

impl Mp4Error {
    /// Maps an error raised on the write path to `Mp4Error::WriteFailure`.
    pub(crate) fn write(err: binrw::Error) -> Mp4Error {
        match root_io(err) {
            Ok(e) => Mp4Error::WriteFailure(e),
            Err(e) => Mp4Error::BinError(e),
        }
    }
}

/// Converts Mp4Error to std::io::Error
impl From<Mp4Error> for std::io::Error {
    fn from(err: Mp4Error) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, err)
    }
}

use crate::encoding::Encoding;
use std::path::PathBuf;
use std::{error, fmt, io, result};

/// A type alias for `Result<T, revlines::Error>`.
///
/// This result type embeds the error type in this crate.
pub type Result<T> = result::Result<T, Error>;

/// An error that can occur when reading lines backward.
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

impl Error {
    /// A crate private constructor for `Error`.
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }

    /// Returns the specific type of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Unwraps this error into its underlying type.
    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }
}

/// The specific type of an error.
///
/// This list might grow over time and it is not recommended to
/// exhaustively match against it.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Represents an I/O error.
    ///
    /// Can occur when opening, seeking or reading the underlying byte stream. A stream that
    /// shrinks during the scan surfaces here as an unexpected end of file.
    #[error(transparent)]
    Io(io::Error),
    /// The given path does not exist.
    #[error("no such file or directory '{}'", .0.display())]
    NotFound(PathBuf),
    /// The given path exists but is a directory.
    #[error("'{}' is a directory, not a file", .0.display())]
    NotAFile(PathBuf),
    /// The length of the stream at the end of the scan differs from the length queried at
    /// the start.
    #[error("stream size changed during the scan: expected {expected} bytes, found {actual}")]
    SizeChanged {
        /// Length queried before the first chunk was fetched.
        expected: u64,
        /// Length queried after the last chunk was fetched.
        actual: u64,
    },
    /// The bytes of a line are not valid in the configured encoding.
    #[error("invalid {encoding} data in line starting at byte offset {offset}")]
    Decode {
        /// The encoding the line was decoded with.
        encoding: Encoding,
        /// Offset of the first byte of the line, relative to the start of the stream.
        offset: u64,
    },
    /// The encoding name is not recognized.
    #[error("unsupported encoding '{0}'")]
    UnsupportedEncoding(String),
    /// The chunk size is zero.
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,
    /// The per-line callback returned an error.
    #[error("line callback failed: {0}")]
    Callback(#[source] Box<dyn error::Error + Send + Sync>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        error::Error::source(&*self.0)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::new(kind)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::new(ErrorKind::Io(err))
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        let kind = match err.kind() {
            ErrorKind::Io(inner) => inner.kind(),
            ErrorKind::NotFound(_) => io::ErrorKind::NotFound,
            ErrorKind::Decode { .. } => io::ErrorKind::InvalidData,
            ErrorKind::UnsupportedEncoding(_) | ErrorKind::InvalidChunkSize => {
                io::ErrorKind::InvalidInput
            }
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}

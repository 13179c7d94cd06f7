use crate::encoding::Encoding;
use crate::line::Terminator;

/// The chunk size used unless configured otherwise: 64 KiB.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Options controlling how a stream is read backward.
///
/// # Examples
///
/// ```
/// use revlines::{Encoding, ReadOptions, Terminator};
///
/// let opts = ReadOptions::new()
///     .with_chunk_size(4096)
///     .with_encoding(Encoding::Latin1)
///     .with_terminator(Terminator::CrLf);
///
/// assert_eq!(opts.chunk_size(), 4096);
/// assert_eq!(opts.encoding(), Encoding::Latin1);
/// assert_eq!(opts.terminator(), Terminator::CrLf);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadOptions {
    chunk_size: usize,
    encoding: Encoding,
    terminator: Terminator,
}

impl ReadOptions {
    /// Creates options with a chunk size of [`DEFAULT_CHUNK_SIZE`], UTF-8 decoding and the
    /// platform's native terminator.
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            encoding: Encoding::default(),
            terminator: Terminator::native(),
        }
    }

    /// Sets the number of bytes fetched per read.
    ///
    /// Streams shorter than the chunk size are fetched in a single read. A chunk size of zero
    /// is rejected when a reader is created with these options.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the encoding lines are decoded with.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the line terminator.
    pub fn with_terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    /// Returns the configured chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the configured encoding.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Returns the configured terminator.
    pub fn terminator(&self) -> Terminator {
        self.terminator
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::new()
    }
}

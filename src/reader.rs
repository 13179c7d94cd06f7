use crate::chunk::{self, Chunk, Chunks};
use crate::encoding::Encoding;
use crate::error::{Error, ErrorKind, Result};
use crate::line::{self, Boundary, LF};
use crate::options::ReadOptions;
use std::convert::Infallible;
use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::{error, result};

/// Reader that yields the lines of a stream in reverse order, last line first.
///
/// # Examples
///
/// ```
/// use revlines::{BackwardReader, ReadOptions};
/// use std::io::Cursor;
///
/// let cursor = Cursor::new("first\nsecond\nthird\n");
/// let opts = ReadOptions::new().with_chunk_size(4);
/// let mut reader = BackwardReader::with_options(cursor, opts).unwrap();
///
/// let mut lines = Vec::new();
/// reader.for_each_line(|line| lines.push(line.to_owned())).unwrap();
/// assert_eq!(lines, ["third", "second", "first"]);
/// ```
///
/// The stream is fetched in chunks of [`ReadOptions::chunk_size`] bytes, starting from its
/// end. Every complete line found in a chunk is handed to the callback before the next chunk
/// is fetched. The bytes before the first `\n` of a chunk are carried over and joined with
/// the chunks that precede them once their line is complete. Memory use is therefore bounded
/// by the chunk size plus the length of the longest line, not by the length of the stream,
/// and every byte is scanned and copied a constant number of times.
///
/// A stream ending with a terminator does not produce an extra empty line, so the lines
/// yielded are exactly those of [`str::lines`] in reverse.
#[derive(Debug)]
pub struct BackwardReader<R: Read + Seek> {
    inner: R,
    buf: Vec<u8>,
    line: Vec<u8>,
    // fragments without a `\n`, the one nearest the end of the stream first
    carry: Vec<Vec<u8>>,
    len: u64,
    chunk_size: usize,
    opts: ReadOptions,
}

impl<R: Read + Seek> BackwardReader<R> {
    /// Creates a new `BackwardReader` with default [`ReadOptions`].
    ///
    /// # Errors
    ///
    /// Returns an error of `ErrorKind::Io` if the length of the stream cannot be queried.
    pub fn new(inner: R) -> Result<Self> {
        BackwardReader::with_options(inner, ReadOptions::default())
    }

    /// Creates a new `BackwardReader` with the given options.
    ///
    /// # Errors
    ///
    /// Returns an error of `ErrorKind::InvalidChunkSize` if the configured chunk size is zero,
    /// or of `ErrorKind::Io` if the length of the stream cannot be queried.
    pub fn with_options(mut inner: R, opts: ReadOptions) -> Result<Self> {
        if opts.chunk_size() == 0 {
            return Err(Error::new(ErrorKind::InvalidChunkSize));
        }

        let len = inner.seek(SeekFrom::End(0))?;
        let chunk_size = chunk::clamp(opts.chunk_size(), len);

        Ok(Self {
            inner,
            buf: Vec::new(),
            line: Vec::new(),
            carry: Vec::new(),
            len,
            chunk_size,
            opts,
        })
    }

    /// Returns the length of the underlying stream, as queried on creation.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` if the underlying stream was empty on creation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of bytes fetched per read.
    ///
    /// This is the configured chunk size, or the length of the stream if that is smaller.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Unwraps this reader, returning the underlying stream.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Calls `f` once for every line of the stream, last line first.
    ///
    /// # Errors
    ///
    /// See [`BackwardReader::try_for_each_line`]. Lines handed to `f` before an error occurs
    /// stay handed out.
    pub fn for_each_line<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&str),
    {
        self.try_for_each_line(|line| {
            f(line);
            Ok::<(), Infallible>(())
        })
    }

    /// Calls the fallible `f` once for every line of the stream, last line first, stopping
    /// at the first error it returns.
    ///
    /// # Errors
    ///
    /// - `ErrorKind::Callback` if `f` returns an error.
    /// - `ErrorKind::Decode` if a line is not valid in the configured encoding.
    /// - `ErrorKind::Io` if the stream cannot be read, including when it turns out shorter
    ///   than the length queried on creation.
    /// - `ErrorKind::SizeChanged` if the length of the stream differs after the last chunk
    ///   was fetched.
    ///
    /// # Examples
    ///
    /// ```
    /// use revlines::{BackwardReader, ErrorKind};
    /// use std::io::Cursor;
    ///
    /// let mut reader = BackwardReader::new(Cursor::new("a\nstop\nc")).unwrap();
    /// let mut seen = Vec::new();
    /// let res = reader.try_for_each_line(|line| {
    ///     if line == "stop" {
    ///         return Err("stop requested");
    ///     }
    ///     seen.push(line.to_owned());
    ///     Ok(())
    /// });
    ///
    /// assert!(matches!(res.unwrap_err().kind(), ErrorKind::Callback(_)));
    /// assert_eq!(seen, ["c"]);
    /// ```
    pub fn try_for_each_line<F, E>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&str) -> result::Result<(), E>,
        E: Into<Box<dyn error::Error + Send + Sync>>,
    {
        log::debug!(
            "reading {} bytes backward in chunks of {} bytes",
            self.len,
            self.chunk_size
        );

        self.carry.clear();
        // whether the bytes at the end of the pending line were followed by a `\n`
        let mut terminated = false;

        for (n, chunk) in Chunks::new(self.len, self.chunk_size).enumerate() {
            self.fetch(chunk)?;

            if n == 0 && self.buf.last() == Some(&LF) {
                self.buf.pop();
                terminated = true;
            }

            // Only the fetched bytes are scanned: carried fragments never hold a `\n`.
            let mut end = self.buf.len();
            while let Some(split) = line::find_last_line(&self.buf[..end]) {
                if split.boundary == Boundary::Start {
                    break;
                }
                let offset = chunk.offset + split.line.start as u64;
                let bytes = if self.carry.is_empty() {
                    &self.buf[split.line]
                } else {
                    join(&mut self.line, &self.buf[split.line], &mut self.carry);
                    &self.line[..]
                };
                emit(&self.opts, bytes, offset, terminated, &mut f)?;
                end = split.remainder;
                terminated = true;
            }

            if end > 0 {
                // Either more chunks precede this fragment, or it is the start of the first
                // line, emitted below.
                self.carry.push(self.buf[..end].to_vec());
            }
        }

        let actual = self.inner.seek(SeekFrom::End(0))?;
        if actual != self.len {
            return Err(Error::new(ErrorKind::SizeChanged {
                expected: self.len,
                actual,
            }));
        }

        if self.len > 0 {
            join(&mut self.line, &[], &mut self.carry);
            emit(&self.opts, &self.line, 0, terminated, &mut f)?;
        }

        self.line.clear();
        Ok(())
    }
}

impl<R: Read + Seek> BackwardReader<R> {
    // Reads `chunk` into `buf`.
    fn fetch(&mut self, chunk: Chunk) -> Result<()> {
        log::trace!("fetching {} bytes at offset {}", chunk.len, chunk.offset);

        self.buf.clear();
        self.buf.resize(chunk.len, 0);
        self.inner.seek(SeekFrom::Start(chunk.offset))?;
        self.inner.read_exact(&mut self.buf)?;
        Ok(())
    }
}

// Writes `head` followed by the carried fragments, in stream order, into `line`, emptying
// `carry`.
fn join(line: &mut Vec<u8>, head: &[u8], carry: &mut Vec<Vec<u8>>) {
    line.clear();
    line.extend_from_slice(head);
    for fragment in carry.drain(..).rev() {
        line.extend_from_slice(&fragment);
    }
}

// Decodes `bytes` and hands them to `f`. `offset` is the stream offset of `bytes[0]`.
fn emit<F, E>(opts: &ReadOptions, bytes: &[u8], offset: u64, terminated: bool, f: &mut F) -> Result<()>
where
    F: FnMut(&str) -> result::Result<(), E>,
    E: Into<Box<dyn error::Error + Send + Sync>>,
{
    let bytes = if terminated {
        line::trim_terminator(bytes, opts.terminator())
    } else {
        bytes
    };

    let encoding = opts.encoding();
    let text = encoding
        .decode(bytes)
        .ok_or_else(|| Error::new(ErrorKind::Decode { encoding, offset }))?;

    log::trace!("line of {} bytes at offset {}", bytes.len(), offset);
    f(&*text).map_err(|err| Error::new(ErrorKind::Callback(err.into())))
}

/// Calls `on_line` once for every line of the file at `path`, last line first, decoding
/// lines as UTF-8.
///
/// # Errors
///
/// Returns an error of `ErrorKind::NotFound` if `path` does not exist, and of
/// `ErrorKind::NotAFile` if it is a directory. See [`BackwardReader::try_for_each_line`]
/// for the errors that can occur while reading.
///
/// # Examples
///
/// ```no_run
/// let mut last = None;
/// revlines::for_each_line_backward("./app.log", |line| {
///     if last.is_none() {
///         last = Some(line.to_owned());
///     }
/// })?;
/// # Ok::<(), revlines::Error>(())
/// ```
pub fn for_each_line_backward<P, F>(path: P, on_line: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnMut(&str),
{
    for_each_line_backward_with(path, &ReadOptions::default(), on_line)
}

/// Like [`for_each_line_backward`], decoding lines with the encoding named `encoding`.
///
/// The name is resolved with [`Encoding::from_name`] before the file is opened.
///
/// # Errors
///
/// Returns an error of `ErrorKind::UnsupportedEncoding` if the name is unknown, otherwise
/// the errors of [`for_each_line_backward`].
pub fn for_each_line_backward_with_encoding<P, F>(
    path: P,
    encoding: &str,
    on_line: F,
) -> Result<()>
where
    P: AsRef<Path>,
    F: FnMut(&str),
{
    let encoding = Encoding::from_name(encoding)?;
    let opts = ReadOptions::default().with_encoding(encoding);
    for_each_line_backward_with(path, &opts, on_line)
}

/// Like [`for_each_line_backward`], with the given options.
pub fn for_each_line_backward_with<P, F>(path: P, opts: &ReadOptions, mut on_line: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnMut(&str),
{
    try_for_each_line_backward_with(path, opts, |line| {
        on_line(line);
        Ok::<(), Infallible>(())
    })
}

/// Like [`for_each_line_backward_with`], with a fallible callback. The first error returned
/// by `on_line` aborts the read and is returned as `ErrorKind::Callback`.
pub fn try_for_each_line_backward_with<P, F, E>(
    path: P,
    opts: &ReadOptions,
    on_line: F,
) -> Result<()>
where
    P: AsRef<Path>,
    F: FnMut(&str) -> result::Result<(), E>,
    E: Into<Box<dyn error::Error + Send + Sync>>,
{
    let file = open(path.as_ref())?;
    let mut reader = BackwardReader::with_options(file, *opts)?;
    reader.try_for_each_line(on_line)
}

fn open(path: &Path) -> Result<File> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(Error::new(ErrorKind::NotFound(path.to_path_buf())));
        }
        Err(err) => return Err(err.into()),
    };
    if meta.is_dir() {
        return Err(Error::new(ErrorKind::NotAFile(path.to_path_buf())));
    }
    Ok(File::open(path)?)
}

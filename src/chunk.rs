use std::convert::TryFrom;

/// A byte range to fetch from the underlying stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Chunk {
    pub(crate) offset: u64,
    pub(crate) len: usize,
}

/// Iterator over the chunks of a stream, from the highest offset down to `0`.
///
/// The stream is partitioned into `len / chunk_size` chunks of `chunk_size` bytes plus one
/// chunk holding the `len % chunk_size` leftover bytes at the tail. The tail chunk, when
/// present, is yielded first.
#[derive(Clone, Debug)]
pub(crate) struct Chunks {
    chunk_size: u64,
    end: u64,
}

impl Chunks {
    /// `chunk_size` must be non-zero unless `len` is zero.
    pub(crate) fn new(len: u64, chunk_size: usize) -> Chunks {
        debug_assert!(len == 0 || chunk_size > 0);
        Chunks {
            chunk_size: chunk_size as u64,
            end: len,
        }
    }
}

impl Iterator for Chunks {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.end == 0 {
            return None;
        }

        let len = match self.end % self.chunk_size {
            0 => self.chunk_size,
            remainder => remainder,
        };
        self.end -= len;

        Some(Chunk {
            offset: self.end,
            len: len as usize,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.end == 0 {
            return (0, Some(0));
        }
        let n = ((self.end + self.chunk_size - 1) / self.chunk_size) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Chunks {}

// The effective chunk size: never larger than the stream itself.
pub(crate) fn clamp(chunk_size: usize, len: u64) -> usize {
    usize::try_from(len).map_or(chunk_size, |len| chunk_size.min(len))
}

//! Splitting lines off the end of an in-memory buffer.

use std::ops::Range;

/// The byte every line boundary ends with.
pub const LF: u8 = b'\n';
const CR: u8 = b'\r';

/// The byte sequence separating lines.
///
/// `\n` is the defining byte of both variants. With [`Terminator::CrLf`] the `\r` preceding
/// a `\n` is also removed from the emitted line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Terminator {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
}

impl Terminator {
    /// Returns the newline convention of the current platform: `CrLf` on Windows, `Lf`
    /// everywhere else.
    pub fn native() -> Terminator {
        if cfg!(windows) {
            Terminator::CrLf
        } else {
            Terminator::Lf
        }
    }
}

impl Default for Terminator {
    fn default() -> Self {
        Terminator::native()
    }
}

/// How the line found by [`find_last_line`] is delimited on its left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// A `\n` precedes the line.
    Terminator,
    /// The scan reached the start of the buffer without finding a `\n`.
    Start,
}

/// The result of splitting the last line off a buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineSplit {
    /// Range of the line's bytes within the buffer. Runs to the end of the buffer.
    pub line: Range<usize>,
    /// Length of the prefix that remains once the line and its preceding `\n` are consumed.
    pub remainder: usize,
    /// What delimits the line on its left.
    pub boundary: Boundary,
}

/// Splits the last line off `buf`, scanning backward for `\n`.
///
/// Returns `None` only for an empty buffer. When no `\n` is found the whole buffer is
/// returned as the line with [`Boundary::Start`]; whether that is a complete line depends on
/// whether the buffer starts at the beginning of the stream, which only the caller knows.
///
/// # Examples
///
/// ```
/// use revlines::line::{find_last_line, Boundary};
///
/// let split = find_last_line(b"first\nsecond").unwrap();
/// assert_eq!(split.line, 6..12);
/// assert_eq!(split.remainder, 5);
/// assert_eq!(split.boundary, Boundary::Terminator);
///
/// let split = find_last_line(b"first").unwrap();
/// assert_eq!(split.line, 0..5);
/// assert_eq!(split.remainder, 0);
/// assert_eq!(split.boundary, Boundary::Start);
///
/// assert!(find_last_line(b"").is_none());
/// ```
pub fn find_last_line(buf: &[u8]) -> Option<LineSplit> {
    if buf.is_empty() {
        return None;
    }

    let split = match buf.iter().rposition(|&b| b == LF) {
        Some(pos) => LineSplit {
            line: pos + 1..buf.len(),
            remainder: pos,
            boundary: Boundary::Terminator,
        },
        None => LineSplit {
            line: 0..buf.len(),
            remainder: 0,
            boundary: Boundary::Start,
        },
    };
    Some(split)
}

/// Removes what is left of `terminator` from the end of a line that was followed by `\n`.
///
/// For [`Terminator::CrLf`] a trailing `\r` is dropped if present; for [`Terminator::Lf`]
/// the line is returned unchanged.
pub fn trim_terminator(line: &[u8], terminator: Terminator) -> &[u8] {
    match terminator {
        Terminator::Lf => line,
        Terminator::CrLf => match line.split_last() {
            Some((&CR, rest)) => rest,
            _ => line,
        },
    }
}

//! This library reads the lines of a file in reverse order, last line first, without loading
//! the entire file into memory.
//!
//! The file is fetched in fixed-size chunks starting from its end. Each chunk is prepended to
//! the bytes not yet resolved into lines, and the combined buffer is scanned backward for `\n`
//! so complete lines can be handed out as soon as they are found. Peak memory is bounded by
//! the chunk size plus the length of the longest line.
//!
//! # Examples
//!
//! - Print the last lines of a log file, most recent first.
//!
//! ```no_run
//! use revlines::Result;
//!
//! fn main() -> Result<()> {
//!     revlines::for_each_line_backward("./app.log", |line| {
//!         println!("{}", line);
//!     })?;
//!
//!     Ok(())
//! }
//! ```
//!
//! - Stop early by returning an error from the callback.
//!
//! ```no_run
//! use revlines::{ErrorKind, ReadOptions, Result};
//!
//! fn last_error(path: &str) -> Result<Option<String>> {
//!     let mut found = None;
//!     let res = revlines::try_for_each_line_backward_with(path, &ReadOptions::new(), |line| {
//!         if line.contains("ERROR") {
//!             found = Some(line.to_owned());
//!             return Err("found");
//!         }
//!         Ok(())
//!     });
//!
//!     match res {
//!         Ok(()) => Ok(None),
//!         Err(e) if matches!(e.kind(), ErrorKind::Callback(_)) => Ok(found),
//!         Err(e) => Err(e),
//!     }
//! }
//! ```
//!
//! Any [`Read`] + [`Seek`] stream can be read backward with a [`BackwardReader`].
//!
//! [`Read`]: std::io::Read
//! [`Seek`]: std::io::Seek
#![deny(missing_docs)]

mod error;
pub use error::{Error, ErrorKind, Result};

mod encoding;
pub use encoding::Encoding;

pub mod line;
pub use line::Terminator;

mod options;
pub use options::{ReadOptions, DEFAULT_CHUNK_SIZE};

mod chunk;

mod reader;
pub use reader::{
    for_each_line_backward, for_each_line_backward_with, for_each_line_backward_with_encoding,
    try_for_each_line_backward_with, BackwardReader,
};

use crate::error::{Error, ErrorKind, Result};
use std::borrow::Cow;
use std::fmt;
use std::str::{self, FromStr};

/// Text encodings lines can be decoded with.
///
/// Only ASCII-compatible encodings are supported, since line boundaries are located by
/// searching for the raw `\n` byte before anything is decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// UTF-8. Malformed sequences are an error.
    Utf8,
    /// 7-bit ASCII. Any byte above `0x7f` is an error.
    Ascii,
    /// ISO-8859-1, where every byte maps to the code point of the same value.
    Latin1,
}

impl Encoding {
    /// Resolves an encoding by name.
    ///
    /// Names are matched case-insensitively, and `-` and `_` are ignored, so `UTF-8`, `utf8`
    /// and `utf_8` all resolve to [`Encoding::Utf8`].
    ///
    /// # Errors
    ///
    /// Returns an error of `ErrorKind::UnsupportedEncoding` if the name is unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use revlines::Encoding;
    ///
    /// assert_eq!(Encoding::from_name("UTF-8").unwrap(), Encoding::Utf8);
    /// assert_eq!(Encoding::from_name("binary").unwrap(), Encoding::Latin1);
    /// assert!(Encoding::from_name("utf16le").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<Encoding> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "utf8" => Ok(Encoding::Utf8),
            "ascii" | "usascii" => Ok(Encoding::Ascii),
            "latin1" | "binary" | "iso88591" => Ok(Encoding::Latin1),
            _ => Err(Error::new(ErrorKind::UnsupportedEncoding(name.to_owned()))),
        }
    }

    /// Returns the canonical name of this encoding.
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin1",
        }
    }

    /// Decodes `bytes`, returning `None` if they are not valid in this encoding.
    ///
    /// The result borrows from `bytes` whenever no transcoding is needed.
    pub fn decode<'b>(&self, bytes: &'b [u8]) -> Option<Cow<'b, str>> {
        match self {
            Encoding::Utf8 => str::from_utf8(bytes).ok().map(Cow::Borrowed),
            Encoding::Ascii if bytes.is_ascii() => str::from_utf8(bytes).ok().map(Cow::Borrowed),
            Encoding::Ascii => None,
            Encoding::Latin1 if bytes.is_ascii() => str::from_utf8(bytes).ok().map(Cow::Borrowed),
            Encoding::Latin1 => Some(Cow::Owned(bytes.iter().map(|&b| b as char).collect())),
        }
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::Utf8
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Encoding> {
        Encoding::from_name(s)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Definition of errors.

use std::error::Error;
use std::fmt;

pub type Result<T, E = YomiBenchError> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum YomiBenchError {
    InvalidArgument(InvalidArgumentError),
    InvalidFormat(InvalidFormatError),
    Misaligned(MisalignedError),
    JsonError(serde_json::Error),
    IOError(std::io::Error),
}

impl YomiBenchError {
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn invalid_format<S>(line: usize, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            line,
            msg: msg.into(),
        })
    }
}

impl fmt::Display for YomiBenchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidArgument(e) => fmt::Display::fmt(e, f),
            Self::InvalidFormat(e) => fmt::Display::fmt(e, f),
            Self::Misaligned(e) => fmt::Display::fmt(e, f),
            Self::JsonError(e) => fmt::Display::fmt(e, f),
            Self::IOError(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl Error for YomiBenchError {}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// Error used when a line of analyzer output cannot be parsed.
#[derive(Debug)]
pub struct InvalidFormatError {
    /// Line number, starting from 1. Zero when the input is not line based.
    pub(crate) line: usize,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.line == 0 {
            write!(f, "InvalidFormatError: {}", self.msg)
        } else {
            write!(f, "InvalidFormatError: line {}: {}", self.line, self.msg)
        }
    }
}

impl Error for InvalidFormatError {}

/// Error used when the tokens of an analyzer do not reproduce the gold sentence.
#[derive(Debug, PartialEq, Eq)]
pub struct MisalignedError {
    /// Offset of the first differing unit.
    pub position: usize,

    /// Length of the gold sentence in units.
    pub expected_len: usize,

    /// Length of the concatenated tokens in units.
    pub actual_len: usize,
}

impl fmt::Display for MisalignedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "MisalignedError: tokens diverge from the sentence at offset {} (sentence length: {}, token length: {})",
            self.position, self.expected_len, self.actual_len
        )
    }
}

impl Error for MisalignedError {}

impl From<MisalignedError> for YomiBenchError {
    fn from(error: MisalignedError) -> Self {
        Self::Misaligned(error)
    }
}

impl From<serde_json::Error> for YomiBenchError {
    fn from(error: serde_json::Error) -> Self {
        Self::JsonError(error)
    }
}

impl From<std::io::Error> for YomiBenchError {
    fn from(error: std::io::Error) -> Self {
        Self::IOError(error)
    }
}

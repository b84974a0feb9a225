//! Possible errors encountered during creation or manipulation of
//! parser objects.

use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::string::FromUtf8Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Enumerated type representing errors in conversion from hex-strings
/// into byte-buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvError<T> {
    /// `ParityError` indicates the error scenario in which the parity of
    /// the length of the string we wish to interpret as a hex-encoded byte
    /// buffer is not even, and therefore is malformed.
    ParityError(T),
    /// `HexError` indicates the error scenario in which an aligned
    /// two-byte substring of the string we are converting is not a valid
    /// hexadecimal encoding of an 8-bit word.
    HexError(T),
}

impl Display for ConvError<()> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParityError(()) => {
                write!(f, "cannot parse string with odd parity as hexstring")
            }
            Self::HexError(()) => write!(
                f,
                "parsing of hexstring encountered invalid hexadecimal character(s)"
            ),
        }
    }
}

impl Display for ConvError<String> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParityError(s) => {
                write!(
                    f,
                    "input string has odd parity ({}) (expected even): '{}'",
                    s.len(),
                    s
                )
            }
            Self::HexError(s) => {
                write!(
                    f,
                    "input string contains non-hex two-byte aligned substring: '{}'",
                    s
                )
            }
        }
    }
}

impl std::error::Error for ConvError<()> {}
impl std::error::Error for ConvError<String> {}

/// Implementation-specific errors that occur internally during parsing,
/// mostly independent of the validity of the request being performed.
/// These should never be encountered unless there is a bug in the
/// implementation of the parser object itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalErrorKind {
    ConsumeLengthMismatch { expected: usize, actual: usize },
    SliceCoerceFailure,
}

impl Display for InternalErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InternalErrorKind::ConsumeLengthMismatch { expected, actual } => {
                write!(
                    f,
                    "BUG: consume({}) returned slice of length {}",
                    expected, actual
                )
            }
            InternalErrorKind::SliceCoerceFailure => {
                write!(
                    f,
                    "BUG: failed to coerce from byte-slice to fixed-length array"
                )
            }
        }
    }
}

/// A discriminant byte that does not belong to the enumeration it was
/// parsed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagError {
    /// The byte that was actually consumed.
    pub actual: u8,
    /// Name of the enumeration the byte failed to discriminate.
    pub for_type: &'static str,
}

impl TagError {
    pub const fn new(actual: u8, for_type: &'static str) -> Self {
        Self { actual, for_type }
    }
}

impl Display for TagError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unexpected discriminant {:#04x} for enum-type {}",
            self.actual, self.for_type
        )
    }
}

impl std::error::Error for TagError {}

/// Enumerated type encapsulating all possible error conditions that can be
/// raised by operations on parser objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Internal error indicating a bug in the implementation
    InternalError(InternalErrorKind),
    /// Attempted consume call would violate the absolute bounds of the
    /// parse-buffer
    BufferOverflow {
        buflen: usize,
        offset: usize,
        requested: usize,
    },
    /// Byte parsed could not be interpreted as a valid boolean
    InvalidBoolean(u8),
    /// Byte parsed could not be interpreted as a valid discriminant for an
    /// enumerated type
    InvalidTag(TagError),
    /// Parsed byte-array could not be coerced to `String`
    InvalidUtf8(FromUtf8Error),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InternalError(err) => {
                write!(f, "internal error ({})", err)
            }
            ParseError::BufferOverflow {
                buflen,
                offset,
                requested,
            } => {
                write!(
                    f,
                    "cannot increment offset by {} bytes (currently at byte {} in buffer of length {})",
                    requested, offset, buflen
                )
            }
            ParseError::InvalidBoolean(byte) => {
                write!(f, "expected boolean := (0x01 | 0x02), got {:#04x}", byte)
            }
            ParseError::InvalidTag(err) => {
                write!(f, "invalid tag: {}", err)
            }
            ParseError::InvalidUtf8(err) => {
                write!(f, "parsed byte-array could not be coerced to String: {}", err)
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<Infallible> for ParseError {
    fn from(_: Infallible) -> Self {
        unreachable!()
    }
}

impl From<InternalErrorKind> for ParseError {
    fn from(err: InternalErrorKind) -> Self {
        Self::InternalError(err)
    }
}

impl From<TagError> for ParseError {
    fn from(err: TagError) -> Self {
        Self::InvalidTag(err)
    }
}

impl From<FromUtf8Error> for ParseError {
    fn from(err: FromUtf8Error) -> Self {
        Self::InvalidUtf8(err)
    }
}

//! Byte-level parsing model for the wire grammar
//!
//! This module provides the fundamental definitions for processing raw
//! sequences of binary data into the low-level fragments at the leaf nodes
//! of the wire grammar: fixed-width big-endian integers, tri-state
//! booleans, length-prefixed byte-strings, raw addresses and
//! sign-magnitude big integers.
//!
//! # Model
//!
//! While the implementing types are largely free to define their own
//! operational semantics for the required methods, the intensional
//! semantics are as follows:
//!
//! * The parser object is constructed over an immutable byte-buffer.
//! * All parsing is done in a non-backtracking, zero-lookahead fashion; a
//!   byte in the buffer can only be viewed by consuming it, and only after
//!   all preceding indices in the buffer have been consumed; after a byte
//!   is consumed, it cannot be consumed again.
//! * The number of bytes consumed so far is observable at any time via
//!   [`offset`], and the number still available via [`remainder`]. These
//!   counters never appear on the wire; they exist for diagnostics and for
//!   completeness checks after a top-level parse.
//!
//! # Layout
//!
//! The top-level of this module defines the [`Parser`] trait. The
//! sub-modules contain the supporting machinery:
//!
//! * [`error`] defines the hierarchy of error cases that can be returned
//!   when something goes wrong during a `Parser` method call.
//! * [`buffer`] defines the binary buffers used by the implementing types.
//! * [`byteparser`] packages the two implementing types: [`ByteParser`]
//!   over an owned buffer and [`SliceParser`] over a borrowed one.
//!
//! [`offset`]: Parser::offset
//! [`remainder`]: Parser::remainder
//! [`ByteParser`]: byteparser::ByteParser
//! [`SliceParser`]: byteparser::SliceParser

pub mod buffer;
pub mod byteparser;
pub mod error;

use num_bigint::{BigInt, Sign};

pub use error::ParseResult;
use error::{InternalErrorKind, ParseError};

use crate::address::{Address, ADDRESS_LENGTH};

/// Byte of an encoded `false` (the zero byte is reserved and illegal).
pub const ENCODED_BOOL_FALSE: u8 = 1;
/// Byte of an encoded `true`.
pub const ENCODED_BOOL_TRUE: u8 = 2;

/// Stateful, non-backtracking reader over an immutable byte-buffer.
///
/// The required methods are the raw consume operations; everything else
/// is a default method defined in terms of them. Implementations must
/// uphold two properties:
///
/// * `consume(n)` returns `Ok(s)` with `s.len() == n` exactly when
///   `remainder() >= n`, and advances `offset()` by `n`; on `Err(_)` the
///   offset is unchanged.
/// * A fresh parser has `offset() == 0` and `view_len()` equal to the
///   length of its buffer.
pub trait Parser {
    /// Buffer type a new parser object can be infallibly instantiated
    /// from.
    type Buffer;

    /// Constructs an initialized parser over a buffer.
    fn from_buffer(buf: Self::Buffer) -> Self;

    /// Total length of the parser's buffer.
    fn view_len(&self) -> usize;

    /// Number of bytes consumed so far.
    fn offset(&self) -> usize;

    /// Number of bytes that can still be consumed.
    #[inline]
    fn remainder(&self) -> usize {
        self.view_len() - self.offset()
    }

    /// Consumes and returns a single byte.
    fn consume_byte(&mut self) -> ParseResult<u8>;

    /// Attempts to consume and return a slice of length `nbytes`, starting
    /// from the first unconsumed byte in the buffer.
    ///
    /// # Invariants
    ///
    /// This method **must** return `Ok(s)` when and only when no bounds
    /// were violated, and in such cases `s.len()` must equal the requested
    /// length `nbytes`. Failure to guarantee this is an implementation
    /// bug.
    fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]>;

    /// Consumes `N` bytes and returns them in array-form.
    fn consume_arr<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        let slice = self.consume(N)?;
        slice
            .try_into()
            .map_err(|_| ParseError::InternalError(InternalErrorKind::SliceCoerceFailure))
    }

    /// Consumes one byte and returns it as a `u8` value.
    #[inline]
    fn take_u8(&mut self) -> ParseResult<u8> {
        self.consume_byte()
    }

    /// Consumes one byte and returns it as an `i8` value.
    #[inline]
    fn take_i8(&mut self) -> ParseResult<i8> {
        Ok(self.consume_byte()? as i8)
    }

    /// Consumes two bytes and returns the corresponding `u16` value.
    ///
    /// As with all fixed-width multi-byte numeric `take_*` methods, this
    /// method performs an implicitly big-endian conversion with respect to
    /// the individual bytes consumed.
    #[inline]
    fn take_u16(&mut self) -> ParseResult<u16> {
        self.consume_arr::<2>().map(u16::from_be_bytes)
    }

    /// Consumes two bytes and returns the corresponding `i16` value.
    #[inline]
    fn take_i16(&mut self) -> ParseResult<i16> {
        self.consume_arr::<2>().map(i16::from_be_bytes)
    }

    /// Consumes four bytes and returns the corresponding `u32` value.
    #[inline]
    fn take_u32(&mut self) -> ParseResult<u32> {
        self.consume_arr::<4>().map(u32::from_be_bytes)
    }

    /// Consumes four bytes and returns the corresponding `i32` value.
    #[inline]
    fn take_i32(&mut self) -> ParseResult<i32> {
        self.consume_arr::<4>().map(i32::from_be_bytes)
    }

    /// Consumes eight bytes and returns the corresponding `u64` value.
    #[inline]
    fn take_u64(&mut self) -> ParseResult<u64> {
        self.consume_arr::<8>().map(u64::from_be_bytes)
    }

    /// Consumes eight bytes and returns the corresponding `i64` value.
    #[inline]
    fn take_i64(&mut self) -> ParseResult<i64> {
        self.consume_arr::<8>().map(i64::from_be_bytes)
    }

    /// Consumes a single byte and returns the boolean value it represents.
    ///
    /// The only valid boolean encodings are [`ENCODED_BOOL_FALSE`] and
    /// [`ENCODED_BOOL_TRUE`]; in particular the zero byte is a reserved
    /// "unknown" state and is not legal on the wire.
    #[inline]
    fn take_bool(&mut self) -> ParseResult<bool> {
        match self.consume_byte()? {
            ENCODED_BOOL_FALSE => Ok(false),
            ENCODED_BOOL_TRUE => Ok(true),
            byte => Err(ParseError::InvalidBoolean(byte)),
        }
    }

    /// Consumes a 4-byte big-endian unsigned length prefix.
    #[inline]
    fn take_length(&mut self) -> ParseResult<usize> {
        Ok(self.take_u32()? as usize)
    }

    /// Consumes exactly `nbytes` bytes into a fresh vector.
    #[inline]
    fn take_dynamic(&mut self, nbytes: usize) -> ParseResult<Vec<u8>> {
        self.consume(nbytes).map(Vec::from)
    }

    /// Consumes `N` bytes and returns them in array-form.
    fn take_fixed<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        self.consume_arr::<N>()
    }

    /// Consumes a length prefix followed by that many raw bytes.
    fn take_bytes(&mut self) -> ParseResult<Vec<u8>> {
        let nbytes = self.take_length()?;
        self.take_dynamic(nbytes)
    }

    /// Consumes a length-prefixed byte-string and interprets it as UTF-8.
    ///
    /// The wire format itself carries no UTF-8 guarantee; the validation
    /// here is forced by the `String` representation, and failures are
    /// surfaced as [`ParseError::InvalidUtf8`].
    fn take_string(&mut self) -> ParseResult<String> {
        let buf = self.take_bytes()?;
        Ok(String::from_utf8(buf)?)
    }

    /// Consumes a raw 8-byte address (no length prefix).
    fn take_address(&mut self) -> ParseResult<Address> {
        self.consume_arr::<ADDRESS_LENGTH>().map(Address::new)
    }

    /// Consumes a sign-magnitude arbitrary-precision integer: a sign
    /// boolean (`true` when negative) followed by a length-prefixed
    /// big-endian magnitude. Zero arrives as a positive sign with an
    /// empty magnitude.
    fn take_bigint(&mut self) -> ParseResult<BigInt> {
        let negative = self.take_bool()?;
        let magnitude = self.take_bytes()?;
        let sign = if negative { Sign::Minus } else { Sign::Plus };
        Ok(BigInt::from_bytes_be(sign, &magnitude))
    }
}

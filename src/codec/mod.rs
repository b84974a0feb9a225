//! The binary codec proper
//!
//! This module pairs an [`Encoder`] over an arbitrary [`Target`] with a
//! [`Decoder`] over an arbitrary [`Parser`], and exposes the top-level
//! buffer-oriented entry points ([`encode`], [`decode`], their panicking
//! `must_*` variants, and the type-only pair [`encode_type`] /
//! [`decode_type`]).
//!
//! Both directions are stateless mutual recursions over the value and
//! type sums: encoding performs a depth-first, left-to-right traversal of
//! the value tree, and decoding is a recursive descent driven by the tag
//! bytes read from the stream. Neither side suspends, retries or
//! backtracks, and neither is thread-safe; concurrent users take one
//! instance each.
//!
//! The grammar itself is spread over the sibling files by concern:
//! [`tags`] for the frozen discriminant namespaces, `location` for the
//! location prefix, `types` for static types and `value` for runtime
//! values. The byte-level primitives shared by all of them live on
//! [`Parser`] (read side) and on the `Encoder` inherent methods defined
//! here (write side).

pub mod tags;

mod location;
mod types;
mod value;

pub use location::{
    LOCATION_KIND_ADDRESS, LOCATION_KIND_IDENTIFIER, LOCATION_KIND_REPL, LOCATION_KIND_SCRIPT,
    LOCATION_KIND_STRING, LOCATION_KIND_TRANSACTION,
};
pub use tags::{EncodedType, EncodedValue, JSON_PAYLOAD_SENTINEL};

use num_bigint::{BigInt, Sign};

use crate::address::Address;
use crate::conv::target::Target;
use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::gauge::{MemoryGauge, MemoryUsage};
use crate::parse::byteparser::SliceParser;
use crate::parse::{Parser, ENCODED_BOOL_FALSE, ENCODED_BOOL_TRUE};
use crate::types::Type;
use crate::value::Value;

/// Serializes a value into a fresh byte-vector.
///
/// The output begins with the value's tag byte and fully describes the
/// value, including any embedded type information.
pub fn encode(value: &Value) -> EncodeResult<Vec<u8>> {
    let mut encoder: Encoder<Vec<u8>> = Encoder::new();
    encoder.encode_value(value)?;
    Ok(encoder.into_target())
}

/// Variant of [`encode`] for call sites that have statically verified
/// their input.
///
/// # Panics
///
/// Panics if the value cannot be encoded.
pub fn must_encode(value: &Value) -> Vec<u8> {
    encode(value).unwrap_or_else(|err| panic!("must_encode: {}", err))
}

/// Deserializes a single value from `bytes`, metering every construction
/// against `gauge` when one is supplied.
///
/// The whole buffer must be consumed: an empty buffer and unconsumed
/// trailing bytes are both errors.
pub fn decode(gauge: Option<&dyn MemoryGauge>, bytes: &[u8]) -> DecodeResult<Value> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    let mut decoder = Decoder::new(gauge, SliceParser::from_buffer(bytes.into()));
    let value = decoder.decode_value()?;
    decoder.finish()?;
    Ok(value)
}

/// Variant of [`decode`] for call sites that have statically verified
/// their input.
///
/// # Panics
///
/// Panics if the bytes do not decode cleanly.
pub fn must_decode(gauge: Option<&dyn MemoryGauge>, bytes: &[u8]) -> Value {
    decode(gauge, bytes).unwrap_or_else(|err| panic!("must_decode: {}", err))
}

/// Serializes a bare static type (no enclosing value).
pub fn encode_type(typ: &Type) -> EncodeResult<Vec<u8>> {
    let mut encoder: Encoder<Vec<u8>> = Encoder::new();
    encoder.encode_type(typ)?;
    Ok(encoder.into_target())
}

/// Panicking variant of [`encode_type`].
///
/// # Panics
///
/// Panics if the type cannot be encoded.
pub fn must_encode_type(typ: &Type) -> Vec<u8> {
    encode_type(typ).unwrap_or_else(|err| panic!("must_encode_type: {}", err))
}

/// Deserializes a bare static type from `bytes`, with the same
/// whole-buffer discipline as [`decode`].
pub fn decode_type(gauge: Option<&dyn MemoryGauge>, bytes: &[u8]) -> DecodeResult<Type> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    let mut decoder = Decoder::new(gauge, SliceParser::from_buffer(bytes.into()));
    let typ = decoder.decode_type()?;
    decoder.finish()?;
    Ok(typ)
}

/// Panicking variant of [`decode_type`].
///
/// # Panics
///
/// Panics if the bytes do not decode cleanly.
pub fn must_decode_type(gauge: Option<&dyn MemoryGauge>, bytes: &[u8]) -> Type {
    decode_type(gauge, bytes).unwrap_or_else(|err| panic!("must_decode_type: {}", err))
}

/// Streaming serializer over a generic byte-sink.
///
/// Owns its [`Target`] and tracks the number of bytes written so far;
/// the counter is observable but never emitted on the wire. On error the
/// sink may hold partial output, which the caller must discard.
pub struct Encoder<U: Target> {
    target: U,
    written: usize,
}

impl<U: Target> Default for Encoder<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Target> Encoder<U> {
    pub fn new() -> Self {
        Self {
            target: U::create(),
            written: 0,
        }
    }

    /// Wraps an existing sink, e.g. one that already holds a prefix.
    pub fn with_target(target: U) -> Self {
        Self { target, written: 0 }
    }

    /// Bytes pushed into the sink by this encoder so far.
    pub fn bytes_written(&self) -> usize {
        self.written
    }

    /// Consumes the encoder and releases its sink.
    pub fn into_target(self) -> U {
        self.target
    }

    //
    // Wire primitives. Every multi-byte scalar is big-endian.
    //

    #[inline]
    pub fn put_byte(&mut self, b: u8) {
        self.written += self.target.push_one(b);
    }

    pub fn put_bool(&mut self, b: bool) {
        self.put_byte(if b { ENCODED_BOOL_TRUE } else { ENCODED_BOOL_FALSE });
    }

    /// Emits a 4-byte big-endian length prefix.
    ///
    /// # Errors
    ///
    /// Fails with [`EncodeError::LengthOverflow`] when `n` does not fit
    /// an unsigned 32-bit count.
    pub fn put_length(&mut self, n: usize) -> EncodeResult<()> {
        let n = u32::try_from(n).map_err(|_| EncodeError::LengthOverflow { actual: n })?;
        self.put_u32(n);
        Ok(())
    }

    /// Emits a length prefix followed by the raw bytes.
    pub fn put_bytes(&mut self, buf: &[u8]) -> EncodeResult<()> {
        self.target.anticipate(4 + buf.len());
        self.put_length(buf.len())?;
        self.written += self.target.push_all(buf);
        Ok(())
    }

    pub fn put_string(&mut self, s: &str) -> EncodeResult<()> {
        self.put_bytes(s.as_bytes())
    }

    /// Emits the 8 raw address bytes, with no length prefix.
    pub fn put_address(&mut self, addr: Address) {
        self.written += self.target.push_many(addr.to_bytes());
    }

    /// Emits a sign boolean (`true` when negative) followed by the
    /// length-prefixed big-endian magnitude. Zero is emitted as a
    /// positive sign over an empty magnitude.
    pub fn put_bigint(&mut self, n: &BigInt) -> EncodeResult<()> {
        if n.sign() == Sign::NoSign {
            self.put_bool(false);
            return self.put_length(0);
        }
        let (sign, magnitude) = n.to_bytes_be();
        self.put_bool(sign == Sign::Minus);
        self.put_bytes(&magnitude)
    }

    #[inline]
    pub fn put_u8(&mut self, n: u8) {
        self.put_byte(n);
    }

    #[inline]
    pub fn put_i8(&mut self, n: i8) {
        self.put_byte(n as u8);
    }

    #[inline]
    pub fn put_u16(&mut self, n: u16) {
        self.written += self.target.push_many(n.to_be_bytes());
    }

    #[inline]
    pub fn put_i16(&mut self, n: i16) {
        self.written += self.target.push_many(n.to_be_bytes());
    }

    #[inline]
    pub fn put_u32(&mut self, n: u32) {
        self.written += self.target.push_many(n.to_be_bytes());
    }

    #[inline]
    pub fn put_i32(&mut self, n: i32) {
        self.written += self.target.push_many(n.to_be_bytes());
    }

    #[inline]
    pub fn put_u64(&mut self, n: u64) {
        self.written += self.target.push_many(n.to_be_bytes());
    }

    #[inline]
    pub fn put_i64(&mut self, n: i64) {
        self.written += self.target.push_many(n.to_be_bytes());
    }

    /// Emits a nullable list: an is-nil boolean, then (when present) a
    /// length prefix and the elements via `f`. An absent list and an
    /// empty list encode differently.
    pub(crate) fn put_opt_list<T, F>(&mut self, list: Option<&[T]>, mut f: F) -> EncodeResult<()>
    where
        F: FnMut(&mut Self, &T) -> EncodeResult<()>,
    {
        match list {
            None => {
                self.put_bool(true);
                Ok(())
            }
            Some(items) => {
                self.put_bool(false);
                self.put_length(items.len())?;
                for item in items {
                    f(self, item)?;
                }
                Ok(())
            }
        }
    }
}

/// Streaming deserializer over a generic byte-source.
///
/// Holds the caller's optional [`MemoryGauge`]; every construction
/// performed during decode is metered through it (see
/// [`crate::gauge`]). The number of bytes consumed so far is observable
/// via [`bytes_consumed`].
///
/// [`bytes_consumed`]: Decoder::bytes_consumed
pub struct Decoder<'g, P: Parser> {
    parser: P,
    gauge: Option<&'g dyn MemoryGauge>,
}

impl<'g, P: Parser> Decoder<'g, P> {
    pub fn new(gauge: Option<&'g dyn MemoryGauge>, parser: P) -> Self {
        Self { parser, gauge }
    }

    /// Bytes consumed from the source so far.
    pub fn bytes_consumed(&self) -> usize {
        self.parser.offset()
    }

    /// Bytes still available in the source.
    pub fn remainder(&self) -> usize {
        self.parser.remainder()
    }

    /// Checks that the source has been fully consumed.
    pub fn finish(&self) -> DecodeResult<()> {
        match self.parser.remainder() {
            0 => Ok(()),
            remaining => Err(DecodeError::TrailingBytes { remaining }),
        }
    }

    /// Grants grammar submodules access to the raw parser.
    #[inline]
    pub(crate) fn parser(&mut self) -> &mut P {
        &mut self.parser
    }

    /// Meters one construction against the gauge, if any.
    pub(crate) fn meter(&self, usage: MemoryUsage) -> DecodeResult<()> {
        match self.gauge {
            Some(gauge) => Ok(gauge.meter(usage)?),
            None => Ok(()),
        }
    }

    /// Reads a nullable list: an is-nil boolean, then (when present) a
    /// length prefix and that many elements via `f`.
    ///
    /// The initial capacity is clamped by the bytes remaining in the
    /// source, so a forged length cannot force an oversized allocation
    /// before the short read is detected.
    pub(crate) fn take_opt_list<T, F>(&mut self, mut f: F) -> DecodeResult<Option<Vec<T>>>
    where
        F: FnMut(&mut Self) -> DecodeResult<T>,
    {
        if self.parser.take_bool()? {
            return Ok(None);
        }
        let count = self.parser.take_length()?;
        let mut items = Vec::with_capacity(count.min(self.parser.remainder()));
        for _ in 0..count {
            items.push(f(self)?);
        }
        Ok(Some(items))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::hexstring::HexString;
    use crate::parse::byteparser::ByteParser;

    #[test]
    fn empty_input_is_invalid_argument() {
        let err = decode(None, &[]).unwrap_err();
        assert_eq!(err, DecodeError::EmptyInput);
        assert_eq!(err.category(), ErrorCategory::InvalidArgument);

        assert_eq!(decode_type(None, &[]), Err(DecodeError::EmptyInput));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = encode(&Value::Bool(true)).unwrap();
        bytes.push(0x00);
        assert_eq!(
            decode(None, &bytes),
            Err(DecodeError::TrailingBytes { remaining: 1 })
        );
    }

    #[test]
    fn encoder_counts_written_bytes() {
        let mut encoder: Encoder<Vec<u8>> = Encoder::new();
        encoder.put_bool(true);
        encoder.put_u32(7);
        encoder.put_bytes(b"abc").unwrap();
        assert_eq!(encoder.bytes_written(), 1 + 4 + 4 + 3);
        assert_eq!(encoder.bytes_written(), encoder.into_target().len());
    }

    #[test]
    fn encoder_over_hexstring_target() {
        let mut encoder: Encoder<HexString> = Encoder::new();
        encoder.put_u16(0xbeef);
        assert_eq!(encoder.into_target().to_string(), "beef");
    }

    #[test]
    fn decoder_tracks_consumption() {
        let bytes = encode(&Value::Int8(5)).unwrap();
        let mut decoder = Decoder::new(None, ByteParser::from_buffer(bytes.into()));
        assert_eq!(decoder.bytes_consumed(), 0);
        let _ = decoder.decode_value().unwrap();
        assert_eq!(decoder.bytes_consumed(), 2);
        assert!(decoder.finish().is_ok());
    }

    #[test]
    fn length_overflow_is_rejected() {
        #[cfg(target_pointer_width = "64")]
        {
            let mut encoder: Encoder<crate::conv::target::ByteCounter> = Encoder::new();
            let oversized = (u32::MAX as usize) + 1;
            assert_eq!(
                encoder.put_length(oversized),
                Err(EncodeError::LengthOverflow { actual: oversized })
            );
        }
    }
}

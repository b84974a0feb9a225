//! Self-describing binary codec for Cadence runtime values and types
//!
//! A payload produced by this crate fully reconstructs a value, including
//! its declared type, nested types and composite structure, from a stream
//! of bytes with no schema registry: every value begins with a one-byte
//! tag, every embedded type with a tag from a second, disjoint namespace,
//! and all multi-byte scalars are big-endian.
//!
//! The quickest route in and out is the function pair [`encode`] /
//! [`decode`] (and [`encode_type`] / [`decode_type`] for bare types):
//!
//! ```
//! use cbf_codec::{decode, encode, Value};
//!
//! let value = Value::Optional(Some(Box::new(Value::Bool(true))));
//! let bytes = encode(&value).unwrap();
//! assert_eq!(decode(None, &bytes).unwrap(), value);
//! ```
//!
//! Callers that manage their own sinks and sources use [`Encoder`] and
//! [`Decoder`] directly; both are generic, over [`Target`] and [`Parser`]
//! respectively. Decoding meters every construction through an optional
//! [`MemoryGauge`], which may veto allocations driven by untrusted
//! lengths.
//!
//! # Layout
//!
//! * [`value`], [`types`], [`location`], [`address`]: the closed sums
//!   and supporting product types the codec produces and consumes.
//! * [`parse`]: the byte-level read model, consisting of the [`Parser`]
//!   trait, its buffer types and error hierarchy, and two implementing
//!   parsers.
//! * [`conv`]: the write-side [`Target`] sink abstraction.
//! * [`codec`]: the grammar proper, covering tag namespaces, the
//!   location, type and value codecs, and the top-level entry points.
//! * [`gauge`]: the allocation-metering capability.
//! * [`rlp`]: a standalone recursive-length-prefix reader with hard
//!   resource limits; not used by the tag-driven grammar.
//! * [`hexstring`], [`util`]: hex presentation and conversion helpers,
//!   used heavily by the test suites.

pub mod address;
pub mod codec;
pub mod conv;
pub mod error;
pub mod gauge;
pub mod hexstring;
pub mod location;
pub mod parse;
pub mod rlp;
pub mod types;
pub mod util;
pub mod value;

pub use crate::address::Address;
pub use crate::codec::{
    decode, decode_type, encode, encode_type, must_decode, must_decode_type, must_encode,
    must_encode_type, Decoder, EncodedType, EncodedValue, Encoder,
};
pub use crate::conv::target::Target;
pub use crate::error::{DecodeError, EncodeError, ErrorCategory};
pub use crate::gauge::{MemoryError, MemoryGauge, MemoryKind, MemoryUsage};
pub use crate::hexstring::HexString;
pub use crate::location::Location;
pub use crate::parse::{
    byteparser::{ByteParser, SliceParser},
    Parser,
};
pub use crate::types::{CompositeType, EnumType, EventType, Field, Parameter, Type};
pub use crate::value::{KeyValuePair, Path, Value};

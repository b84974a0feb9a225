//! Write-side sink abstraction
//!
//! The dual of [`crate::parse`]: where a parser consumes bytes from an
//! immutable buffer, a [`Target`] accumulates them. The encoder is generic
//! over its target, so the same grammar can populate a `Vec<u8>`, count
//! bytes without materializing them, or build a [`HexString`] directly.
//!
//! [`Target`]: crate::conv::target::Target
//! [`HexString`]: crate::hexstring::HexString

pub mod target;

pub use target::Target;

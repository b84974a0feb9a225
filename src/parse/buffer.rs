//! Common buffer types for `Parser` implementors
//!
//! This module defines the low-level buffer types used internally by the
//! provided implementors of the [`Parser`] trait: [`SliceBuffer<'a>`] for
//! [`SliceParser<'a>`], and [`VecBuffer`] for [`ByteParser`].
//!
//! [`Parser`]: crate::parse::Parser
//! [`SliceParser<'a>`]: crate::parse::byteparser::SliceParser
//! [`ByteParser`]: crate::parse::byteparser::ByteParser

use crate::hexstring::HexString;

/// Newtype around a lifetime-annotated immutable slice `&'a [u8]`
///
/// `SliceBuffer` is explicitly used only as the buffer type for a
/// slice-based [`Parser`](crate::parse::Parser), and is not to be used in
/// place of `&'a [u8]` in any other context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct SliceBuffer<'a>(&'a [u8]);

impl<'a> SliceBuffer<'a> {
    pub const fn new(slice: &'a [u8]) -> Self {
        Self(slice)
    }

    /// Extracts a copy of the internal `&'a [u8]` of a borrowed
    /// `SliceBuffer`.
    pub const fn as_slice(&self) -> &'a [u8] {
        self.0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the `len`-byte range starting at index `ix`.
    ///
    /// # Panics
    ///
    /// Will panic if `ix + len` is out-of-bounds.
    pub fn get_slice(&self, ix: usize, len: usize) -> &'a [u8] {
        &self.0[ix..ix + len]
    }

    /// Returns the byte at the specified index.
    ///
    /// # Panics
    ///
    /// Will panic if `ix` is out-of-bounds.
    pub fn get_byte(&self, ix: usize) -> u8 {
        self.0[ix]
    }
}

impl<'a> From<&'a [u8]> for SliceBuffer<'a> {
    #[inline]
    fn from(bytes: &'a [u8]) -> Self {
        Self(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for SliceBuffer<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self(bytes)
    }
}

/// Newtype around `Vec<u8>` that only permits immutable access
///
/// Used to explicitly signal the role of `Vec<u8>` as the underlying,
/// immutable buffer of a [`ByteParser`]; the contents of a `VecBuffer`
/// are never mutated.
///
/// [`ByteParser`]: crate::parse::byteparser::ByteParser
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct VecBuffer(Vec<u8>);

impl VecBuffer {
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the `len`-byte range starting at index `ix`.
    ///
    /// # Panics
    ///
    /// Will panic if `ix + len` is out-of-bounds.
    pub fn get_slice(&self, ix: usize, len: usize) -> &[u8] {
        &self.0[ix..ix + len]
    }

    /// Returns the byte at the specified index.
    ///
    /// # Panics
    ///
    /// Will panic if `ix` is out-of-bounds.
    pub fn get_byte(&self, ix: usize) -> u8 {
        self.0[ix]
    }
}

impl std::fmt::Debug for VecBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Vec<u8> as std::fmt::Debug>::fmt(&self.0, f)
    }
}

impl From<Vec<u8>> for VecBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for VecBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_owned())
    }
}

impl<const N: usize> From<[u8; N]> for VecBuffer {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

impl<const N: usize> From<&'_ [u8; N]> for VecBuffer {
    fn from(bytes: &'_ [u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<HexString> for VecBuffer {
    fn from(hex: HexString) -> Self {
        Self(hex.into_inner())
    }
}

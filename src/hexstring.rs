//! Hexadecimal presentation type for binary buffers
//!
//! [`HexString`] is a thin wrapper around `Vec<u8>` whose `Display` and
//! comparison behavior treat the contents as a hexadecimal string rather
//! than raw binary. It is used pervasively in tests as a legible stand-in
//! for encoded byte-vectors, and implements [`Target`] so that an encoder
//! can be pointed at one directly.

use crate::conv::target::Target;
use crate::parse::error::ConvError;
use crate::util::{bytes_of_hex, hex_of_bytes};

#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct HexString {
    words: Vec<u8>,
}

impl HexString {
    /// Interprets a hexadecimal string as the byte-buffer it spells out.
    ///
    /// # Errors
    ///
    /// Returns a [`ConvError`] when `src` has odd length or contains a
    /// character outside of `[0-9a-fA-F]`.
    pub fn from_hex<T: AsRef<str>>(src: T) -> Result<Self, ConvError<String>> {
        let src = src.as_ref();
        match bytes_of_hex(src) {
            Ok(words) => Ok(Self { words }),
            Err(ConvError::ParityError(())) => Err(ConvError::ParityError(src.to_owned())),
            Err(ConvError::HexError(())) => Err(ConvError::HexError(src.to_owned())),
        }
    }

    /// Extracts the raw byte-buffer of a `HexString`.
    pub fn into_inner(self) -> Vec<u8> {
        self.words
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl From<Vec<u8>> for HexString {
    fn from(words: Vec<u8>) -> Self {
        Self { words }
    }
}

impl From<&[u8]> for HexString {
    fn from(words: &[u8]) -> Self {
        Self {
            words: words.to_vec(),
        }
    }
}

impl From<HexString> for Vec<u8> {
    fn from(hex: HexString) -> Self {
        hex.words
    }
}

impl std::fmt::Display for HexString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex_of_bytes(&self.words))
    }
}

impl std::fmt::Debug for HexString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HexString({})", hex_of_bytes(&self.words))
    }
}

impl PartialEq<Vec<u8>> for HexString {
    fn eq(&self, other: &Vec<u8>) -> bool {
        self.words == *other
    }
}

impl PartialEq<HexString> for Vec<u8> {
    fn eq(&self, other: &HexString) -> bool {
        *self == other.words
    }
}

impl PartialEq<[u8]> for HexString {
    fn eq(&self, other: &[u8]) -> bool {
        self.words == other
    }
}

impl Target for HexString {
    #[inline]
    fn anticipate(&mut self, extra: usize) {
        self.words.reserve_exact(extra)
    }

    #[inline]
    fn push_one(&mut self, b: u8) -> usize {
        self.words.push(b);
        1
    }

    #[inline]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        self.words.extend_from_slice(buf);
        buf.len()
    }

    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize {
        self.words.extend(arr);
        N
    }

    fn create() -> Self {
        Self::default()
    }
}

/// Constructs a [`HexString`] from a hexadecimal string-literal, panicking
/// if the literal is malformed.
#[macro_export]
macro_rules! hex {
    ($s:expr) => {{
        $crate::hexstring::HexString::from_hex($s).expect("hex! macro encountered error")
    }};
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_hex_valid() {
        assert_eq!(hex!("00ff10"), vec![0x00u8, 0xff, 0x10]);
    }

    #[test]
    fn from_hex_invalid() {
        assert!(HexString::from_hex("0").is_err());
        assert!(HexString::from_hex("0g").is_err());
    }

    #[test]
    fn display_is_hex() {
        let h = HexString::from(vec![0x0au8, 0xbc]);
        assert_eq!(h.to_string(), "0abc");
    }
}

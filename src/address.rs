//! Fixed-width account addresses
//!
//! Addresses occupy exactly [`ADDRESS_LENGTH`] bytes on the wire, with no
//! length prefix. The type is a plain newtype over the raw byte-array and
//! performs no checksum or network-level validation.

use crate::util::hex_of_bytes;

/// Serialized width of an [`Address`], in bytes.
pub const ADDRESS_LENGTH: usize = 8;

/// An 8-byte account address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Returns the address bytes by value.
    pub const fn to_bytes(self) -> [u8; ADDRESS_LENGTH] {
        self.0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Renders the address as a bare lowercase hex-string (no `0x` prefix).
    pub fn to_hex(self) -> String {
        hex_of_bytes(&self.0)
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; ADDRESS_LENGTH] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_prefixes_hex() {
        let addr = Address::new([1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(addr.to_string(), "0x0102030405060708");
    }

    #[test]
    fn null_address_is_default() {
        assert_eq!(Address::default(), Address::new([0; ADDRESS_LENGTH]));
    }
}

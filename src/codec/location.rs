//! Location prefix codec
//!
//! A single kind-byte dispatches the location payload. The kind bytes are
//! the leading characters of the original textual location prefixes,
//! which keeps them disjoint from nothing in particular: locations occupy
//! their own namespace because they only appear where the grammar
//! structurally expects one.

use crate::conv::target::Target;
use crate::error::{DecodeResult, EncodeResult};
use crate::gauge::{MemoryKind, MemoryUsage};
use crate::location::{Location, RAW_LOCATION_LENGTH};
use crate::parse::error::{ParseError, TagError};
use crate::parse::Parser;

use super::{Decoder, Encoder};

pub const LOCATION_KIND_ADDRESS: u8 = b'A';
pub const LOCATION_KIND_IDENTIFIER: u8 = b'I';
pub const LOCATION_KIND_REPL: u8 = b'R';
pub const LOCATION_KIND_STRING: u8 = b'S';
pub const LOCATION_KIND_SCRIPT: u8 = b's';
pub const LOCATION_KIND_TRANSACTION: u8 = b't';

impl<U: Target> Encoder<U> {
    pub fn encode_location(&mut self, location: &Location) -> EncodeResult<()> {
        match location {
            Location::Repl => {
                self.put_byte(LOCATION_KIND_REPL);
                Ok(())
            }
            Location::Identifier(name) => {
                self.put_byte(LOCATION_KIND_IDENTIFIER);
                self.put_string(name)
            }
            Location::String(name) => {
                self.put_byte(LOCATION_KIND_STRING);
                self.put_string(name)
            }
            Location::Address { address, name } => {
                self.put_byte(LOCATION_KIND_ADDRESS);
                self.put_address(*address);
                self.put_string(name)
            }
            Location::Transaction(hash) => {
                self.put_byte(LOCATION_KIND_TRANSACTION);
                self.written += self.target.push_many(*hash);
                Ok(())
            }
            Location::Script(hash) => {
                self.put_byte(LOCATION_KIND_SCRIPT);
                self.written += self.target.push_many(*hash);
                Ok(())
            }
        }
    }
}

impl<'g, P: Parser> Decoder<'g, P> {
    pub fn decode_location(&mut self) -> DecodeResult<Location> {
        let kind = self.parser().take_u8()?;
        self.meter(MemoryUsage::new(MemoryKind::Location, 1))?;
        match kind {
            LOCATION_KIND_REPL => Ok(Location::Repl),
            LOCATION_KIND_IDENTIFIER => Ok(Location::Identifier(self.parser().take_string()?)),
            LOCATION_KIND_STRING => Ok(Location::String(self.parser().take_string()?)),
            LOCATION_KIND_ADDRESS => {
                let address = self.parser().take_address()?;
                let name = self.parser().take_string()?;
                Ok(Location::Address { address, name })
            }
            LOCATION_KIND_TRANSACTION => Ok(Location::Transaction(
                self.parser().take_fixed::<RAW_LOCATION_LENGTH>()?,
            )),
            LOCATION_KIND_SCRIPT => Ok(Location::Script(
                self.parser().take_fixed::<RAW_LOCATION_LENGTH>()?,
            )),
            byte => Err(ParseError::InvalidTag(TagError::new(byte, "Location")).into()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::address::Address;
    use crate::error::DecodeError;
    use crate::parse::byteparser::ByteParser;

    fn roundtrip(location: Location) -> Vec<u8> {
        let mut encoder: Encoder<Vec<u8>> = Encoder::new();
        encoder.encode_location(&location).unwrap();
        let bytes = encoder.into_target();

        let mut decoder = Decoder::new(None, ByteParser::from_buffer(bytes.clone().into()));
        assert_eq!(decoder.decode_location().unwrap(), location);
        assert_eq!(decoder.remainder(), 0);
        bytes
    }

    #[test]
    fn repl_is_one_byte() {
        assert_eq!(roundtrip(Location::Repl), vec![b'R']);
    }

    #[test]
    fn identifier_carries_string() {
        assert_eq!(
            roundtrip(Location::Identifier("Crypto".to_owned())),
            vec![b'I', 0, 0, 0, 6, b'C', b'r', b'y', b'p', b't', b'o'],
        );
    }

    #[test]
    fn string_location_carries_string() {
        assert_eq!(
            roundtrip(Location::String("lib".to_owned())),
            vec![b'S', 0, 0, 0, 3, b'l', b'i', b'b'],
        );
    }

    #[test]
    fn address_location_carries_address_then_name() {
        assert_eq!(
            roundtrip(Location::Address {
                address: Address::new([1, 2, 3, 4, 5, 6, 7, 8]),
                name: "NFT".to_owned(),
            }),
            vec![b'A', 1, 2, 3, 4, 5, 6, 7, 8, 0, 0, 0, 3, b'N', b'F', b'T'],
        );
    }

    #[test]
    fn transaction_and_script_carry_raw_hashes() {
        let hash = [7u8; RAW_LOCATION_LENGTH];
        let bytes = roundtrip(Location::Transaction(hash));
        assert_eq!(bytes[0], b't');
        assert_eq!(&bytes[1..], &hash);

        let bytes = roundtrip(Location::Script(hash));
        assert_eq!(bytes[0], b's');
        assert_eq!(&bytes[1..], &hash);
    }

    #[test]
    fn unknown_kind_is_corrupt() {
        let mut decoder = Decoder::new(None, ByteParser::from_buffer([b'X'].into()));
        assert_eq!(
            decoder.decode_location(),
            Err(DecodeError::Parse(ParseError::InvalidTag(TagError::new(
                b'X', "Location"
            ))))
        );
    }

    #[test]
    fn truncated_hash_is_corrupt() {
        let mut decoder = Decoder::new(None, ByteParser::from_buffer([b't', 1, 2, 3].into()));
        assert!(matches!(
            decoder.decode_location(),
            Err(DecodeError::Parse(ParseError::BufferOverflow { .. }))
        ));
    }
}

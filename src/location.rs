//! Source locations for composite types and values
//!
//! Every composite type names the location of the source that declared it.
//! Locations form a small closed sum, discriminated on the wire by a
//! single kind-byte whose value space is independent of the value-tag and
//! type-tag namespaces (a location only ever appears where the grammar
//! structurally expects one).

use crate::address::Address;
use crate::util::hex_of_bytes;

/// Width of the raw hash carried by transaction and script locations.
pub const RAW_LOCATION_LENGTH: usize = 32;

/// Where a composite declaration originates.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// Declared interactively; carries no payload.
    Repl,
    /// Declared in a named module.
    Identifier(String),
    /// Declared in an arbitrary string-addressed source.
    String(String),
    /// Declared in a contract deployed at an account address.
    Address { address: Address, name: String },
    /// Declared inside a transaction, identified by its 32-byte hash.
    Transaction([u8; RAW_LOCATION_LENGTH]),
    /// Declared inside a script, identified by its 32-byte hash.
    Script([u8; RAW_LOCATION_LENGTH]),
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Repl => write!(f, "REPL"),
            Location::Identifier(name) => write!(f, "I.{}", name),
            Location::String(name) => write!(f, "S.{}", name),
            Location::Address { address, name } => write!(f, "A.{}.{}", address.to_hex(), name),
            Location::Transaction(hash) => write!(f, "t.{}", hex_of_bytes(hash)),
            Location::Script(hash) => write!(f, "s.{}", hex_of_bytes(hash)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_ids() {
        assert_eq!(Location::Repl.to_string(), "REPL");
        assert_eq!(
            Location::Identifier("Marketplace".to_owned()).to_string(),
            "I.Marketplace"
        );
        assert_eq!(
            Location::Address {
                address: Address::new([0, 0, 0, 0, 0, 0, 0, 9]),
                name: "Vault".to_owned(),
            }
            .to_string(),
            "A.0000000000000009.Vault"
        );
    }
}

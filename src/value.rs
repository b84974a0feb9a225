//! The runtime value taxonomy
//!
//! [`Value`] is the closed sum of every runtime value the wire grammar can
//! carry. Container variants embed the static type information the wire
//! requires: arrays carry their element type, dictionaries their key and
//! value types, and composites their full declared type. The codec relies
//! on derived structural equality for its round-trip guarantees.

use num_bigint::BigInt;

use crate::address::Address;
use crate::types::{CompositeType, EnumType, EventType, Type};

/// A storage path: a domain paired with an identifier inside it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path {
    pub domain: String,
    pub identifier: String,
}

impl Path {
    pub fn new(domain: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            identifier: identifier.into(),
        }
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}/{}", self.domain, self.identifier)
    }
}

/// One entry of a dictionary value, in declared order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValuePair {
    pub key: Value,
    pub value: Value,
}

impl KeyValuePair {
    pub fn new(key: Value, value: Value) -> Self {
        Self { key, value }
    }
}

/// The closed sum of runtime values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Void,
    /// `None` is the nil optional; `Some` wraps the present inner value.
    Optional(Option<Box<Value>>),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
    /// An extended grapheme cluster. The codec transports the raw UTF-8
    /// and does not validate cluster-ness.
    Character(String),
    Address(Address),

    Int(BigInt),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Int128(BigInt),
    Int256(BigInt),
    UInt(BigInt),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    UInt128(BigInt),
    UInt256(BigInt),
    Word8(u8),
    Word16(u16),
    Word32(u32),
    Word64(u64),
    /// Raw scaled representation; the decimal scale is a property of the
    /// surrounding value model, not of the codec.
    Fix64(i64),
    UFix64(u64),

    VariableArray {
        element_type: Type,
        elements: Vec<Value>,
    },
    ConstantArray {
        element_type: Type,
        /// Declared size; must equal `elements.len()` to encode.
        size: u32,
        elements: Vec<Value>,
    },
    Dictionary {
        key_type: Type,
        value_type: Type,
        pairs: Vec<KeyValuePair>,
    },

    Struct {
        typ: CompositeType,
        fields: Option<Vec<Value>>,
    },
    Resource {
        typ: CompositeType,
        fields: Option<Vec<Value>>,
    },
    Event {
        typ: EventType,
        fields: Option<Vec<Value>>,
    },
    Contract {
        typ: CompositeType,
        fields: Option<Vec<Value>>,
    },
    Enum {
        typ: EnumType,
        fields: Option<Vec<Value>>,
    },

    Link {
        target_path: Path,
        /// The borrowed type, carried as its textual type-identifier.
        borrow_type: String,
    },
    Path(Path),
    Capability {
        path: Path,
        address: Address,
        borrow_type: Type,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn path_display() {
        let path = Path::new("storage", "flowVault");
        assert_eq!(path.to_string(), "/storage/flowVault");
    }

    #[test]
    fn optional_nesting() {
        let inner = Value::Optional(Some(Box::new(Value::Bool(true))));
        let outer = Value::Optional(Some(Box::new(inner.clone())));
        assert_ne!(inner, outer);
    }
}

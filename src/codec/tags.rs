//! Wire tag namespaces
//!
//! Two disjoint single-byte enumerations discriminate every value and
//! every type encoding. Numeric assignments are frozen: payloads already
//! written depend on them, and the golden-vector tests pin each one.
//! Assignments start at 1 (0 is the unusable "unknown" slot) and grow
//! sequentially, skipping retired slots that earlier revisions of the
//! enumeration burned; retired slots are neither emitted nor accepted.
//!
//! A front-door format selector routes any payload whose first byte is
//! `'{'` to a JSON decoder, so [`JSON_PAYLOAD_SENTINEL`] (0x7B) is
//! permanently reserved in both namespaces.

use crate::parse::error::TagError;

/// First byte of a JSON-encoded payload; never assignable as a tag.
pub const JSON_PAYLOAD_SENTINEL: u8 = b'{';

macro_rules! tag_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident = $val:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $val),*
        }

        impl $name {
            /// The wire byte of this tag.
            #[inline]
            pub const fn tag(self) -> u8 {
                self as u8
            }

            /// Every assigned tag, in ascending order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl std::convert::TryFrom<u8> for $name {
            type Error = TagError;

            fn try_from(byte: u8) -> Result<Self, TagError> {
                match byte {
                    $($val => Ok($name::$variant),)*
                    _ => Err(TagError::new(byte, stringify!($name))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:?}({:#04x})", self, self.tag())
            }
        }
    };
}

tag_enum! {
    /// Leading discriminant byte of every value encoding.
    ///
    /// Slot 33 is retired (a mis-spelled event constant in the original
    /// enumeration) and left as a gap.
    EncodedValue {
        Void = 1,
        Optional = 2,
        Bool = 3,
        String = 4,
        Bytes = 5,
        Character = 6,
        Address = 7,
        Int = 8,
        Int8 = 9,
        Int16 = 10,
        Int32 = 11,
        Int64 = 12,
        Int128 = 13,
        Int256 = 14,
        UInt = 15,
        UInt8 = 16,
        UInt16 = 17,
        UInt32 = 18,
        UInt64 = 19,
        UInt128 = 20,
        UInt256 = 21,
        Word8 = 22,
        Word16 = 23,
        Word32 = 24,
        Word64 = 25,
        Fix64 = 26,
        UFix64 = 27,
        VariableArray = 28,
        ConstantArray = 29,
        Dictionary = 30,
        Struct = 31,
        Resource = 32,
        Event = 34,
        Contract = 35,
        Link = 36,
        Path = 37,
        Capability = 38,
        Enum = 39,
    }
}

tag_enum! {
    /// Leading discriminant byte of every type encoding.
    ///
    /// Gaps: slot 4 (a legacy untyped-array constant), 49 (block), 59-62
    /// (account sub-object slots) and 66-68 (a mis-spelled array constant
    /// plus two speculative slots) are retired. `MetaType` owns slot 69
    /// but has no payload grammar; the codec refuses it in both
    /// directions.
    EncodedType {
        Void = 1,
        Never = 2,
        Bool = 3,
        Optional = 5,
        String = 6,
        Character = 7,
        Bytes = 8,
        Address = 9,
        Number = 10,
        SignedNumber = 11,
        Integer = 12,
        SignedInteger = 13,
        FixedPoint = 14,
        SignedFixedPoint = 15,
        Int = 16,
        Int8 = 17,
        Int16 = 18,
        Int32 = 19,
        Int64 = 20,
        Int128 = 21,
        Int256 = 22,
        UInt = 23,
        UInt8 = 24,
        UInt16 = 25,
        UInt32 = 26,
        UInt64 = 27,
        UInt128 = 28,
        UInt256 = 29,
        Word8 = 30,
        Word16 = 31,
        Word32 = 32,
        Word64 = 33,
        Fix64 = 34,
        UFix64 = 35,
        VariableSizedArray = 36,
        ConstantSizedArray = 37,
        Dictionary = 38,
        Struct = 39,
        Resource = 40,
        Event = 41,
        Contract = 42,
        StructInterface = 43,
        ResourceInterface = 44,
        ContractInterface = 45,
        Function = 46,
        Reference = 47,
        Restricted = 48,
        CapabilityPath = 50,
        StoragePath = 51,
        PublicPath = 52,
        PrivatePath = 53,
        Capability = 54,
        Enum = 55,
        AuthAccount = 56,
        PublicAccount = 57,
        DeployedContract = 58,
        Any = 63,
        AnyStruct = 64,
        AnyResource = 65,
        MetaType = 69,
        Path = 70,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn value_tags_are_stable() {
        assert_eq!(EncodedValue::Void.tag(), 1);
        assert_eq!(EncodedValue::UFix64.tag(), 27);
        assert_eq!(EncodedValue::Resource.tag(), 32);
        assert_eq!(EncodedValue::Event.tag(), 34);
        assert_eq!(EncodedValue::Enum.tag(), 39);
    }

    #[test]
    fn type_tags_are_stable() {
        assert_eq!(EncodedType::Void.tag(), 1);
        assert_eq!(EncodedType::Optional.tag(), 5);
        assert_eq!(EncodedType::Restricted.tag(), 48);
        assert_eq!(EncodedType::CapabilityPath.tag(), 50);
        assert_eq!(EncodedType::AnyResource.tag(), 65);
        assert_eq!(EncodedType::MetaType.tag(), 69);
        assert_eq!(EncodedType::Path.tag(), 70);
    }

    #[test]
    fn retired_slots_are_rejected() {
        assert!(EncodedValue::try_from(33).is_err());
        for byte in [0u8, 4, 49, 59, 60, 61, 62, 66, 67, 68] {
            assert!(EncodedType::try_from(byte).is_err(), "byte {}", byte);
        }
    }

    #[test]
    fn json_sentinel_is_unassigned() {
        assert!(EncodedValue::try_from(JSON_PAYLOAD_SENTINEL).is_err());
        assert!(EncodedType::try_from(JSON_PAYLOAD_SENTINEL).is_err());
        for tag in EncodedValue::ALL {
            assert_ne!(tag.tag(), JSON_PAYLOAD_SENTINEL);
        }
        for tag in EncodedType::ALL {
            assert_ne!(tag.tag(), JSON_PAYLOAD_SENTINEL);
        }
    }

    #[test]
    fn tag_bytes_roundtrip() {
        for tag in EncodedValue::ALL {
            assert_eq!(EncodedValue::try_from(tag.tag()), Ok(*tag));
        }
        for tag in EncodedType::ALL {
            assert_eq!(EncodedType::try_from(tag.tag()), Ok(*tag));
        }
    }
}

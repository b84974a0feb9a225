//! Static-type codec
//!
//! Every type encoding is one tag byte followed by a fixed-order payload;
//! there are no back-references and no shared-type table, so structurally
//! identical sub-types are written (and re-allocated on read) separately.
//! Composite payloads share a common body grammar which the value codec
//! also embeds, tag-free, inside composite values.

use crate::conv::target::Target;
use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::gauge::{MemoryKind, MemoryUsage};
use crate::parse::error::ParseError;
use crate::parse::Parser;
use crate::types::{CompositeType, EnumType, EventType, Field, Parameter, Type};

use super::tags::EncodedType;
use super::{Decoder, Encoder};

impl<U: Target> Encoder<U> {
    /// Serializes one static type: its tag byte, then the payload its
    /// variant prescribes.
    pub fn encode_type(&mut self, typ: &Type) -> EncodeResult<()> {
        match typ {
            Type::Void => self.put_type_tag(EncodedType::Void),
            Type::Never => self.put_type_tag(EncodedType::Never),
            Type::Bool => self.put_type_tag(EncodedType::Bool),
            Type::String => self.put_type_tag(EncodedType::String),
            Type::Character => self.put_type_tag(EncodedType::Character),
            Type::Bytes => self.put_type_tag(EncodedType::Bytes),
            Type::Address => self.put_type_tag(EncodedType::Address),
            Type::Number => self.put_type_tag(EncodedType::Number),
            Type::SignedNumber => self.put_type_tag(EncodedType::SignedNumber),
            Type::Integer => self.put_type_tag(EncodedType::Integer),
            Type::SignedInteger => self.put_type_tag(EncodedType::SignedInteger),
            Type::FixedPoint => self.put_type_tag(EncodedType::FixedPoint),
            Type::SignedFixedPoint => self.put_type_tag(EncodedType::SignedFixedPoint),
            Type::Int => self.put_type_tag(EncodedType::Int),
            Type::Int8 => self.put_type_tag(EncodedType::Int8),
            Type::Int16 => self.put_type_tag(EncodedType::Int16),
            Type::Int32 => self.put_type_tag(EncodedType::Int32),
            Type::Int64 => self.put_type_tag(EncodedType::Int64),
            Type::Int128 => self.put_type_tag(EncodedType::Int128),
            Type::Int256 => self.put_type_tag(EncodedType::Int256),
            Type::UInt => self.put_type_tag(EncodedType::UInt),
            Type::UInt8 => self.put_type_tag(EncodedType::UInt8),
            Type::UInt16 => self.put_type_tag(EncodedType::UInt16),
            Type::UInt32 => self.put_type_tag(EncodedType::UInt32),
            Type::UInt64 => self.put_type_tag(EncodedType::UInt64),
            Type::UInt128 => self.put_type_tag(EncodedType::UInt128),
            Type::UInt256 => self.put_type_tag(EncodedType::UInt256),
            Type::Word8 => self.put_type_tag(EncodedType::Word8),
            Type::Word16 => self.put_type_tag(EncodedType::Word16),
            Type::Word32 => self.put_type_tag(EncodedType::Word32),
            Type::Word64 => self.put_type_tag(EncodedType::Word64),
            Type::Fix64 => self.put_type_tag(EncodedType::Fix64),
            Type::UFix64 => self.put_type_tag(EncodedType::UFix64),
            Type::Path => self.put_type_tag(EncodedType::Path),
            Type::CapabilityPath => self.put_type_tag(EncodedType::CapabilityPath),
            Type::StoragePath => self.put_type_tag(EncodedType::StoragePath),
            Type::PublicPath => self.put_type_tag(EncodedType::PublicPath),
            Type::PrivatePath => self.put_type_tag(EncodedType::PrivatePath),
            Type::AuthAccount => self.put_type_tag(EncodedType::AuthAccount),
            Type::PublicAccount => self.put_type_tag(EncodedType::PublicAccount),
            Type::DeployedContract => self.put_type_tag(EncodedType::DeployedContract),
            Type::Any => self.put_type_tag(EncodedType::Any),
            Type::AnyStruct => self.put_type_tag(EncodedType::AnyStruct),
            Type::AnyResource => self.put_type_tag(EncodedType::AnyResource),

            Type::MetaType => Err(EncodeError::UnsupportedType("MetaType")),

            Type::Optional(inner) => {
                self.put_type_tag(EncodedType::Optional)?;
                match inner {
                    None => {
                        self.put_bool(true);
                        Ok(())
                    }
                    Some(element) => {
                        self.put_bool(false);
                        self.encode_type(element)
                    }
                }
            }
            Type::VariableSizedArray(element) => {
                self.put_type_tag(EncodedType::VariableSizedArray)?;
                self.encode_type(element)
            }
            Type::ConstantSizedArray { element, size } => {
                self.put_type_tag(EncodedType::ConstantSizedArray)?;
                self.encode_type(element)?;
                self.put_u32(*size);
                Ok(())
            }
            Type::Dictionary { key, value } => {
                self.put_type_tag(EncodedType::Dictionary)?;
                self.encode_type(key)?;
                self.encode_type(value)
            }
            Type::Reference {
                authorized,
                referenced,
            } => {
                self.put_type_tag(EncodedType::Reference)?;
                self.put_bool(*authorized);
                self.encode_type(referenced)
            }
            Type::Capability(borrow) => {
                self.put_type_tag(EncodedType::Capability)?;
                self.encode_type(borrow)
            }
            Type::Function {
                type_id,
                parameters,
                return_type,
            } => {
                self.put_type_tag(EncodedType::Function)?;
                self.put_string(type_id)?;
                self.encode_parameter_list(parameters.as_deref())?;
                self.encode_type(return_type)
            }
            Type::Restricted {
                restricted,
                restrictions,
            } => {
                self.put_type_tag(EncodedType::Restricted)?;
                self.encode_type(restricted)?;
                self.put_opt_list(restrictions.as_deref(), |enc, t| enc.encode_type(t))
            }

            Type::Struct(composite) => {
                self.put_type_tag(EncodedType::Struct)?;
                self.encode_composite_body(composite)
            }
            Type::Resource(composite) => {
                self.put_type_tag(EncodedType::Resource)?;
                self.encode_composite_body(composite)
            }
            Type::Contract(composite) => {
                self.put_type_tag(EncodedType::Contract)?;
                self.encode_composite_body(composite)
            }
            Type::StructInterface(composite) => {
                self.put_type_tag(EncodedType::StructInterface)?;
                self.encode_composite_body(composite)
            }
            Type::ResourceInterface(composite) => {
                self.put_type_tag(EncodedType::ResourceInterface)?;
                self.encode_composite_body(composite)
            }
            Type::ContractInterface(composite) => {
                self.put_type_tag(EncodedType::ContractInterface)?;
                self.encode_composite_body(composite)
            }
            Type::Event(event) => {
                self.put_type_tag(EncodedType::Event)?;
                self.encode_event_body(event)
            }
            Type::Enum(enumeration) => {
                self.put_type_tag(EncodedType::Enum)?;
                self.encode_enum_body(enumeration)
            }
        }
    }

    #[inline]
    fn put_type_tag(&mut self, tag: EncodedType) -> EncodeResult<()> {
        self.put_byte(tag.tag());
        Ok(())
    }

    /// Location, qualified identifier, fields, initializer suite.
    pub(crate) fn encode_composite_body(&mut self, composite: &CompositeType) -> EncodeResult<()> {
        self.encode_location(&composite.location)?;
        self.put_string(&composite.qualified_identifier)?;
        self.encode_fields(composite.fields.as_deref())?;
        self.put_opt_list(composite.initializers.as_deref(), |enc, init| {
            enc.encode_parameter_list(init.as_deref())
        })
    }

    /// Like the composite body, but with a single initializer in place of
    /// the suite.
    pub(crate) fn encode_event_body(&mut self, event: &EventType) -> EncodeResult<()> {
        self.encode_location(&event.location)?;
        self.put_string(&event.qualified_identifier)?;
        self.encode_fields(event.fields.as_deref())?;
        self.encode_parameter_list(event.initializer.as_deref())
    }

    /// Like the composite body, with the raw type inserted after the
    /// qualified identifier.
    pub(crate) fn encode_enum_body(&mut self, enumeration: &EnumType) -> EncodeResult<()> {
        self.encode_location(&enumeration.location)?;
        self.put_string(&enumeration.qualified_identifier)?;
        self.encode_type(&enumeration.raw_type)?;
        self.encode_fields(enumeration.fields.as_deref())?;
        self.put_opt_list(enumeration.initializers.as_deref(), |enc, init| {
            enc.encode_parameter_list(init.as_deref())
        })
    }

    fn encode_fields(&mut self, fields: Option<&[Field]>) -> EncodeResult<()> {
        self.put_opt_list(fields, |enc, field| {
            enc.put_string(&field.identifier)?;
            enc.encode_type(&field.typ)
        })
    }

    fn encode_parameter_list(&mut self, parameters: Option<&[Parameter]>) -> EncodeResult<()> {
        self.put_opt_list(parameters, |enc, param| {
            enc.put_string(&param.label)?;
            enc.put_string(&param.identifier)?;
            enc.encode_type(&param.typ)
        })
    }
}

impl<'g, P: Parser> Decoder<'g, P> {
    /// Deserializes one static type, dispatching on its tag byte.
    pub fn decode_type(&mut self) -> DecodeResult<Type> {
        let byte = self.parser().take_u8()?;
        let tag = EncodedType::try_from(byte).map_err(ParseError::InvalidTag)?;
        self.meter(MemoryUsage::new(MemoryKind::Type, 1))?;
        match tag {
            EncodedType::Void => Ok(Type::Void),
            EncodedType::Never => Ok(Type::Never),
            EncodedType::Bool => Ok(Type::Bool),
            EncodedType::String => Ok(Type::String),
            EncodedType::Character => Ok(Type::Character),
            EncodedType::Bytes => Ok(Type::Bytes),
            EncodedType::Address => Ok(Type::Address),
            EncodedType::Number => Ok(Type::Number),
            EncodedType::SignedNumber => Ok(Type::SignedNumber),
            EncodedType::Integer => Ok(Type::Integer),
            EncodedType::SignedInteger => Ok(Type::SignedInteger),
            EncodedType::FixedPoint => Ok(Type::FixedPoint),
            EncodedType::SignedFixedPoint => Ok(Type::SignedFixedPoint),
            EncodedType::Int => Ok(Type::Int),
            EncodedType::Int8 => Ok(Type::Int8),
            EncodedType::Int16 => Ok(Type::Int16),
            EncodedType::Int32 => Ok(Type::Int32),
            EncodedType::Int64 => Ok(Type::Int64),
            EncodedType::Int128 => Ok(Type::Int128),
            EncodedType::Int256 => Ok(Type::Int256),
            EncodedType::UInt => Ok(Type::UInt),
            EncodedType::UInt8 => Ok(Type::UInt8),
            EncodedType::UInt16 => Ok(Type::UInt16),
            EncodedType::UInt32 => Ok(Type::UInt32),
            EncodedType::UInt64 => Ok(Type::UInt64),
            EncodedType::UInt128 => Ok(Type::UInt128),
            EncodedType::UInt256 => Ok(Type::UInt256),
            EncodedType::Word8 => Ok(Type::Word8),
            EncodedType::Word16 => Ok(Type::Word16),
            EncodedType::Word32 => Ok(Type::Word32),
            EncodedType::Word64 => Ok(Type::Word64),
            EncodedType::Fix64 => Ok(Type::Fix64),
            EncodedType::UFix64 => Ok(Type::UFix64),
            EncodedType::Path => Ok(Type::Path),
            EncodedType::CapabilityPath => Ok(Type::CapabilityPath),
            EncodedType::StoragePath => Ok(Type::StoragePath),
            EncodedType::PublicPath => Ok(Type::PublicPath),
            EncodedType::PrivatePath => Ok(Type::PrivatePath),
            EncodedType::AuthAccount => Ok(Type::AuthAccount),
            EncodedType::PublicAccount => Ok(Type::PublicAccount),
            EncodedType::DeployedContract => Ok(Type::DeployedContract),
            EncodedType::Any => Ok(Type::Any),
            EncodedType::AnyStruct => Ok(Type::AnyStruct),
            EncodedType::AnyResource => Ok(Type::AnyResource),

            EncodedType::MetaType => Err(DecodeError::UnsupportedType("MetaType")),

            EncodedType::Optional => {
                if self.parser().take_bool()? {
                    Ok(Type::Optional(None))
                } else {
                    let element = self.decode_type()?;
                    Ok(Type::Optional(Some(Box::new(element))))
                }
            }
            EncodedType::VariableSizedArray => {
                let element = self.decode_type()?;
                Ok(Type::VariableSizedArray(Box::new(element)))
            }
            EncodedType::ConstantSizedArray => {
                let element = self.decode_type()?;
                let size = self.parser().take_u32()?;
                Ok(Type::ConstantSizedArray {
                    element: Box::new(element),
                    size,
                })
            }
            EncodedType::Dictionary => {
                let key = self.decode_type()?;
                let value = self.decode_type()?;
                Ok(Type::Dictionary {
                    key: Box::new(key),
                    value: Box::new(value),
                })
            }
            EncodedType::Reference => {
                let authorized = self.parser().take_bool()?;
                let referenced = self.decode_type()?;
                Ok(Type::Reference {
                    authorized,
                    referenced: Box::new(referenced),
                })
            }
            EncodedType::Capability => {
                let borrow = self.decode_type()?;
                Ok(Type::Capability(Box::new(borrow)))
            }
            EncodedType::Function => {
                let type_id = self.parser().take_string()?;
                let parameters = self.decode_parameter_list()?;
                let return_type = self.decode_type()?;
                Ok(Type::Function {
                    type_id,
                    parameters,
                    return_type: Box::new(return_type),
                })
            }
            EncodedType::Restricted => {
                let restricted = self.decode_type()?;
                let restrictions = self.take_opt_list(|dec| dec.decode_type())?;
                Ok(Type::Restricted {
                    restricted: Box::new(restricted),
                    restrictions,
                })
            }

            EncodedType::Struct => Ok(Type::Struct(self.decode_composite_body()?)),
            EncodedType::Resource => Ok(Type::Resource(self.decode_composite_body()?)),
            EncodedType::Contract => Ok(Type::Contract(self.decode_composite_body()?)),
            EncodedType::StructInterface => {
                Ok(Type::StructInterface(self.decode_composite_body()?))
            }
            EncodedType::ResourceInterface => {
                Ok(Type::ResourceInterface(self.decode_composite_body()?))
            }
            EncodedType::ContractInterface => {
                Ok(Type::ContractInterface(self.decode_composite_body()?))
            }
            EncodedType::Event => Ok(Type::Event(self.decode_event_body()?)),
            EncodedType::Enum => Ok(Type::Enum(self.decode_enum_body()?)),
        }
    }

    pub(crate) fn decode_composite_body(&mut self) -> DecodeResult<CompositeType> {
        let location = self.decode_location()?;
        let qualified_identifier = self.parser().take_string()?;
        let fields = self.decode_fields()?;
        let initializers = self.take_opt_list(|dec| dec.decode_parameter_list())?;
        self.meter(MemoryUsage::new(MemoryKind::Composite, 1))?;
        Ok(CompositeType {
            location,
            qualified_identifier,
            fields,
            initializers,
        })
    }

    pub(crate) fn decode_event_body(&mut self) -> DecodeResult<EventType> {
        let location = self.decode_location()?;
        let qualified_identifier = self.parser().take_string()?;
        let fields = self.decode_fields()?;
        let initializer = self.decode_parameter_list()?;
        self.meter(MemoryUsage::new(MemoryKind::Composite, 1))?;
        Ok(EventType {
            location,
            qualified_identifier,
            fields,
            initializer,
        })
    }

    pub(crate) fn decode_enum_body(&mut self) -> DecodeResult<EnumType> {
        let location = self.decode_location()?;
        let qualified_identifier = self.parser().take_string()?;
        let raw_type = self.decode_type()?;
        let fields = self.decode_fields()?;
        let initializers = self.take_opt_list(|dec| dec.decode_parameter_list())?;
        self.meter(MemoryUsage::new(MemoryKind::Composite, 1))?;
        Ok(EnumType {
            location,
            qualified_identifier,
            raw_type: Box::new(raw_type),
            fields,
            initializers,
        })
    }

    fn decode_fields(&mut self) -> DecodeResult<Option<Vec<Field>>> {
        self.take_opt_list(|dec| {
            let identifier = dec.parser().take_string()?;
            let typ = dec.decode_type()?;
            Ok(Field { identifier, typ })
        })
    }

    fn decode_parameter_list(&mut self) -> DecodeResult<Option<Vec<Parameter>>> {
        self.take_opt_list(|dec| {
            let label = dec.parser().take_string()?;
            let identifier = dec.parser().take_string()?;
            let typ = dec.decode_type()?;
            Ok(Parameter {
                label,
                identifier,
                typ,
            })
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codec::{decode_type, encode_type, must_decode_type, must_encode_type};
    use crate::error::ErrorCategory;
    use crate::location::Location;
    use crate::parse::error::TagError;

    /// The recurring composite used across the composite-grammar tests:
    /// one `UInt16` field "argon" and one initializer taking
    /// `(lebal home: Word8)`.
    fn neon_composite() -> CompositeType {
        CompositeType {
            location: Location::Repl,
            qualified_identifier: "neon".to_owned(),
            fields: Some(vec![Field::new("argon", Type::UInt16)]),
            initializers: Some(vec![Some(vec![Parameter::new(
                "lebal",
                "home",
                Type::Word8,
            )])]),
        }
    }

    /// The expected body bytes of [`neon_composite`], shared between the
    /// struct/resource/contract golden tests.
    fn neon_body_bytes() -> Vec<u8> {
        let mut bytes = vec![
            b'R', // REPL location
            0, 0, 0, 4, b'n', b'e', b'o', b'n',
        ];
        // fields: present, one entry
        bytes.extend([1, 0, 0, 0, 1]);
        bytes.extend([0, 0, 0, 5]);
        bytes.extend(*b"argon");
        bytes.push(EncodedType::UInt16.tag());
        // initializers: present, one present parameter-list of one entry
        bytes.extend([1, 0, 0, 0, 1]);
        bytes.extend([1, 0, 0, 0, 1]);
        bytes.extend([0, 0, 0, 5]);
        bytes.extend(*b"lebal");
        bytes.extend([0, 0, 0, 4]);
        bytes.extend(*b"home");
        bytes.push(EncodedType::Word8.tag());
        bytes
    }

    fn roundtrip(typ: Type) -> Vec<u8> {
        let bytes = encode_type(&typ).unwrap();
        assert_eq!(decode_type(None, &bytes).unwrap(), typ);
        bytes
    }

    #[test]
    fn scalar_types_are_one_tag_byte() {
        assert_eq!(roundtrip(Type::Void), vec![EncodedType::Void.tag()]);
        assert_eq!(roundtrip(Type::Never), vec![EncodedType::Never.tag()]);
        assert_eq!(roundtrip(Type::Bool), vec![EncodedType::Bool.tag()]);
        assert_eq!(roundtrip(Type::String), vec![EncodedType::String.tag()]);
        assert_eq!(roundtrip(Type::Bytes), vec![EncodedType::Bytes.tag()]);
        assert_eq!(roundtrip(Type::Address), vec![EncodedType::Address.tag()]);
        assert_eq!(roundtrip(Type::Number), vec![EncodedType::Number.tag()]);
        assert_eq!(
            roundtrip(Type::SignedFixedPoint),
            vec![EncodedType::SignedFixedPoint.tag()]
        );
        assert_eq!(roundtrip(Type::Path), vec![EncodedType::Path.tag()]);
        assert_eq!(
            roundtrip(Type::StoragePath),
            vec![EncodedType::StoragePath.tag()]
        );
        assert_eq!(
            roundtrip(Type::DeployedContract),
            vec![EncodedType::DeployedContract.tag()]
        );
        assert_eq!(roundtrip(Type::Any), vec![EncodedType::Any.tag()]);
        assert_eq!(
            roundtrip(Type::AnyResource),
            vec![EncodedType::AnyResource.tag()]
        );
    }

    #[test]
    fn all_sized_numeric_types_roundtrip() {
        for typ in [
            Type::Int,
            Type::Int8,
            Type::Int16,
            Type::Int32,
            Type::Int64,
            Type::Int128,
            Type::Int256,
            Type::UInt,
            Type::UInt8,
            Type::UInt16,
            Type::UInt32,
            Type::UInt64,
            Type::UInt128,
            Type::UInt256,
            Type::Word8,
            Type::Word16,
            Type::Word32,
            Type::Word64,
            Type::Fix64,
            Type::UFix64,
        ] {
            roundtrip(typ);
        }
    }

    #[test]
    fn optional_type_has_nil_header() {
        assert_eq!(
            roundtrip(Type::Optional(Some(Box::new(Type::Bool)))),
            vec![EncodedType::Optional.tag(), 1, EncodedType::Bool.tag()]
        );
        assert_eq!(
            roundtrip(Type::Optional(None)),
            vec![EncodedType::Optional.tag(), 2]
        );
    }

    #[test]
    fn array_types() {
        assert_eq!(
            roundtrip(Type::VariableSizedArray(Box::new(Type::Any))),
            vec![
                EncodedType::VariableSizedArray.tag(),
                EncodedType::Any.tag()
            ]
        );
        assert_eq!(
            roundtrip(Type::ConstantSizedArray {
                element: Box::new(Type::Any),
                size: 12,
            }),
            vec![
                EncodedType::ConstantSizedArray.tag(),
                EncodedType::Any.tag(),
                0,
                0,
                0,
                12
            ]
        );
    }

    #[test]
    fn dictionary_type() {
        assert_eq!(
            roundtrip(Type::Dictionary {
                key: Box::new(Type::AnyResource),
                value: Box::new(Type::SignedNumber),
            }),
            vec![
                EncodedType::Dictionary.tag(),
                EncodedType::AnyResource.tag(),
                EncodedType::SignedNumber.tag()
            ]
        );
    }

    #[test]
    fn reference_type() {
        assert_eq!(
            roundtrip(Type::Reference {
                authorized: true,
                referenced: Box::new(Type::Int64),
            }),
            vec![EncodedType::Reference.tag(), 2, EncodedType::Int64.tag()]
        );
    }

    #[test]
    fn capability_type() {
        assert_eq!(
            roundtrip(Type::Capability(Box::new(Type::Address))),
            vec![EncodedType::Capability.tag(), EncodedType::Address.tag()]
        );
    }

    #[test]
    fn function_type() {
        let typ = Type::Function {
            type_id: "tid".to_owned(),
            parameters: Some(vec![Parameter::new("el", "ihden", Type::UInt)]),
            return_type: Box::new(Type::Int),
        };
        let mut expected = vec![EncodedType::Function.tag(), 0, 0, 0, 3];
        expected.extend(*b"tid");
        expected.extend([1, 0, 0, 0, 1]);
        expected.extend([0, 0, 0, 2]);
        expected.extend(*b"el");
        expected.extend([0, 0, 0, 5]);
        expected.extend(*b"ihden");
        expected.push(EncodedType::UInt.tag());
        expected.push(EncodedType::Int.tag());
        assert_eq!(roundtrip(typ), expected);
    }

    #[test]
    fn restricted_type_roundtrips() {
        roundtrip(Type::Restricted {
            restricted: Box::new(Type::AnyResource),
            restrictions: Some(vec![
                Type::ResourceInterface(neon_composite()),
                Type::AnyResource,
            ]),
        });
        roundtrip(Type::Restricted {
            restricted: Box::new(Type::AnyStruct),
            restrictions: None,
        });
    }

    #[test]
    fn struct_type_golden_bytes() {
        let mut expected = vec![EncodedType::Struct.tag()];
        expected.extend(neon_body_bytes());
        assert_eq!(roundtrip(Type::Struct(neon_composite())), expected);
    }

    #[test]
    fn composite_kind_tags_differ_over_shared_body() {
        for (typ, tag) in [
            (Type::Resource(neon_composite()), EncodedType::Resource),
            (Type::Contract(neon_composite()), EncodedType::Contract),
            (
                Type::StructInterface(neon_composite()),
                EncodedType::StructInterface,
            ),
            (
                Type::ResourceInterface(neon_composite()),
                EncodedType::ResourceInterface,
            ),
            (
                Type::ContractInterface(neon_composite()),
                EncodedType::ContractInterface,
            ),
        ] {
            let bytes = roundtrip(typ);
            assert_eq!(bytes[0], tag.tag());
            assert_eq!(&bytes[1..], neon_body_bytes());
        }
    }

    #[test]
    fn event_type_has_single_initializer() {
        let typ = Type::Event(EventType {
            location: Location::Repl,
            qualified_identifier: "neon".to_owned(),
            fields: Some(vec![Field::new("argon", Type::UInt16)]),
            initializer: Some(vec![Parameter::new("lebal", "home", Type::Word8)]),
        });

        let mut expected = vec![
            EncodedType::Event.tag(),
            b'R',
            0, 0, 0, 4, b'n', b'e', b'o', b'n',
        ];
        expected.extend([1, 0, 0, 0, 1]);
        expected.extend([0, 0, 0, 5]);
        expected.extend(*b"argon");
        expected.push(EncodedType::UInt16.tag());
        // single initializer: one optional parameter-list, no outer suite
        expected.extend([1, 0, 0, 0, 1]);
        expected.extend([0, 0, 0, 5]);
        expected.extend(*b"lebal");
        expected.extend([0, 0, 0, 4]);
        expected.extend(*b"home");
        expected.push(EncodedType::Word8.tag());

        assert_eq!(roundtrip(typ), expected);
    }

    #[test]
    fn enum_type_carries_raw_type() {
        let typ = Type::Enum(EnumType {
            location: Location::Repl,
            qualified_identifier: "neon".to_owned(),
            raw_type: Box::new(Type::Never),
            fields: Some(vec![Field::new("argon", Type::UInt16)]),
            initializers: Some(vec![Some(vec![Parameter::new(
                "lebal",
                "home",
                Type::Word8,
            )])]),
        });

        let bytes = roundtrip(typ);
        assert_eq!(bytes[0], EncodedType::Enum.tag());
        // raw type sits between the qualified identifier and the fields
        assert_eq!(bytes[10], EncodedType::Never.tag());
    }

    #[test]
    fn nil_and_empty_lists_are_distinct() {
        let absent = Type::Struct(CompositeType {
            location: Location::Repl,
            qualified_identifier: "q".to_owned(),
            fields: None,
            initializers: None,
        });
        let empty = Type::Struct(CompositeType {
            location: Location::Repl,
            qualified_identifier: "q".to_owned(),
            fields: Some(Vec::new()),
            initializers: Some(Vec::new()),
        });
        let absent_bytes = roundtrip(absent);
        let empty_bytes = roundtrip(empty);
        assert_ne!(absent_bytes, empty_bytes);
        // nil list: lone is-nil marker; empty list: marker plus zero count
        assert_eq!(absent_bytes.len() + 8, empty_bytes.len());
    }

    #[test]
    fn nested_parameterized_types_roundtrip() {
        roundtrip(Type::Dictionary {
            key: Box::new(Type::String),
            value: Box::new(Type::VariableSizedArray(Box::new(Type::Optional(Some(
                Box::new(Type::Capability(Box::new(Type::Reference {
                    authorized: false,
                    referenced: Box::new(Type::AnyStruct),
                }))),
            ))))),
        });
    }

    #[test]
    fn meta_type_is_unsupported() {
        assert_eq!(
            encode_type(&Type::MetaType),
            Err(EncodeError::UnsupportedType("MetaType"))
        );
        let err = decode_type(None, &[EncodedType::MetaType.tag()]).unwrap_err();
        assert_eq!(err, DecodeError::UnsupportedType("MetaType"));
        assert_eq!(err.category(), ErrorCategory::Unsupported);
    }

    #[test]
    fn unknown_type_tags_are_corrupt() {
        let assigned: std::collections::HashSet<u8> =
            EncodedType::ALL.iter().map(|t| t.tag()).collect();
        for byte in 0..=u8::MAX {
            if assigned.contains(&byte) {
                continue;
            }
            let err = decode_type(None, &[byte]).unwrap_err();
            assert_eq!(
                err,
                DecodeError::Parse(ParseError::InvalidTag(TagError::new(byte, "EncodedType"))),
                "byte {:#04x}",
                byte
            );
            assert_eq!(err.category(), ErrorCategory::Corrupt);
        }
    }

    #[test]
    fn must_variants_panic_on_bad_input() {
        let bytes = must_encode_type(&Type::Bool);
        assert_eq!(must_decode_type(None, &bytes), Type::Bool);

        let result = std::panic::catch_unwind(|| must_decode_type(None, &[0xfe]));
        assert!(result.is_err());
    }

    #[test]
    fn truncated_composite_is_corrupt() {
        let bytes = encode_type(&Type::Struct(neon_composite())).unwrap();
        for cut in 1..bytes.len() {
            assert!(
                decode_type(None, &bytes[..cut]).is_err(),
                "prefix of {} bytes decoded successfully",
                cut
            );
        }
    }
}

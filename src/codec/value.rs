//! Runtime-value codec
//!
//! One tag byte, then the variant payload, recursing on children.
//! Variants that carry static type information (arrays, dictionaries,
//! composites) write it before their elements so that the decoder knows
//! arities and element shapes up front. Composite values embed the full
//! type *body* tag-free: the value tag already fixes the composite kind.

use crate::conv::target::Target;
use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::gauge::{MemoryKind, MemoryUsage};
use crate::parse::error::ParseError;
use crate::parse::Parser;
use crate::value::{KeyValuePair, Path, Value};

use num_bigint::BigInt;

use super::tags::EncodedValue;
use super::{Decoder, Encoder};

/// Approximate metering cost of a big integer: its magnitude width in
/// bytes.
fn bigint_byte_length(n: &BigInt) -> u64 {
    (n.bits() + 7) / 8
}

impl<U: Target> Encoder<U> {
    /// Serializes one value: its tag byte, then the payload its variant
    /// prescribes, in depth-first left-to-right order.
    pub fn encode_value(&mut self, value: &Value) -> EncodeResult<()> {
        match value {
            Value::Void => {
                self.put_value_tag(EncodedValue::Void);
                Ok(())
            }
            Value::Optional(inner) => {
                self.put_value_tag(EncodedValue::Optional);
                match inner {
                    None => {
                        self.put_bool(true);
                        Ok(())
                    }
                    Some(value) => {
                        self.put_bool(false);
                        self.encode_value(value)
                    }
                }
            }
            Value::Bool(b) => {
                self.put_value_tag(EncodedValue::Bool);
                self.put_bool(*b);
                Ok(())
            }
            Value::String(s) => {
                self.put_value_tag(EncodedValue::String);
                self.put_string(s)
            }
            Value::Bytes(bytes) => {
                self.put_value_tag(EncodedValue::Bytes);
                self.put_bytes(bytes)
            }
            Value::Character(c) => {
                self.put_value_tag(EncodedValue::Character);
                self.put_string(c)
            }
            Value::Address(addr) => {
                self.put_value_tag(EncodedValue::Address);
                self.put_address(*addr);
                Ok(())
            }

            Value::Int(n) => {
                self.put_value_tag(EncodedValue::Int);
                self.put_bigint(n)
            }
            Value::Int128(n) => {
                self.put_value_tag(EncodedValue::Int128);
                self.put_bigint(n)
            }
            Value::Int256(n) => {
                self.put_value_tag(EncodedValue::Int256);
                self.put_bigint(n)
            }
            Value::UInt(n) => {
                self.put_value_tag(EncodedValue::UInt);
                self.put_bigint(n)
            }
            Value::UInt128(n) => {
                self.put_value_tag(EncodedValue::UInt128);
                self.put_bigint(n)
            }
            Value::UInt256(n) => {
                self.put_value_tag(EncodedValue::UInt256);
                self.put_bigint(n)
            }

            Value::Int8(n) => {
                self.put_value_tag(EncodedValue::Int8);
                self.put_i8(*n);
                Ok(())
            }
            Value::Int16(n) => {
                self.put_value_tag(EncodedValue::Int16);
                self.put_i16(*n);
                Ok(())
            }
            Value::Int32(n) => {
                self.put_value_tag(EncodedValue::Int32);
                self.put_i32(*n);
                Ok(())
            }
            Value::Int64(n) => {
                self.put_value_tag(EncodedValue::Int64);
                self.put_i64(*n);
                Ok(())
            }
            Value::UInt8(n) => {
                self.put_value_tag(EncodedValue::UInt8);
                self.put_u8(*n);
                Ok(())
            }
            Value::UInt16(n) => {
                self.put_value_tag(EncodedValue::UInt16);
                self.put_u16(*n);
                Ok(())
            }
            Value::UInt32(n) => {
                self.put_value_tag(EncodedValue::UInt32);
                self.put_u32(*n);
                Ok(())
            }
            Value::UInt64(n) => {
                self.put_value_tag(EncodedValue::UInt64);
                self.put_u64(*n);
                Ok(())
            }
            Value::Word8(n) => {
                self.put_value_tag(EncodedValue::Word8);
                self.put_u8(*n);
                Ok(())
            }
            Value::Word16(n) => {
                self.put_value_tag(EncodedValue::Word16);
                self.put_u16(*n);
                Ok(())
            }
            Value::Word32(n) => {
                self.put_value_tag(EncodedValue::Word32);
                self.put_u32(*n);
                Ok(())
            }
            Value::Word64(n) => {
                self.put_value_tag(EncodedValue::Word64);
                self.put_u64(*n);
                Ok(())
            }
            Value::Fix64(n) => {
                self.put_value_tag(EncodedValue::Fix64);
                self.put_i64(*n);
                Ok(())
            }
            Value::UFix64(n) => {
                self.put_value_tag(EncodedValue::UFix64);
                self.put_u64(*n);
                Ok(())
            }

            Value::VariableArray {
                element_type,
                elements,
            } => {
                self.put_value_tag(EncodedValue::VariableArray);
                self.encode_type(element_type)?;
                self.put_length(elements.len())?;
                for element in elements {
                    self.encode_value(element)?;
                }
                Ok(())
            }
            Value::ConstantArray {
                element_type,
                size,
                elements,
            } => {
                if elements.len() != *size as usize {
                    return Err(EncodeError::ConstantArraySizeMismatch {
                        size: *size,
                        actual: elements.len(),
                    });
                }
                self.put_value_tag(EncodedValue::ConstantArray);
                self.encode_type(element_type)?;
                self.put_u32(*size);
                for element in elements {
                    self.encode_value(element)?;
                }
                Ok(())
            }
            Value::Dictionary {
                key_type,
                value_type,
                pairs,
            } => {
                self.put_value_tag(EncodedValue::Dictionary);
                self.encode_type(key_type)?;
                self.encode_type(value_type)?;
                self.put_length(pairs.len())?;
                for pair in pairs {
                    self.encode_value(&pair.key)?;
                    self.encode_value(&pair.value)?;
                }
                Ok(())
            }

            Value::Struct { typ, fields } => {
                check_encode_arity(typ.field_count(), fields.as_deref())?;
                self.put_value_tag(EncodedValue::Struct);
                self.encode_composite_body(typ)?;
                self.encode_field_values(fields.as_deref())
            }
            Value::Resource { typ, fields } => {
                check_encode_arity(typ.field_count(), fields.as_deref())?;
                self.put_value_tag(EncodedValue::Resource);
                self.encode_composite_body(typ)?;
                self.encode_field_values(fields.as_deref())
            }
            Value::Contract { typ, fields } => {
                check_encode_arity(typ.field_count(), fields.as_deref())?;
                self.put_value_tag(EncodedValue::Contract);
                self.encode_composite_body(typ)?;
                self.encode_field_values(fields.as_deref())
            }
            Value::Event { typ, fields } => {
                check_encode_arity(typ.field_count(), fields.as_deref())?;
                self.put_value_tag(EncodedValue::Event);
                self.encode_event_body(typ)?;
                self.encode_field_values(fields.as_deref())
            }
            Value::Enum { typ, fields } => {
                check_encode_arity(typ.field_count(), fields.as_deref())?;
                self.put_value_tag(EncodedValue::Enum);
                self.encode_enum_body(typ)?;
                self.encode_field_values(fields.as_deref())
            }

            Value::Link {
                target_path,
                borrow_type,
            } => {
                self.put_value_tag(EncodedValue::Link);
                self.encode_path(target_path)?;
                self.put_string(borrow_type)
            }
            Value::Path(path) => {
                self.put_value_tag(EncodedValue::Path);
                self.encode_path(path)
            }
            Value::Capability {
                path,
                address,
                borrow_type,
            } => {
                self.put_value_tag(EncodedValue::Capability);
                self.encode_path(path)?;
                self.put_address(*address);
                self.encode_type(borrow_type)
            }
        }
    }

    #[inline]
    fn put_value_tag(&mut self, tag: EncodedValue) {
        self.put_byte(tag.tag());
    }

    /// Paths appear tag-free inside link, path and capability values.
    fn encode_path(&mut self, path: &Path) -> EncodeResult<()> {
        self.put_string(&path.domain)?;
        self.put_string(&path.identifier)
    }

    fn encode_field_values(&mut self, fields: Option<&[Value]>) -> EncodeResult<()> {
        self.put_opt_list(fields, |enc, value| enc.encode_value(value))
    }
}

fn check_encode_arity(declared: Option<usize>, values: Option<&[Value]>) -> EncodeResult<()> {
    let declared = declared.unwrap_or(0);
    let actual = values.map(<[Value]>::len).unwrap_or(0);
    if declared != actual {
        return Err(EncodeError::FieldCountMismatch { declared, actual });
    }
    Ok(())
}

fn check_decode_arity(declared: Option<usize>, values: Option<&[Value]>) -> DecodeResult<()> {
    let declared = declared.unwrap_or(0);
    let actual = values.map(<[Value]>::len).unwrap_or(0);
    if declared != actual {
        return Err(DecodeError::FieldCountMismatch { declared, actual });
    }
    Ok(())
}

impl<'g, P: Parser> Decoder<'g, P> {
    /// Deserializes one value, dispatching on its tag byte.
    ///
    /// Variants that embed a static type decode it first, so that element
    /// counts and composite field arities are known before their children
    /// are read.
    pub fn decode_value(&mut self) -> DecodeResult<Value> {
        let byte = self.parser().take_u8()?;
        let tag = EncodedValue::try_from(byte).map_err(ParseError::InvalidTag)?;
        match tag {
            EncodedValue::Void => {
                self.meter(MemoryUsage::new(MemoryKind::Void, 1))?;
                Ok(Value::Void)
            }
            EncodedValue::Optional => {
                self.meter(MemoryUsage::new(MemoryKind::Optional, 1))?;
                if self.parser().take_bool()? {
                    Ok(Value::Optional(None))
                } else {
                    let inner = self.decode_value()?;
                    Ok(Value::Optional(Some(Box::new(inner))))
                }
            }
            EncodedValue::Bool => {
                self.meter(MemoryUsage::new(MemoryKind::Bool, 1))?;
                Ok(Value::Bool(self.parser().take_bool()?))
            }
            EncodedValue::String => {
                let s = self.parser().take_string()?;
                self.meter(MemoryUsage::new(MemoryKind::String, s.len() as u64))?;
                Ok(Value::String(s))
            }
            EncodedValue::Bytes => {
                let bytes = self.parser().take_bytes()?;
                self.meter(MemoryUsage::new(MemoryKind::Bytes, bytes.len() as u64))?;
                Ok(Value::Bytes(bytes))
            }
            EncodedValue::Character => {
                let c = self.parser().take_string()?;
                self.meter(MemoryUsage::new(MemoryKind::Character, c.len() as u64))?;
                Ok(Value::Character(c))
            }
            EncodedValue::Address => {
                self.meter(MemoryUsage::new(MemoryKind::Address, 1))?;
                Ok(Value::Address(self.parser().take_address()?))
            }

            EncodedValue::Int => Ok(Value::Int(self.take_metered_bigint()?)),
            EncodedValue::Int128 => Ok(Value::Int128(self.take_metered_bigint()?)),
            EncodedValue::Int256 => Ok(Value::Int256(self.take_metered_bigint()?)),
            EncodedValue::UInt => Ok(Value::UInt(self.take_metered_bigint()?)),
            EncodedValue::UInt128 => Ok(Value::UInt128(self.take_metered_bigint()?)),
            EncodedValue::UInt256 => Ok(Value::UInt256(self.take_metered_bigint()?)),

            EncodedValue::Int8 => {
                self.meter(MemoryUsage::new(MemoryKind::Number, 1))?;
                Ok(Value::Int8(self.parser().take_i8()?))
            }
            EncodedValue::Int16 => {
                self.meter(MemoryUsage::new(MemoryKind::Number, 2))?;
                Ok(Value::Int16(self.parser().take_i16()?))
            }
            EncodedValue::Int32 => {
                self.meter(MemoryUsage::new(MemoryKind::Number, 4))?;
                Ok(Value::Int32(self.parser().take_i32()?))
            }
            EncodedValue::Int64 => {
                self.meter(MemoryUsage::new(MemoryKind::Number, 8))?;
                Ok(Value::Int64(self.parser().take_i64()?))
            }
            EncodedValue::UInt8 => {
                self.meter(MemoryUsage::new(MemoryKind::Number, 1))?;
                Ok(Value::UInt8(self.parser().take_u8()?))
            }
            EncodedValue::UInt16 => {
                self.meter(MemoryUsage::new(MemoryKind::Number, 2))?;
                Ok(Value::UInt16(self.parser().take_u16()?))
            }
            EncodedValue::UInt32 => {
                self.meter(MemoryUsage::new(MemoryKind::Number, 4))?;
                Ok(Value::UInt32(self.parser().take_u32()?))
            }
            EncodedValue::UInt64 => {
                self.meter(MemoryUsage::new(MemoryKind::Number, 8))?;
                Ok(Value::UInt64(self.parser().take_u64()?))
            }
            EncodedValue::Word8 => {
                self.meter(MemoryUsage::new(MemoryKind::Number, 1))?;
                Ok(Value::Word8(self.parser().take_u8()?))
            }
            EncodedValue::Word16 => {
                self.meter(MemoryUsage::new(MemoryKind::Number, 2))?;
                Ok(Value::Word16(self.parser().take_u16()?))
            }
            EncodedValue::Word32 => {
                self.meter(MemoryUsage::new(MemoryKind::Number, 4))?;
                Ok(Value::Word32(self.parser().take_u32()?))
            }
            EncodedValue::Word64 => {
                self.meter(MemoryUsage::new(MemoryKind::Number, 8))?;
                Ok(Value::Word64(self.parser().take_u64()?))
            }
            EncodedValue::Fix64 => {
                self.meter(MemoryUsage::new(MemoryKind::Number, 8))?;
                Ok(Value::Fix64(self.parser().take_i64()?))
            }
            EncodedValue::UFix64 => {
                self.meter(MemoryUsage::new(MemoryKind::Number, 8))?;
                Ok(Value::UFix64(self.parser().take_u64()?))
            }

            EncodedValue::VariableArray => {
                let element_type = self.decode_type()?;
                let count = self.parser().take_length()?;
                self.meter(MemoryUsage::new(MemoryKind::Array, count as u64))?;
                let elements = self.decode_elements(count)?;
                Ok(Value::VariableArray {
                    element_type,
                    elements,
                })
            }
            EncodedValue::ConstantArray => {
                let element_type = self.decode_type()?;
                let size = self.parser().take_u32()?;
                self.meter(MemoryUsage::new(MemoryKind::Array, size as u64))?;
                let elements = self.decode_elements(size as usize)?;
                Ok(Value::ConstantArray {
                    element_type,
                    size,
                    elements,
                })
            }
            EncodedValue::Dictionary => {
                let key_type = self.decode_type()?;
                let value_type = self.decode_type()?;
                let count = self.parser().take_length()?;
                self.meter(MemoryUsage::new(MemoryKind::Dictionary, count as u64))?;
                let mut pairs = Vec::with_capacity(count.min(self.parser().remainder()));
                for _ in 0..count {
                    let key = self.decode_value()?;
                    let value = self.decode_value()?;
                    pairs.push(KeyValuePair { key, value });
                }
                Ok(Value::Dictionary {
                    key_type,
                    value_type,
                    pairs,
                })
            }

            EncodedValue::Struct => {
                let typ = self.decode_composite_body()?;
                let fields = self.decode_field_values()?;
                check_decode_arity(typ.field_count(), fields.as_deref())?;
                Ok(Value::Struct { typ, fields })
            }
            EncodedValue::Resource => {
                let typ = self.decode_composite_body()?;
                let fields = self.decode_field_values()?;
                check_decode_arity(typ.field_count(), fields.as_deref())?;
                Ok(Value::Resource { typ, fields })
            }
            EncodedValue::Contract => {
                let typ = self.decode_composite_body()?;
                let fields = self.decode_field_values()?;
                check_decode_arity(typ.field_count(), fields.as_deref())?;
                Ok(Value::Contract { typ, fields })
            }
            EncodedValue::Event => {
                let typ = self.decode_event_body()?;
                let fields = self.decode_field_values()?;
                check_decode_arity(typ.field_count(), fields.as_deref())?;
                Ok(Value::Event { typ, fields })
            }
            EncodedValue::Enum => {
                let typ = self.decode_enum_body()?;
                let fields = self.decode_field_values()?;
                check_decode_arity(typ.field_count(), fields.as_deref())?;
                Ok(Value::Enum { typ, fields })
            }

            EncodedValue::Link => {
                self.meter(MemoryUsage::new(MemoryKind::Link, 1))?;
                let target_path = self.decode_path()?;
                let borrow_type = self.parser().take_string()?;
                Ok(Value::Link {
                    target_path,
                    borrow_type,
                })
            }
            EncodedValue::Path => {
                self.meter(MemoryUsage::new(MemoryKind::Path, 1))?;
                Ok(Value::Path(self.decode_path()?))
            }
            EncodedValue::Capability => {
                self.meter(MemoryUsage::new(MemoryKind::Capability, 1))?;
                let path = self.decode_path()?;
                let address = self.parser().take_address()?;
                let borrow_type = self.decode_type()?;
                Ok(Value::Capability {
                    path,
                    address,
                    borrow_type,
                })
            }
        }
    }

    fn take_metered_bigint(&mut self) -> DecodeResult<BigInt> {
        let n = self.parser().take_bigint()?;
        self.meter(MemoryUsage::new(MemoryKind::BigInt, bigint_byte_length(&n)))?;
        Ok(n)
    }

    fn decode_path(&mut self) -> DecodeResult<Path> {
        let domain = self.parser().take_string()?;
        let identifier = self.parser().take_string()?;
        Ok(Path { domain, identifier })
    }

    fn decode_elements(&mut self, count: usize) -> DecodeResult<Vec<Value>> {
        let mut elements = Vec::with_capacity(count.min(self.parser().remainder()));
        for _ in 0..count {
            elements.push(self.decode_value()?);
        }
        Ok(elements)
    }

    fn decode_field_values(&mut self) -> DecodeResult<Option<Vec<Value>>> {
        self.take_opt_list(|dec| dec.decode_value())
    }
}

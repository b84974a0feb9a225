//! The static type taxonomy
//!
//! [`Type`] is the closed sum of every static type the wire grammar can
//! describe. Scalar variants carry no payload; parameterized variants
//! carry their sub-types inline (the grammar is a pure tree, so two
//! structurally identical sub-types decode as two separate allocations);
//! composite variants carry a full product of location, qualified
//! identifier, field list and initializer list(s).
//!
//! List-valued attributes are nullable on the wire: an absent list is
//! distinct from an empty one, which the model preserves with
//! `Option<Vec<_>>`.

use crate::location::Location;

/// One named field slot of a composite type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub identifier: String,
    pub typ: Type,
}

impl Field {
    pub fn new(identifier: impl Into<String>, typ: Type) -> Self {
        Self {
            identifier: identifier.into(),
            typ,
        }
    }
}

/// One slot of a function or initializer signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub label: String,
    pub identifier: String,
    pub typ: Type,
}

impl Parameter {
    pub fn new(label: impl Into<String>, identifier: impl Into<String>, typ: Type) -> Self {
        Self {
            label: label.into(),
            identifier: identifier.into(),
            typ,
        }
    }
}

/// The initializer suite of a general composite: a nullable list of
/// nullable parameter-lists.
pub type Initializers = Option<Vec<Option<Vec<Parameter>>>>;

/// Product type shared by struct, resource and contract declarations and
/// their interface counterparts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeType {
    pub location: Location,
    pub qualified_identifier: String,
    pub fields: Option<Vec<Field>>,
    pub initializers: Initializers,
}

impl CompositeType {
    /// Number of declared fields; `None` when the field list itself is
    /// absent (which is distinct from declaring zero fields).
    pub fn field_count(&self) -> Option<usize> {
        self.fields.as_ref().map(Vec::len)
    }
}

/// Event declarations carry a single initializer rather than a suite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventType {
    pub location: Location,
    pub qualified_identifier: String,
    pub fields: Option<Vec<Field>>,
    pub initializer: Option<Vec<Parameter>>,
}

impl EventType {
    pub fn field_count(&self) -> Option<usize> {
        self.fields.as_ref().map(Vec::len)
    }
}

/// Enum declarations additionally name the raw type their cases lower to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumType {
    pub location: Location,
    pub qualified_identifier: String,
    pub raw_type: Box<Type>,
    pub fields: Option<Vec<Field>>,
    pub initializers: Initializers,
}

impl EnumType {
    pub fn field_count(&self) -> Option<usize> {
        self.fields.as_ref().map(Vec::len)
    }
}

/// The closed sum of static types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    // Scalars
    Void,
    Never,
    Bool,
    String,
    Character,
    Bytes,
    Address,
    Number,
    SignedNumber,
    Integer,
    SignedInteger,
    FixedPoint,
    SignedFixedPoint,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    Int256,
    UInt,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    UInt256,
    Word8,
    Word16,
    Word32,
    Word64,
    Fix64,
    UFix64,
    Path,
    CapabilityPath,
    StoragePath,
    PublicPath,
    PrivatePath,
    AuthAccount,
    PublicAccount,
    DeployedContract,
    Any,
    AnyStruct,
    AnyResource,
    /// Present in the taxonomy but with no defined wire form; the codec
    /// refuses it in both directions.
    MetaType,

    // Parameterized
    Optional(Option<Box<Type>>),
    VariableSizedArray(Box<Type>),
    ConstantSizedArray {
        element: Box<Type>,
        size: u32,
    },
    Dictionary {
        key: Box<Type>,
        value: Box<Type>,
    },
    Reference {
        authorized: bool,
        referenced: Box<Type>,
    },
    Capability(Box<Type>),
    Function {
        type_id: String,
        parameters: Option<Vec<Parameter>>,
        return_type: Box<Type>,
    },
    Restricted {
        restricted: Box<Type>,
        restrictions: Option<Vec<Type>>,
    },

    // Composites
    Struct(CompositeType),
    Resource(CompositeType),
    Event(EventType),
    Contract(CompositeType),
    Enum(EnumType),
    StructInterface(CompositeType),
    ResourceInterface(CompositeType),
    ContractInterface(CompositeType),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn field_count_distinguishes_absent_from_empty() {
        let mut composite = CompositeType {
            location: Location::Repl,
            qualified_identifier: "Empty".to_owned(),
            fields: None,
            initializers: None,
        };
        assert_eq!(composite.field_count(), None);

        composite.fields = Some(Vec::new());
        assert_eq!(composite.field_count(), Some(0));
    }
}

//! Static field metadata: what each model field is called on the wire and
//! locally, and how its raw value is coerced.

use std::any::TypeId;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::Model;
use super::error::SchemaError;
use super::union::{Union, UnionDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    /// Integral JSON numbers only.
    Integer,
    /// Any JSON number.
    Float,
    Bool,
}

impl ScalarType {
    pub fn accepts(self, raw: &Value) -> bool {
        match self {
            Self::String => raw.is_string(),
            Self::Integer => raw.is_i64() || raw.is_u64(),
            Self::Float => raw.is_number(),
            Self::Bool => raw.is_boolean(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "number",
            Self::Bool => "boolean",
        }
    }
}

/// A closed set of wire strings.
///
/// Adding a value is a breaking change for strict decoding.
pub trait WireEnum: Sized + Copy + 'static {
    const NAME: &'static str;
    const VALUES: &'static [&'static str];

    fn as_wire(self) -> &'static str;
    fn from_wire(value: &str) -> Option<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: &'static str,
    pub values: &'static [&'static str],
}

impl EnumDescriptor {
    pub fn of<E: WireEnum>() -> Self {
        Self {
            name: E::NAME,
            values: E::VALUES,
        }
    }

    /// The declared wire value equal to `value`, if any.
    pub fn lookup(&self, value: &str) -> Option<&'static str> {
        self.values.iter().copied().find(|v| *v == value)
    }
}

/// Lazy handle to another model's schema.
///
/// Resolution goes through the registry, so self-referencing models work.
#[derive(Clone, Copy)]
pub struct ModelRef {
    name: &'static str,
    type_id: TypeId,
    schema: fn() -> Result<Arc<ModelSchema>, SchemaError>,
}

impl ModelRef {
    pub fn of<T: Model>() -> Self {
        Self {
            name: T::NAME,
            type_id: TypeId::of::<T>(),
            schema: T::schema,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn schema(&self) -> Result<Arc<ModelSchema>, SchemaError> {
        (self.schema)()
    }
}

impl PartialEq for ModelRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ModelRef {}

impl fmt::Debug for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelRef").field(&self.name).finish()
    }
}

/// Lazy handle to a union's descriptor.
#[derive(Clone, Copy)]
pub struct UnionRef {
    name: &'static str,
    type_id: TypeId,
    descriptor: fn() -> Result<Arc<UnionDescriptor>, SchemaError>,
}

impl UnionRef {
    pub fn of<U: Union>() -> Self {
        Self {
            name: U::NAME,
            type_id: TypeId::of::<U>(),
            descriptor: U::descriptor,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn descriptor(&self) -> Result<Arc<UnionDescriptor>, SchemaError> {
        (self.descriptor)()
    }
}

impl PartialEq for UnionRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for UnionRef {}

impl fmt::Debug for UnionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UnionRef").field(&self.name).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar(ScalarType),
    Date,
    Enum(EnumDescriptor),
    NestedModel(ModelRef),
    Variant(UnionRef),
    ListOfScalar(ScalarType),
    ListOfModel(ModelRef),
    ListOfVariant(UnionRef),
    /// Free-form object; values are passed through unvalidated.
    MapOfMixed,
}

impl FieldKind {
    pub fn string() -> Self {
        Self::Scalar(ScalarType::String)
    }

    pub fn integer() -> Self {
        Self::Scalar(ScalarType::Integer)
    }

    pub fn float() -> Self {
        Self::Scalar(ScalarType::Float)
    }

    pub fn boolean() -> Self {
        Self::Scalar(ScalarType::Bool)
    }

    pub fn enumeration<E: WireEnum>() -> Self {
        Self::Enum(EnumDescriptor::of::<E>())
    }

    pub fn model<T: Model>() -> Self {
        Self::NestedModel(ModelRef::of::<T>())
    }

    pub fn model_list<T: Model>() -> Self {
        Self::ListOfModel(ModelRef::of::<T>())
    }

    pub fn string_list() -> Self {
        Self::ListOfScalar(ScalarType::String)
    }

    pub fn variant<U: Union>() -> Self {
        Self::Variant(UnionRef::of::<U>())
    }

    pub fn variant_list<U: Union>() -> Self {
        Self::ListOfVariant(UnionRef::of::<U>())
    }

    /// Kind of each element for list kinds.
    pub fn element(self) -> Option<Self> {
        match self {
            Self::ListOfScalar(scalar) => Some(Self::Scalar(scalar)),
            Self::ListOfModel(model) => Some(Self::NestedModel(model)),
            Self::ListOfVariant(union) => Some(Self::Variant(union)),
            _ => None,
        }
    }

    /// Human-readable expectation used in type mismatch errors.
    pub fn expected(self) -> String {
        match self {
            Self::Scalar(scalar) => scalar.name().to_owned(),
            Self::Date => "date-time string".to_owned(),
            Self::Enum(e) => format!("{} string", e.name),
            Self::NestedModel(model) => format!("{} object", model.name()),
            Self::Variant(union) => format!("{} object", union.name()),
            Self::ListOfScalar(scalar) => format!("list of {}", scalar.name()),
            Self::ListOfModel(model) => format!("list of {}", model.name()),
            Self::ListOfVariant(union) => format!("list of {}", union.name()),
            Self::MapOfMixed => "object".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub local_name: &'static str,
    pub wire_name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
}

impl FieldDescriptor {
    pub fn required(local_name: &'static str, wire_name: &'static str, kind: FieldKind) -> Self {
        Self {
            local_name,
            wire_name,
            kind,
            required: true,
            nullable: false,
        }
    }

    pub fn optional(local_name: &'static str, wire_name: &'static str, kind: FieldKind) -> Self {
        Self {
            local_name,
            wire_name,
            kind,
            required: false,
            nullable: false,
        }
    }

    /// Allow an explicit `null` even when the field is required.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Whether an unset or null value makes the owning model incomplete.
    pub fn must_be_present(&self) -> bool {
        self.required && !self.nullable
    }
}

/// The validated, ordered descriptor set of one model type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    name: &'static str,
    /// Set for schemas registered for a Rust type; names alone may collide.
    type_id: Option<TypeId>,
    fields: Vec<FieldDescriptor>,
}

impl ModelSchema {
    pub fn new(name: &'static str, fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        let mut wire_names = HashSet::with_capacity(fields.len());
        let mut local_names = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !wire_names.insert(field.wire_name) {
                return Err(SchemaError::DuplicateWireName {
                    model: name,
                    wire_name: field.wire_name,
                });
            }
            if !local_names.insert(field.local_name) {
                return Err(SchemaError::DuplicateLocalName {
                    model: name,
                    local_name: field.local_name,
                });
            }
        }
        Ok(Self {
            name,
            type_id: None,
            fields,
        })
    }

    /// The schema of model type `T`, tied to that type's identity.
    pub fn of<T: Model>() -> Result<Self, SchemaError> {
        let schema = Self::new(T::NAME, T::describe())?;
        Ok(Self {
            type_id: Some(TypeId::of::<T>()),
            ..schema
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }

    /// Whether this is the registered schema of the model `model` points at.
    pub fn describes(&self, model: &ModelRef) -> bool {
        self.type_id == Some(model.type_id())
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, local_name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.local_name == local_name)
    }

    pub fn field_by_wire(&self, wire_name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.wire_name == wire_name)
    }
}

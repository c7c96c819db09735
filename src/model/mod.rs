//! Typed model layer: descriptors, the schema registry, coercion between JSON
//! payloads and model instances, and union resolution.
//!
//! Every DTO is a thin newtype over [`ModelInstance`] that implements [`Model`].

use std::sync::Arc;

use serde_json::Value;

pub mod coerce;
mod descriptor;
mod error;
mod instance;
mod macros;
pub mod registry;
pub mod union;
mod value;

pub use descriptor::{
    EnumDescriptor, FieldDescriptor, FieldKind, ModelRef, ModelSchema, ScalarType, UnionRef,
    WireEnum,
};
pub use error::{
    CoercionError, FieldError, FieldErrorKind, FieldPath, ModelError, NoMatchingVariantError,
    PathSegment, SchemaError, VariantAttempt,
};
pub use instance::ModelInstance;
pub(crate) use macros::{sdk_model, sdk_union, wire_enum};
pub use union::{
    Resolution, ResolvedVariant, Union, UnionDescriptor, UnionDescriptorBuilder,
    VariantDescriptor,
};
pub use value::{FieldValue, WireDateTime};

/// A model type with a fixed descriptor set.
pub trait Model: Sized + 'static {
    /// Model name used in errors and registry logs.
    const NAME: &'static str;

    /// Field descriptors in wire order.
    fn describe() -> Vec<FieldDescriptor>;

    fn from_instance(instance: ModelInstance) -> Self;
    fn instance(&self) -> &ModelInstance;
    fn instance_mut(&mut self) -> &mut ModelInstance;
    fn into_instance(self) -> ModelInstance;

    /// The registered schema, computed on first use.
    fn schema() -> Result<Arc<ModelSchema>, SchemaError> {
        registry::model_schema::<Self>()
    }

    /// An instance with no fields set, for incremental construction.
    fn empty() -> Result<Self, SchemaError> {
        Ok(Self::from_instance(ModelInstance::empty(Self::schema()?)))
    }

    fn parse(payload: &Value) -> Result<Self, ModelError> {
        coerce::decode(&Self::schema()?, payload).map(Self::from_instance)
    }

    fn parse_str(payload: &str) -> Result<Self, ModelError> {
        let value: Value = serde_json::from_str(payload)?;
        Self::parse(&value)
    }

    fn to_payload(&self) -> Result<Value, ModelError> {
        coerce::encode(self.instance())
    }

    /// Report every missing required field, recursively.
    fn validate(&self) -> Result<(), ModelError> {
        self.instance().validate()
    }
}

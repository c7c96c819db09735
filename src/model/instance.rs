use std::collections::BTreeMap;
use std::sync::Arc;

use serde::ser::Error as SerError;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::Model;
use super::coerce;
use super::descriptor::{ModelSchema, WireEnum};
use super::error::{CoercionError, FieldError, FieldErrorKind, FieldPath, ModelError};
use super::union::Union;
use super::value::{FieldValue, WireDateTime};

/// Field values of one model, keyed by local name, plus any wire keys the
/// schema does not describe.
///
/// Instances may be incomplete while they are being assembled; required fields
/// are only enforced by [`ModelInstance::validate`] and encoding.
#[derive(Debug, Clone)]
pub struct ModelInstance {
    schema: Arc<ModelSchema>,
    values: BTreeMap<&'static str, FieldValue>,
    extra: Map<String, Value>,
}

impl ModelInstance {
    /// An instance with no fields set.
    pub fn empty(schema: Arc<ModelSchema>) -> Self {
        Self {
            schema,
            values: BTreeMap::new(),
            extra: Map::new(),
        }
    }

    pub(crate) fn from_parts(
        schema: Arc<ModelSchema>,
        values: BTreeMap<&'static str, FieldValue>,
        extra: Map<String, Value>,
    ) -> Self {
        Self {
            schema,
            values,
            extra,
        }
    }

    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    pub fn get(&self, local_name: &str) -> Option<&FieldValue> {
        self.values.get(local_name)
    }

    pub fn is_set(&self, local_name: &str) -> bool {
        self.values.contains_key(local_name)
    }

    /// Wire keys seen at decode time that no descriptor matched.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Set a field after checking the value's shape against its descriptor.
    pub fn set(
        &mut self,
        local_name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), FieldError> {
        let descriptor = self
            .schema
            .field(local_name)
            .ok_or_else(|| self.unknown_field(local_name))?;
        let value = value.into();
        if !value.fits(descriptor.kind) {
            return Err(FieldError::new(
                FieldPath::root().key(descriptor.wire_name),
                FieldErrorKind::TypeMismatch {
                    expected: descriptor.kind.expected(),
                    found: value.describe(),
                },
            ));
        }
        self.values.insert(descriptor.local_name, value);
        Ok(())
    }

    /// Set a field from a raw wire value, running the full field coercion.
    ///
    /// A raw `null` is stored as [`FieldValue::Null`]; whether the field may be
    /// null is checked by [`ModelInstance::validate`], as for [`ModelInstance::set`].
    pub fn set_raw(&mut self, local_name: &str, raw: &Value) -> Result<(), ModelError> {
        let descriptor = *self
            .schema
            .field(local_name)
            .ok_or_else(|| self.coercion_error(vec![self.unknown_field(local_name)]))?;
        if raw.is_null() {
            self.values.insert(descriptor.local_name, FieldValue::Null);
            return Ok(());
        }

        let mut failures = Vec::new();
        let path = FieldPath::root().key(descriptor.wire_name);
        match coerce::decode_field(self.schema.name(), &descriptor, raw, &path, &mut failures)? {
            Some(value) if failures.is_empty() => {
                self.values.insert(descriptor.local_name, value);
                Ok(())
            }
            _ => Err(self.coercion_error(failures).into()),
        }
    }

    /// Set a polymorphic field from a typed union value.
    pub fn set_variant<U: Union>(
        &mut self,
        local_name: &str,
        value: U,
    ) -> Result<(), ModelError> {
        let resolved = value.into_resolved()?;
        self.set(local_name, FieldValue::Variant(resolved))
            .map_err(|err| self.coercion_error(vec![err]).into())
    }

    /// Set a list of polymorphic records from typed union values, keeping their order.
    pub fn set_variants<U: Union>(
        &mut self,
        local_name: &str,
        values: Vec<U>,
    ) -> Result<(), ModelError> {
        let items = values
            .into_iter()
            .map(|v| v.into_resolved().map(FieldValue::Variant))
            .collect::<Result<Vec<_>, _>>()?;
        self.set(local_name, FieldValue::List(items))
            .map_err(|err| self.coercion_error(vec![err]).into())
    }

    /// Clear a field, returning its previous value.
    pub fn unset(&mut self, local_name: &str) -> Option<FieldValue> {
        self.values.remove(local_name)
    }

    /// Report every required field that is unset or null, recursively.
    pub fn validate(&self) -> Result<(), ModelError> {
        coerce::encode(self).map(drop)
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn to_payload(&self) -> Result<Value, ModelError> {
        coerce::encode(self)
    }

    // Typed setters hand over values whose shape is fixed by their Rust type.
    pub(crate) fn put(&mut self, local_name: &'static str, value: impl Into<FieldValue>) {
        debug_assert!(
            self.schema.field(local_name).is_some(),
            "{} has no field {local_name}",
            self.schema.name()
        );
        self.values.insert(local_name, value.into());
    }

    pub(crate) fn put_enum<E: WireEnum>(&mut self, local_name: &'static str, value: E) {
        self.put(local_name, FieldValue::enumeration(value));
    }

    pub(crate) fn put_model<T: Model>(&mut self, local_name: &'static str, value: T) {
        self.put(local_name, FieldValue::Model(value.into_instance()));
    }

    pub(crate) fn put_models<T: Model>(&mut self, local_name: &'static str, values: Vec<T>) {
        let items = values
            .into_iter()
            .map(|v| FieldValue::Model(v.into_instance()))
            .collect();
        self.put(local_name, FieldValue::List(items));
    }

    pub fn get_str(&self, local_name: &str) -> Option<&str> {
        self.get(local_name).and_then(FieldValue::as_str)
    }

    pub fn get_i64(&self, local_name: &str) -> Option<i64> {
        self.get(local_name).and_then(FieldValue::as_i64)
    }

    pub fn get_f64(&self, local_name: &str) -> Option<f64> {
        self.get(local_name).and_then(FieldValue::as_f64)
    }

    pub fn get_bool(&self, local_name: &str) -> Option<bool> {
        self.get(local_name).and_then(FieldValue::as_bool)
    }

    pub fn get_date(&self, local_name: &str) -> Option<&WireDateTime> {
        self.get(local_name).and_then(FieldValue::as_date)
    }

    pub fn get_map(&self, local_name: &str) -> Option<&Map<String, Value>> {
        self.get(local_name).and_then(FieldValue::as_map)
    }

    pub fn get_enum<E: WireEnum>(&self, local_name: &str) -> Option<E> {
        self.get_str(local_name).and_then(E::from_wire)
    }

    pub fn get_strs(&self, local_name: &str) -> Option<Vec<&str>> {
        self.get(local_name)
            .and_then(FieldValue::as_list)
            .map(|items| items.iter().filter_map(FieldValue::as_str).collect())
    }

    pub fn get_model<T: Model>(&self, local_name: &str) -> Option<T> {
        self.get(local_name)
            .and_then(FieldValue::as_model)
            .map(|m| T::from_instance(m.clone()))
    }

    pub fn get_models<T: Model>(&self, local_name: &str) -> Option<Vec<T>> {
        self.get(local_name).and_then(FieldValue::as_list).map(|items| {
            items
                .iter()
                .filter_map(FieldValue::as_model)
                .map(|m| T::from_instance(m.clone()))
                .collect()
        })
    }

    pub fn get_variant<U: Union>(&self, local_name: &str) -> Option<U> {
        self.get(local_name)
            .and_then(FieldValue::as_variant)
            .and_then(|v| U::from_resolved(v.clone()))
    }

    pub fn get_variants<U: Union>(&self, local_name: &str) -> Option<Vec<U>> {
        self.get(local_name).and_then(FieldValue::as_list).map(|items| {
            items
                .iter()
                .filter_map(FieldValue::as_variant)
                .filter_map(|v| U::from_resolved(v.clone()))
                .collect()
        })
    }

    fn unknown_field(&self, local_name: &str) -> FieldError {
        FieldError::new(
            FieldPath::root().key(local_name),
            FieldErrorKind::UnknownField {
                model: self.schema.name(),
                name: local_name.to_owned(),
            },
        )
    }

    fn coercion_error(&self, failures: Vec<FieldError>) -> CoercionError {
        CoercionError::new(self.schema.name(), failures)
    }
}

impl PartialEq for ModelInstance {
    fn eq(&self, other: &Self) -> bool {
        self.schema.type_id() == other.schema.type_id()
            && self.schema.name() == other.schema.name()
            && self.values == other.values
            && self.extra == other.extra
    }
}

impl Serialize for ModelInstance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        coerce::encode(self)
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

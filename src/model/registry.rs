//! Process-wide cache of model schemas and union descriptors.
//!
//! Entries are computed on first access per type and never invalidated. Two
//! callers racing on an unseen type may both compute it; the first insert wins
//! and both get the same `Arc` back.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use super::Model;
use super::descriptor::ModelSchema;
use super::error::SchemaError;
use super::union::{Union, UnionDescriptor};

type Cache<T> = LazyLock<RwLock<HashMap<TypeId, Arc<T>>>>;

static MODELS: Cache<ModelSchema> = LazyLock::new(|| RwLock::new(HashMap::new()));
static UNIONS: Cache<UnionDescriptor> = LazyLock::new(|| RwLock::new(HashMap::new()));

/// Schema of `T`, computed once per process.
pub fn model_schema<T: Model>() -> Result<Arc<ModelSchema>, SchemaError> {
    let key = TypeId::of::<T>();
    if let Some(found) = lookup(&MODELS, key) {
        return Ok(found);
    }

    let schema = Arc::new(ModelSchema::of::<T>()?);
    let stored = store(&MODELS, key, schema);
    tracing::debug!(
        model = T::NAME,
        fields = stored.fields().len(),
        "registered model schema"
    );
    Ok(stored)
}

/// Descriptor of union `U`, validated and computed once per process.
pub fn union_descriptor<U: Union>() -> Result<Arc<UnionDescriptor>, SchemaError> {
    let key = TypeId::of::<U>();
    if let Some(found) = lookup(&UNIONS, key) {
        return Ok(found);
    }

    let builder = UnionDescriptor::builder(U::NAME).owned_by(TypeId::of::<U>());
    let descriptor = U::describe(builder).build()?;
    let stored = store(&UNIONS, key, Arc::new(descriptor));
    tracing::debug!(
        union = U::NAME,
        variants = stored.variants().len(),
        discriminator = ?stored.discriminator(),
        "registered union descriptor"
    );
    Ok(stored)
}

// Entries are pure functions of their type, so a poisoned lock still holds valid data.
fn lookup<T>(cache: &Cache<T>, key: TypeId) -> Option<Arc<T>> {
    cache
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
        .cloned()
}

fn store<T>(cache: &Cache<T>, key: TypeId, value: Arc<T>) -> Arc<T> {
    let mut guard = cache.write().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(guard.entry(key).or_insert(value))
}

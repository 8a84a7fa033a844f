//! Process-wide cache of resolved type schemas.
//!
//! A [`TypeSchema`] is immutable once built, so every hydrator of the same
//! type can share a single instance. The cache is keyed by [`TypeId`] and is
//! thread-safe.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::debug;

use crate::error::Result;
use crate::schema::{Hydratable, TypeSchema};

type CachedSchema = Arc<dyn Any + Send + Sync>;

/// Thread-safe map from a hydratable type to its resolved schema.
#[derive(Debug, Default)]
pub struct SchemaCache {
    schemas: RwLock<HashMap<TypeId, CachedSchema>>,
}

static GLOBAL_CACHE: OnceLock<SchemaCache> = OnceLock::new();

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cache shared by all hydrators in the process.
    pub fn global() -> &'static SchemaCache {
        GLOBAL_CACHE.get_or_init(SchemaCache::new)
    }

    /// Returns the cached schema for `T`, building it on first use.
    ///
    /// A failed build is not cached; the error is returned to every caller
    /// until the type's schema becomes valid.
    pub fn get_or_build<T: Hydratable>(&self) -> Result<Arc<TypeSchema<T>>> {
        if let Some(schema) = self.get::<T>() {
            return Ok(schema);
        }

        let built: Arc<TypeSchema<T>> = Arc::new(T::schema()?);
        let mut schemas = self
            .schemas
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = schemas
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                debug!(type_name = built.type_name(), "cached type schema");
                let cached: CachedSchema = built.clone();
                cached
            })
            .clone();
        drop(schemas);

        // Another thread may have won the race; its schema is equivalent.
        Ok(entry.downcast::<TypeSchema<T>>().unwrap_or(built))
    }

    /// Returns the cached schema for `T` without building it.
    pub fn get<T: Hydratable>(&self) -> Option<Arc<TypeSchema<T>>> {
        let schemas = self
            .schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        schemas
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|schema| schema.downcast::<TypeSchema<T>>().ok())
    }

    pub fn len(&self) -> usize {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSchema;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Debug, Default)]
    struct Counted {
        value: u32,
    }

    impl Hydratable for Counted {
        fn schema() -> Result<TypeSchema<Self>> {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            TypeSchema::builder("Counted")
                .field(FieldSchema::new("value", |t: &mut Counted, v: u32| {
                    t.value = v;
                }))
                .build()
        }
    }

    #[derive(Debug, Default)]
    struct Shared {
        value: u32,
    }

    impl Hydratable for Shared {
        fn schema() -> Result<TypeSchema<Self>> {
            TypeSchema::builder("Shared")
                .field(FieldSchema::new("value", |t: &mut Shared, v: u32| {
                    t.value = v;
                }))
                .build()
        }
    }

    #[test]
    fn test_schema_is_built_once() {
        let cache = SchemaCache::new();
        assert!(cache.is_empty());
        assert!(cache.get::<Counted>().is_none());

        let first = cache.get_or_build::<Counted>().unwrap();
        let second = cache.get_or_build::<Counted>().unwrap();
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!(first.type_name(), "Counted");
    }

    #[test]
    fn test_schema_shared_across_threads() {
        let cache = SchemaCache::new();
        let schemas: Vec<Arc<TypeSchema<Shared>>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| cache.get_or_build::<Shared>().unwrap()))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });
        assert_eq!(cache.len(), 1);
        let cached = cache.get::<Shared>().unwrap();
        assert!(schemas.iter().all(|schema| Arc::ptr_eq(schema, &cached)));
    }
}

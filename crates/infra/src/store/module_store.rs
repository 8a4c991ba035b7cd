use std::sync::{Arc, RwLock};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record {0} already exists")]
    Duplicate(String),

    #[error("record {0} not found")]
    NotFound(String),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Keyed entity store (one per module: brands, price sets, ...).
///
/// `list` returns records in insertion order.
pub trait ModuleStore<K, V>: Send + Sync {
    fn insert(&self, key: K, value: V) -> Result<(), StoreError>;
    fn get(&self, key: &K) -> Result<Option<V>, StoreError>;
    /// Replace an existing record.
    fn update(&self, key: &K, value: V) -> Result<(), StoreError>;
    /// Remove a record, returning it.
    fn delete(&self, key: &K) -> Result<V, StoreError>;
    fn list(&self) -> Result<Vec<V>, StoreError>;
}

impl<K, V, S> ModuleStore<K, V> for Arc<S>
where
    S: ModuleStore<K, V> + ?Sized,
{
    fn insert(&self, key: K, value: V) -> Result<(), StoreError> {
        (**self).insert(key, value)
    }

    fn get(&self, key: &K) -> Result<Option<V>, StoreError> {
        (**self).get(key)
    }

    fn update(&self, key: &K, value: V) -> Result<(), StoreError> {
        (**self).update(key, value)
    }

    fn delete(&self, key: &K) -> Result<V, StoreError> {
        (**self).delete(key)
    }

    fn list(&self) -> Result<Vec<V>, StoreError> {
        (**self).list()
    }
}

/// In-memory store for tests/dev.
#[derive(Debug)]
pub struct InMemoryModuleStore<K, V> {
    inner: RwLock<Vec<(K, V)>>,
}

impl<K, V> InMemoryModuleStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }
}

impl<K, V> Default for InMemoryModuleStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ModuleStore<K, V> for InMemoryModuleStore<K, V>
where
    K: Clone + Eq + core::fmt::Display + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn insert(&self, key: K, value: V) -> Result<(), StoreError> {
        let mut records = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        if records.iter().any(|(k, _)| *k == key) {
            return Err(StoreError::Duplicate(key.to_string()));
        }
        records.push((key, value));
        Ok(())
    }

    fn get(&self, key: &K) -> Result<Option<V>, StoreError> {
        let records = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone()))
    }

    fn update(&self, key: &K, value: V) -> Result<(), StoreError> {
        let mut records = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let slot = records
            .iter_mut()
            .find(|(k, _)| k == key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        slot.1 = value;
        Ok(())
    }

    fn delete(&self, key: &K) -> Result<V, StoreError> {
        let mut records = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let index = records
            .iter()
            .position(|(k, _)| k == key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        Ok(records.remove(index).1)
    }

    fn list(&self) -> Result<Vec<V>, StoreError> {
        let records = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.iter().map(|(_, v)| v.clone()).collect())
    }
}

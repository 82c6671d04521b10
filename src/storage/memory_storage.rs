use crate::{
    error::{KanbanError, Result},
    storage::KeyValueStore,
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

/// In-process store, for hosts without durable storage and for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `value` under `key`
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        if let Ok(mut inner) = store.inner.lock() {
            inner.values.insert(key.to_string(), value.to_string());
        }
        store
    }

    /// Number of `set` calls served so far
    pub fn write_count(&self) -> usize {
        self.lock().map(|inner| inner.writes).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| KanbanError::StorageError("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.lock()?;
        inner.values.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }
}

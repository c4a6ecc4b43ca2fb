//! In-Memory Settings Storage

use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{SettingsStoragePort, StorageError, StoredValue};

/// 内存键值设置存储，进程退出即丢失
pub struct InMemorySettingsStorage {
    values: DashMap<String, StoredValue>,
}

impl InMemorySettingsStorage {
    pub fn new() -> Self {
        Self {
            values: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for InMemorySettingsStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStoragePort for InMemorySettingsStorage {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StorageError> {
        Ok(self.values.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: serde_json::Value) -> Result<StoredValue, StorageError> {
        let stored = StoredValue::new(value);
        self.values.insert(key.to_string(), stored.clone());
        tracing::debug!(key = %key, "Setting stored in memory");
        Ok(stored)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.values.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = InMemorySettingsStorage::new();
        assert!(storage.get("locale").unwrap().is_none());

        let stored = storage.set("locale", serde_json::json!("ar")).unwrap();
        assert_eq!(storage.get("locale").unwrap(), Some(stored));

        storage.remove("locale").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_clear() {
        let storage = InMemorySettingsStorage::new();
        storage.set("a", serde_json::json!(1)).unwrap();
        storage.set("b", serde_json::json!(2)).unwrap();
        storage.clear().unwrap();
        assert_eq!(storage.len(), 0);
    }
}

//! Sled-based Settings Storage
//!
//! 每个设置一条记录，键为 `setting:{key}`，值为 JSON 编码的 StoredValue

use sled::Db;
use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{SettingsStoragePort, StorageError, StoredValue};

const KEY_PREFIX: &str = "setting:";

/// Sled 设置存储配置
#[derive(Debug, Clone)]
pub struct SledSettingsConfig {
    /// 数据库路径
    pub db_path: String,
}

impl Default for SledSettingsConfig {
    fn default() -> Self {
        Self {
            db_path: "data/settings.sled".to_string(),
        }
    }
}

/// Sled 设置存储
pub struct SledSettingsStorage {
    db: Db,
}

impl SledSettingsStorage {
    pub fn new(config: &SledSettingsConfig) -> Result<Self, StorageError> {
        let db = sled::open(&config.db_path).map_err(|e| StorageError::Database(e.to_string()))?;

        tracing::info!(
            db_path = %config.db_path,
            entries = db.scan_prefix(KEY_PREFIX).count(),
            "SledSettingsStorage initialized"
        );

        Ok(Self { db })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let config = SledSettingsConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
        };
        Self::new(&config)
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn flush(&self) -> Result<(), StorageError> {
        self.db
            .flush()
            .map(|_| ())
            .map_err(|e| StorageError::Database(e.to_string()))
    }

    fn db_key(key: &str) -> String {
        format!("{}{}", KEY_PREFIX, key)
    }
}

impl SettingsStoragePort for SledSettingsStorage {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StorageError> {
        let Some(bytes) = self
            .db
            .get(Self::db_key(key))
            .map_err(|e| StorageError::Database(e.to_string()))?
        else {
            return Ok(None);
        };

        let stored = serde_json::from_slice(&bytes)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(Some(stored))
    }

    fn set(&self, key: &str, value: serde_json::Value) -> Result<StoredValue, StorageError> {
        let stored = StoredValue::new(value);
        let bytes = serde_json::to_vec(&stored).map_err(|e| StorageError::Serialization(e.to_string()))?;

        self.db
            .insert(Self::db_key(key), bytes)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        tracing::debug!(key = %key, "Setting persisted");
        Ok(stored)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.db
            .remove(Self::db_key(key))
            .map_err(|e| StorageError::Database(e.to_string()))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        for item in self.db.scan_prefix(KEY_PREFIX) {
            let (key, _) = item.map_err(|e| StorageError::Database(e.to_string()))?;
            self.db
                .remove(key)
                .map_err(|e| StorageError::Database(e.to_string()))?;
        }
        tracing::info!("Settings cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_get_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.sled");

        {
            let storage = SledSettingsStorage::open(&path).unwrap();
            storage
                .set("user-setting", serde_json::json!({"autoPlay": false}))
                .unwrap();
            storage.flush().unwrap();
        }

        let storage = SledSettingsStorage::open(&path).unwrap();
        let stored = storage.get("user-setting").unwrap().unwrap();
        assert_eq!(stored.value["autoPlay"], false);
    }

    #[test]
    fn test_remove_and_clear() {
        let dir = tempdir().unwrap();
        let storage = SledSettingsStorage::open(dir.path().join("settings.sled")).unwrap();

        storage.set("locale", serde_json::json!("en")).unwrap();
        storage.set("style-setting", serde_json::json!({})).unwrap();

        storage.remove("locale").unwrap();
        assert!(storage.get("locale").unwrap().is_none());

        storage.clear().unwrap();
        assert!(storage.get("style-setting").unwrap().is_none());
    }

    #[test]
    fn test_unreadable_record_is_serialization_error() {
        let dir = tempdir().unwrap();
        let storage = SledSettingsStorage::open(dir.path().join("settings.sled")).unwrap();
        storage.db.insert("setting:broken", b"not json".to_vec()).unwrap();

        assert!(matches!(
            storage.get("broken"),
            Err(StorageError::Serialization(_))
        ));
    }
}

//! Settings Storage Port - 键值设置持久化
//!
//! 具体实现在 infrastructure/memory（内存）与 infrastructure/persistence/sled 层

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// 存储项：JSON 值 + 写入时间
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredValue {
    pub value: serde_json::Value,
    pub date: DateTime<Utc>,
}

impl StoredValue {
    pub fn new(value: serde_json::Value) -> Self {
        Self {
            value,
            date: Utc::now(),
        }
    }
}

/// Settings Storage Port
///
/// `set` 覆盖同键旧值
pub trait SettingsStoragePort: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StorageError>;

    fn set(&self, key: &str, value: serde_json::Value) -> Result<StoredValue, StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    fn clear(&self) -> Result<(), StorageError>;
}

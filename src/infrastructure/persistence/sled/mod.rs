//! Sled 存储实现

mod settings_storage;

pub use settings_storage::{SledSettingsConfig, SledSettingsStorage};

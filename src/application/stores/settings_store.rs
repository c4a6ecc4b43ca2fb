//! Settings Store - 持久化的显示设置
//!
//! 首次读取时若存储中没有对应键，写入默认值

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{SettingsStoragePort, StoredValue};
use crate::domain::settings::{
    AudioPlayerSetting, StyleSetting, STYLE_SETTING_KEY, USER_SETTING_KEY, VERSES_PER_PAGE_OPTIONS,
};

pub struct SettingsStore {
    storage: Arc<dyn SettingsStoragePort>,
}

impl SettingsStore {
    pub fn new(storage: Arc<dyn SettingsStoragePort>) -> Self {
        Self { storage }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 确保两个设置键都已写入
    pub fn initialize(&self) -> Result<(), ApplicationError> {
        self.audio_player_setting()?;
        self.style_setting()?;
        Ok(())
    }

    pub fn audio_player_setting(&self) -> Result<AudioPlayerSetting, ApplicationError> {
        self.load_or_init(USER_SETTING_KEY)
    }

    pub fn set_audio_player_setting(&self, setting: &AudioPlayerSetting) -> Result<StoredValue, ApplicationError> {
        self.save(USER_SETTING_KEY, setting)
    }

    pub fn style_setting(&self) -> Result<StyleSetting, ApplicationError> {
        self.load_or_init(STYLE_SETTING_KEY)
    }

    pub fn set_style_setting(&self, setting: &StyleSetting) -> Result<StoredValue, ApplicationError> {
        self.save(STYLE_SETTING_KEY, setting)
    }

    pub fn verses_per_page_options(&self) -> &'static [u32] {
        &VERSES_PER_PAGE_OPTIONS
    }

    pub fn get(&self, key: &str) -> Result<Option<StoredValue>, ApplicationError> {
        Ok(self.storage.get(key)?)
    }

    pub fn remove(&self, key: &str) -> Result<(), ApplicationError> {
        Ok(self.storage.remove(key)?)
    }

    fn load_or_init<T>(&self, key: &str) -> Result<T, ApplicationError>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        if let Some(stored) = self.storage.get(key)? {
            match serde_json::from_value(stored.value) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Stored setting unreadable, resetting to default");
                }
            }
        }

        let value = T::default();
        self.save(key, &value)?;
        Ok(value)
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<StoredValue, ApplicationError> {
        let json = serde_json::to_value(value).map_err(|e| ApplicationError::internal(e.to_string()))?;
        let stored = self.storage.set(key, json)?;
        tracing::debug!(key = %key, "Setting saved");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemorySettingsStorage;

    fn store() -> (Arc<InMemorySettingsStorage>, SettingsStore) {
        let storage = Arc::new(InMemorySettingsStorage::new());
        (storage.clone(), SettingsStore::new(storage))
    }

    #[test]
    fn test_initialize_writes_defaults() {
        let (storage, store) = store();
        store.initialize().unwrap();

        let user = storage.get(USER_SETTING_KEY).unwrap().unwrap();
        assert_eq!(user.value["autoPlay"], true);
        assert!(storage.get(STYLE_SETTING_KEY).unwrap().is_some());
    }

    #[test]
    fn test_saved_setting_is_read_back() {
        let (_, store) = store();
        let setting = AudioPlayerSetting {
            tooltip: true,
            ..AudioPlayerSetting::default()
        };
        store.set_audio_player_setting(&setting).unwrap();
        assert_eq!(store.audio_player_setting().unwrap(), setting);
    }

    #[test]
    fn test_unreadable_value_resets_to_default() {
        let (storage, store) = store();
        storage
            .set(STYLE_SETTING_KEY, serde_json::json!({"quranFrontSize": "big"}))
            .unwrap();

        assert_eq!(store.style_setting().unwrap(), StyleSetting::default());
        let stored = storage.get(STYLE_SETTING_KEY).unwrap().unwrap();
        assert_eq!(stored.value["quranFrontSize"], 3);
    }

    #[test]
    fn test_per_page_options() {
        let (_, store) = store();
        assert_eq!(store.verses_per_page_options(), &[10, 20, 30, 40, 50]);
    }
}

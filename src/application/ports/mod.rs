//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod quran_api;
mod reference_data;
mod settings_storage;
mod translation_subscriber;

pub use quran_api::{
    QuranApiError, QuranApiPort, VersesPage, VersesQuery, KEY_VERSE_FIELDS, KEY_WORD_FIELDS,
    TRANSLATION_FIELDS, VERSE_FIELDS, WORD_FIELDS,
};
pub use reference_data::{ReferenceDataError, ReferenceDataPort};
pub use settings_storage::{SettingsStoragePort, StorageError, StoredValue};
pub use translation_subscriber::TranslationSubscriber;

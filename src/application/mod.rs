//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（QuranApi、ReferenceData、SettingsStorage、TranslationSubscriber）
//! - stores: 有状态的应用服务（容器存储、译本、播放器、加载遮罩、经注、设置）
//! - error: 应用层错误定义

pub mod error;
pub mod ports;
pub mod stores;

pub use error::ApplicationError;

pub use ports::{
    QuranApiError, QuranApiPort, ReferenceDataError, ReferenceDataPort, SettingsStoragePort,
    StorageError, StoredValue, TranslationSubscriber, VersesPage, VersesQuery,
};

pub use stores::{
    AudioPlayer, AudioRequest, ChapterStore, ContainerStore, JuzStore, LoadingOverlay, PageStore,
    PlaybackPhase, PlayerSnapshot, SettingsStore, TafsirStore, TranslationStore, VerseCache,
};

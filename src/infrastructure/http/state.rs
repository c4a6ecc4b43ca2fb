//! Application State
//!
//! 所有存储在 main 中构造一次，以 Arc 句柄共享给各个 handler

use std::sync::Arc;

use crate::application::stores::{
    AudioPlayer, ChapterStore, JuzStore, LoadingOverlay, PageStore, SettingsStore, TafsirStore,
    TranslationStore,
};
use crate::infrastructure::events::EventPublisher;

/// 应用状态
pub struct AppState {
    pub chapters: Arc<ChapterStore>,
    pub juzs: Arc<JuzStore>,
    pub pages: Arc<PageStore>,
    pub translations: Arc<TranslationStore>,
    pub player: Arc<AudioPlayer>,
    pub overlay: Arc<LoadingOverlay>,
    pub tafsirs: Arc<TafsirStore>,
    pub settings: Arc<SettingsStore>,
    pub event_publisher: Arc<EventPublisher>,
    /// 章简介等本地化接口使用的语言
    pub locale: String,
}

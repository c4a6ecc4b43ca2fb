//! Worker Layer - Background Task Processing
//!
//! 实现 TranslationWatcher，把译本选择变更分发给容器存储

mod translation_watcher;

pub use translation_watcher::TranslationWatcher;

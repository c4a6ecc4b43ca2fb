//! Application Stores - 有状态的应用服务
//!
//! 每个 store 在 main 中构造一次，以 `Arc` 句柄共享给 HTTP 层与后台 worker

mod audio_player;
mod container_store;
mod loading_overlay;
mod settings_store;
mod tafsir_store;
mod translation_store;
mod verse_cache;

pub use audio_player::{AudioPlayer, AudioRequest, PlaybackPhase, PlayerSnapshot};
pub use container_store::{
    CatalogEntry, ChapterStore, ContainerRecord, ContainerSnapshot, ContainerStore, JuzStore,
    PageStore, SortState,
};
pub use loading_overlay::LoadingOverlay;
pub use settings_store::SettingsStore;
pub use tafsir_store::TafsirStore;
pub use translation_store::TranslationStore;
pub use verse_cache::VerseCache;

#[cfg(test)]
pub(crate) use verse_cache::test_verse;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// 读锁；锁中毒时沿用内部数据（临界区内不会留下半更新状态）
pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// 加载标志守卫，离开作用域时复位
pub(crate) struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> LoadingGuard<'a> {
    pub(crate) fn new(flag: &'a AtomicBool, value: bool) -> Self {
        flag.store(value, Ordering::SeqCst);
        Self { flag }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_guard_resets_on_drop() {
        let flag = AtomicBool::new(false);
        {
            let _guard = LoadingGuard::new(&flag, true);
            assert!(flag.load(Ordering::SeqCst));
        }
        assert!(!flag.load(Ordering::SeqCst));
    }
}

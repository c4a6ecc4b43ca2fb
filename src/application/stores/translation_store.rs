//! Translation Store - 译本目录与当前译本选择
//!
//! 选择变更（含首次发布）通过 [`EventPublisher`] 广播 `TranslationsChanged`，
//! 由 watcher 驱动各容器缓存失效

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use super::{read, write, LoadingGuard};
use crate::application::error::ApplicationError;
use crate::application::ports::ReferenceDataPort;
use crate::domain::translation::{authors_label, group_by_language, Translation};
use crate::infrastructure::events::EventPublisher;

pub struct TranslationStore {
    reference: Arc<dyn ReferenceDataPort>,
    events: Arc<EventPublisher>,
    catalog: RwLock<Vec<Translation>>,
    selected_ids: RwLock<Vec<u32>>,
    /// 最近一次广播的选择串
    published: RwLock<Option<String>>,
    loading: AtomicBool,
}

impl TranslationStore {
    pub fn new(
        reference: Arc<dyn ReferenceDataPort>,
        events: Arc<EventPublisher>,
        default_ids: Vec<u32>,
    ) -> Self {
        Self {
            reference,
            events,
            catalog: RwLock::new(Vec::new()),
            selected_ids: RwLock::new(default_ids),
            published: RwLock::new(None),
            loading: AtomicBool::new(false),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 加载译本目录，已加载时直接返回
    pub async fn load(&self) -> Result<(), ApplicationError> {
        if !read(&self.catalog).is_empty() {
            return Ok(());
        }

        let _guard = LoadingGuard::new(&self.loading, true);
        let translations = self.reference.translations().await?;

        let mut catalog = write(&self.catalog);
        if catalog.is_empty() {
            tracing::info!(count = translations.len(), "Translations catalog loaded");
            *catalog = translations;
        }
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn list(&self) -> Vec<Translation> {
        read(&self.catalog).clone()
    }

    /// 按语言分组的目录
    pub fn grouped(&self) -> BTreeMap<String, Vec<Translation>> {
        group_by_language(&read(&self.catalog))
    }

    pub fn selected_ids(&self) -> Vec<u32> {
        read(&self.selected_ids).clone()
    }

    /// 逗号分隔的选择串，如 `131,20`
    pub fn ids_string(&self) -> String {
        read(&self.selected_ids)
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// 更新选择，选择串变化时广播；返回是否已广播
    pub fn set_selected(&self, ids: Vec<u32>) -> Result<bool, ApplicationError> {
        if ids.is_empty() {
            return Err(ApplicationError::validation("至少需要选择一个译本"));
        }
        *write(&self.selected_ids) = ids;
        Ok(self.announce())
    }

    /// 选择串与上次广播不同（或从未广播）时广播当前选择
    pub fn announce(&self) -> bool {
        let ids = self.ids_string();
        let mut published = write(&self.published);
        if published.as_deref() == Some(ids.as_str()) {
            return false;
        }
        *published = Some(ids.clone());
        drop(published);

        tracing::info!(translations = %ids, "Translation selection changed");
        self.events.publish_translations_changed(&ids);
        true
    }

    /// 当前选择中能在目录里找到的译本，保持选择顺序
    pub fn selected(&self) -> Vec<Translation> {
        let catalog = read(&self.catalog);
        self.selected_ids()
            .into_iter()
            .filter_map(|id| catalog.iter().find(|t| t.id == id).cloned())
            .collect()
    }

    pub fn authors(&self) -> Vec<String> {
        self.selected().into_iter().map(|t| t.author_name).collect()
    }

    /// `"A and N others"` 形式的署名
    pub fn authors_label(&self) -> Option<String> {
        authors_label(&self.authors())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::translation::sample_translation;
    use crate::infrastructure::memory::InMemoryReferenceData;
    use crate::infrastructure::events::QuranEvent;

    fn store(events: Arc<EventPublisher>) -> TranslationStore {
        let reference = InMemoryReferenceData::new().with_translations(vec![
            sample_translation(131, "Dr. Mustafa Khattab", "english"),
            sample_translation(20, "Saheeh International", "english"),
            sample_translation(79, "Abu Adel", "russian"),
        ]);
        TranslationStore::new(Arc::new(reference), events, vec![131])
    }

    #[test]
    fn test_ids_string_joins_with_commas() {
        let store = store(EventPublisher::new().arc());
        assert_eq!(store.ids_string(), "131");
        store.set_selected(vec![131, 20, 79]).unwrap();
        assert_eq!(store.ids_string(), "131,20,79");
    }

    #[test]
    fn test_publishes_only_on_change() {
        let events = EventPublisher::new().arc();
        let mut rx = events.subscribe();
        let store = store(events);

        assert!(store.announce());
        assert!(!store.announce());
        assert!(!store.set_selected(vec![131]).unwrap());
        assert!(store.set_selected(vec![131, 20]).unwrap());

        assert_eq!(
            rx.try_recv().unwrap(),
            QuranEvent::TranslationsChanged {
                ids: "131".to_string()
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            QuranEvent::TranslationsChanged {
                ids: "131,20".to_string()
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_reject_empty_selection() {
        let store = store(EventPublisher::new().arc());
        assert!(store.set_selected(Vec::new()).is_err());
        assert_eq!(store.ids_string(), "131");
    }

    #[tokio::test]
    async fn test_authors_label_follows_selection() {
        let store = store(EventPublisher::new().arc());
        store.load().await.unwrap();
        assert_eq!(store.list().len(), 3);
        assert_eq!(store.grouped()["english"].len(), 2);

        assert_eq!(store.authors_label().as_deref(), Some("Dr. Mustafa Khattab"));

        store.set_selected(vec![20, 131, 79, 999]).unwrap();
        assert_eq!(store.selected().len(), 3);
        assert_eq!(
            store.authors_label().as_deref(),
            Some("Saheeh International and 2 others")
        );
    }
}

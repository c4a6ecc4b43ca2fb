//! Container Store - 章 / 卷 / 页通用的容器存储
//!
//! 一个泛型实现，按 [`ContainerMeta`] 实例化三次：
//! - 目录：启动时从参考数据加载一次，容器记录此后不销毁
//! - 经文：按页增量拉取，按 verse_key 去重合并，分页游标整体替换
//! - 选择：当前所选容器指针，派生首末节与标题数据
//! - 失效：译本选择变更时清空经文并从第 1 页重新拉取所选容器

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, RwLock};

use super::{read, write, LoadingGuard, TranslationStore, VerseCache};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    QuranApiPort, ReferenceDataError, ReferenceDataPort, TranslationSubscriber, VersesQuery,
};
use crate::domain::audio::AudioDescriptor;
use crate::domain::container::{
    compare_by, group_by_chapter, Chapter, ChapterInfo, ChapterName, ChapterSection,
    ContainerMeta, HeaderData, Juz, Page, SortDirection,
};
use crate::domain::verse::{Pagination, Verse, VerseKey};
use crate::infrastructure::events::EventPublisher;

pub type ChapterStore = ContainerStore<Chapter>;
pub type JuzStore = ContainerStore<Juz>;
pub type PageStore = ContainerStore<Page>;

/// 可从参考数据加载目录的容器元数据
#[async_trait]
pub trait CatalogEntry: ContainerMeta {
    async fn fetch_catalog(reference: &dyn ReferenceDataPort) -> Result<Vec<Self>, ReferenceDataError>;
}

#[async_trait]
impl CatalogEntry for Chapter {
    async fn fetch_catalog(reference: &dyn ReferenceDataPort) -> Result<Vec<Self>, ReferenceDataError> {
        reference.chapters().await
    }
}

#[async_trait]
impl CatalogEntry for Juz {
    async fn fetch_catalog(reference: &dyn ReferenceDataPort) -> Result<Vec<Self>, ReferenceDataError> {
        reference.juzs().await
    }
}

#[async_trait]
impl CatalogEntry for Page {
    async fn fetch_catalog(reference: &dyn ReferenceDataPort) -> Result<Vec<Self>, ReferenceDataError> {
        reference.pages().await
    }
}

/// 容器记录
#[derive(Debug, Clone)]
pub struct ContainerRecord<M> {
    pub meta: M,
    pub cache: VerseCache,
    pub audio_file: Option<AudioDescriptor>,
}

impl<M> ContainerRecord<M> {
    fn new(meta: M) -> Self {
        Self {
            meta,
            cache: VerseCache::new(),
            audio_file: None,
        }
    }
}

/// 容器快照（对外只读视图）
#[derive(Debug, Clone, Serialize)]
pub struct ContainerSnapshot<M> {
    pub id: u32,
    pub meta: M,
    pub verses: Vec<Verse>,
    pub pagination: Option<Pagination>,
    pub audio_file: Option<AudioDescriptor>,
}

/// 目录排序状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub field: String,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: "id".to_string(),
            direction: SortDirection::Asc,
        }
    }
}

pub struct ContainerStore<M: CatalogEntry> {
    api: Arc<dyn QuranApiPort>,
    reference: Arc<dyn ReferenceDataPort>,
    translations: Arc<TranslationStore>,
    events: Arc<EventPublisher>,
    records: DashMap<u32, ContainerRecord<M>>,
    loaded: AtomicBool,
    catalog_loading: AtomicBool,
    verses_loading: AtomicBool,
    /// 加载占位条数
    loading_length: AtomicU32,
    /// 0 表示未选择
    selected: AtomicU32,
    per_page: AtomicU32,
    sort: RwLock<SortState>,
}

impl<M: CatalogEntry> ContainerStore<M> {
    pub fn new(
        api: Arc<dyn QuranApiPort>,
        reference: Arc<dyn ReferenceDataPort>,
        translations: Arc<TranslationStore>,
        events: Arc<EventPublisher>,
        per_page: u32,
    ) -> Self {
        Self {
            api,
            reference,
            translations,
            events,
            records: DashMap::new(),
            loaded: AtomicBool::new(false),
            catalog_loading: AtomicBool::new(false),
            verses_loading: AtomicBool::new(false),
            loading_length: AtomicU32::new(0),
            selected: AtomicU32::new(0),
            per_page: AtomicU32::new(per_page.max(1)),
            sort: RwLock::new(SortState::default()),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// 加载目录，已加载时直接返回
    pub async fn load(&self) -> Result<(), ApplicationError> {
        if self.is_loaded() {
            return Ok(());
        }

        let _guard = LoadingGuard::new(&self.catalog_loading, true);
        let entries = M::fetch_catalog(self.reference.as_ref()).await?;

        let mut inserted = 0;
        for meta in entries {
            if let Entry::Vacant(slot) = self.records.entry(meta.id()) {
                slot.insert(ContainerRecord::new(meta));
                inserted += 1;
            }
        }
        self.loaded.store(true, Ordering::SeqCst);

        tracing::info!(kind = %M::KIND, count = inserted, "Catalog loaded");
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    pub fn is_catalog_loading(&self) -> bool {
        self.catalog_loading.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 按当前排序状态列出目录；未知排序字段保持编号顺序
    pub fn list(&self) -> Vec<M> {
        let mut entries: Vec<M> = self.records.iter().map(|r| r.meta.clone()).collect();
        entries.sort_by_key(|meta| meta.id());

        let sort = read(&self.sort).clone();
        entries.sort_by(|a, b| compare_by(a, b, &sort.field, sort.direction));
        entries
    }

    pub fn search(&self, term: &str) -> Vec<M> {
        self.list()
            .into_iter()
            .filter(|meta| meta.matches(term))
            .collect()
    }

    /// 同一字段再次选择时切换方向，换字段时重置为升序
    pub fn sort(&self, field: &str) -> SortState {
        let mut sort = write(&self.sort);
        if sort.field == field {
            sort.direction = sort.direction.toggle();
        } else {
            sort.field = field.to_string();
            sort.direction = SortDirection::Asc;
        }
        sort.clone()
    }

    pub fn sort_state(&self) -> SortState {
        read(&self.sort).clone()
    }

    pub fn meta(&self, id: u32) -> Option<M> {
        self.records.get(&id).map(|r| r.meta.clone())
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// 设置所选容器，不触发拉取
    pub fn select(&self, id: u32) -> Result<(), ApplicationError> {
        if !self.records.contains_key(&id) {
            return Err(ApplicationError::not_found(M::KIND.as_str(), id));
        }
        self.selected.store(id, Ordering::SeqCst);
        Ok(())
    }

    pub fn clear_selection(&self) {
        self.selected.store(0, Ordering::SeqCst);
    }

    pub fn selected_id(&self) -> Option<u32> {
        match self.selected.load(Ordering::SeqCst) {
            0 => None,
            id => Some(id),
        }
    }

    pub fn snapshot(&self, id: u32) -> Option<ContainerSnapshot<M>> {
        self.records.get(&id).map(|record| ContainerSnapshot {
            id,
            meta: record.meta.clone(),
            verses: record.cache.verses().to_vec(),
            pagination: record.cache.pagination().cloned(),
            audio_file: record.audio_file.clone(),
        })
    }

    pub fn selected(&self) -> Option<ContainerSnapshot<M>> {
        self.snapshot(self.selected_id()?)
    }

    fn with_selected<R>(&self, f: impl FnOnce(&ContainerRecord<M>) -> R) -> Option<R> {
        let id = self.selected_id()?;
        self.records.get(&id).map(|record| f(record.value()))
    }

    pub fn first_verse(&self) -> Option<Verse> {
        self.with_selected(|record| record.cache.first().cloned())
            .flatten()
    }

    pub fn last_verse(&self) -> Option<Verse> {
        self.with_selected(|record| record.cache.last().cloned())
            .flatten()
    }

    /// 所选容器已缓存经文的键
    pub fn verse_keys(&self) -> Vec<String> {
        self.with_selected(|record| record.cache.keys())
            .unwrap_or_default()
    }

    /// 由所选容器首节经文推导标题数据
    pub fn header<F>(&self, chapter_name: F) -> Option<HeaderData>
    where
        F: FnOnce(u32) -> Option<ChapterName>,
    {
        let first = self.first_verse()?;
        Some(HeaderData::from_verse(&first, chapter_name))
    }

    // ========================================================================
    // Verses
    // ========================================================================

    pub fn per_page(&self) -> u32 {
        self.per_page.load(Ordering::SeqCst)
    }

    /// 修改每页条数，不会使已缓存经文失效
    pub fn set_per_page(&self, per_page: u32) -> Result<(), ApplicationError> {
        if per_page == 0 {
            return Err(ApplicationError::validation("per_page 必须大于 0"));
        }
        self.per_page.store(per_page, Ordering::SeqCst);
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        self.verses_loading.load(Ordering::SeqCst)
    }

    pub fn loading_length(&self) -> u32 {
        self.loading_length.load(Ordering::SeqCst)
    }

    pub fn verses(&self, id: u32) -> Vec<Verse> {
        self.records
            .get(&id)
            .map(|record| record.cache.verses().to_vec())
            .unwrap_or_default()
    }

    pub fn pagination(&self, id: u32) -> Option<Pagination> {
        self.records
            .get(&id)
            .and_then(|record| record.cache.pagination().cloned())
    }

    /// 拉取一页经文并合并到容器缓存
    ///
    /// - `id == 0` 时不做任何事
    /// - `page` 缺省为 1，`limit` 缺省为当前每页条数
    /// - 合并在响应返回后进行，乱序完成不会产生重复
    /// - 失败时已合并的数据保留，加载标志总会复位
    pub async fn fetch_page(
        &self,
        id: u32,
        force_loading: bool,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<(), ApplicationError> {
        if id == 0 {
            return Ok(());
        }
        if !self.records.contains_key(&id) {
            return Err(ApplicationError::not_found(M::KIND.as_str(), id));
        }

        let per_page = self.per_page();
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let limit = limit.filter(|l| *l > 0).unwrap_or(per_page);

        let _guard = LoadingGuard::new(&self.verses_loading, force_loading);
        self.loading_length.store(per_page, Ordering::SeqCst);

        let query = VersesQuery::new(self.translations.ids_string(), page, limit);
        tracing::debug!(
            kind = %M::KIND,
            container_id = id,
            page,
            per_page = limit,
            translations = %query.translations,
            "Fetching verses"
        );

        let response = self.api.verses(M::KIND, id, &query).await.map_err(|e| {
            tracing::warn!(kind = %M::KIND, container_id = id, page, error = %e, "Failed to fetch verses");
            e
        })?;

        let (added, total) = {
            let mut record = self
                .records
                .get_mut(&id)
                .ok_or_else(|| ApplicationError::not_found(M::KIND.as_str(), id))?;
            let added = record.cache.merge(response.verses);
            record.cache.replace_pagination(response.pagination);
            (added, record.cache.len())
        };

        tracing::debug!(kind = %M::KIND, container_id = id, page, added, total, "Verses merged");
        self.events
            .publish_verses_merged(M::KIND, id, page, added, total);
        Ok(())
    }

    /// 按经文键拉取单节并合并；id 为 0 或键为空时不做任何事
    pub async fn fetch_by_key(&self, id: u32, verse_key: &str) -> Result<(), ApplicationError> {
        let verse_key = verse_key.trim();
        if id == 0 || verse_key.is_empty() {
            return Ok(());
        }
        let key: VerseKey = verse_key.parse()?;
        if !self.records.contains_key(&id) {
            return Err(ApplicationError::not_found(M::KIND.as_str(), id));
        }

        let _guard = LoadingGuard::new(&self.verses_loading, true);
        self.loading_length.store(1, Ordering::SeqCst);

        let verse = self
            .api
            .verse_by_key(&key.to_string(), &self.translations.ids_string())
            .await?;

        let (added, total) = {
            let mut record = self
                .records
                .get_mut(&id)
                .ok_or_else(|| ApplicationError::not_found(M::KIND.as_str(), id))?;
            let added = record.cache.merge(std::iter::once(verse));
            (added, record.cache.len())
        };

        tracing::debug!(kind = %M::KIND, container_id = id, verse_key = %key, added, "Verse merged by key");
        // page 0 表示按键拉取
        self.events
            .publish_verses_merged(M::KIND, id, 0, added, total);
        Ok(())
    }

    /// 清空所有容器的经文，返回被清空的容器编号
    fn clear_all_verses(&self) -> Vec<u32> {
        let mut cleared = Vec::new();
        for mut record in self.records.iter_mut() {
            if !record.cache.is_empty() {
                record.cache.clear();
                cleared.push(*record.key());
            }
        }
        cleared.sort_unstable();
        cleared
    }

    // ========================================================================
    // Audio
    // ========================================================================

    /// 在容器记录上挂载最近一次的音频描述
    pub fn attach_audio(&self, id: u32, descriptor: AudioDescriptor) {
        if let Some(mut record) = self.records.get_mut(&id) {
            record.audio_file = Some(descriptor);
        }
    }

    pub fn audio_file(&self, id: u32) -> Option<AudioDescriptor> {
        self.records.get(&id).and_then(|r| r.audio_file.clone())
    }
}

#[async_trait]
impl<M: CatalogEntry> TranslationSubscriber for ContainerStore<M> {
    fn name(&self) -> &'static str {
        M::KIND.as_str()
    }

    /// 译文嵌在每节经文里，所有容器的旧经文一律清空；
    /// 只有所选容器会立即从第 1 页重新拉取
    async fn on_translations_changed(&self, ids: &str) -> Result<(), ApplicationError> {
        if ids.is_empty() {
            return Ok(());
        }

        for id in self.clear_all_verses() {
            self.events.publish_verses_cleared(M::KIND, id);
        }

        match self.selected_id() {
            Some(id) => {
                tracing::info!(kind = %M::KIND, container_id = id, translations = %ids, "Refetching selected container");
                self.fetch_page(id, true, Some(1), None).await
            }
            None => Ok(()),
        }
    }
}

impl ContainerStore<Chapter> {
    /// 章名（阿拉伯文 / 拉丁转写 / 太斯米）
    pub fn chapter_name(&self, id: u32) -> Option<ChapterName> {
        self.records.get(&id).map(|r| r.meta.name())
    }

    pub async fn chapter_info(&self, id: u32, locale: &str) -> Result<ChapterInfo, ApplicationError> {
        if !self.records.contains_key(&id) {
            return Err(ApplicationError::not_found("chapter", id));
        }
        Ok(self.api.chapter_info(id, locale).await?)
    }
}

impl ContainerStore<Juz> {
    /// 所选卷的已缓存经文，按章分组
    pub fn verses_by_chapter(&self) -> BTreeMap<u32, Vec<Verse>> {
        self.with_selected(|record| group_by_chapter(record.cache.verses()))
            .unwrap_or_default()
    }

    /// 所选卷按 verse_mapping 展开的各章槽位
    pub fn chapter_sections(&self) -> Vec<ChapterSection> {
        self.with_selected(|record| record.meta.chapter_sections(record.cache.verses()))
            .unwrap_or_default()
    }
}

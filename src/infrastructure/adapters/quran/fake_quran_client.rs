//! Fake Quran Client - 用于测试的 Quran API 客户端
//!
//! 按 (种类, 容器, 页码) 预置经文页，记录调用次数，可整体切换为失败

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::application::ports::{QuranApiError, QuranApiPort, VersesPage, VersesQuery};
use crate::domain::audio::{AudioFile, Reciter};
use crate::domain::container::{Chapter, ChapterInfo, ContainerKind, Juz};
use crate::domain::tafsir::{Tafsir, TafsirResource};
use crate::domain::translation::Translation;
use crate::domain::verse::{Pagination, Verse};

/// 按总记录数生成分页游标
pub fn fake_pagination(page: u32, per_page: u32, total_records: u32) -> Pagination {
    let per_page = per_page.max(1);
    let total_pages = total_records.div_ceil(per_page);
    Pagination {
        per_page,
        current_page: page,
        next_page: (page < total_pages).then_some(page + 1),
        total_pages,
        total_records,
    }
}

/// Fake Quran Client
#[derive(Default)]
pub struct FakeQuranClient {
    pages: HashMap<(ContainerKind, u32, u32), VersesPage>,
    by_key: HashMap<String, Verse>,
    chapters: Vec<Chapter>,
    juzs: Vec<Juz>,
    translations: Vec<Translation>,
    reciters: Vec<Reciter>,
    tafsir_resources: Vec<TafsirResource>,
    tafsirs: HashMap<(String, String), Tafsir>,
    silent_chapters: HashSet<u32>,
    failing: AtomicBool,
    verses_calls: AtomicUsize,
    by_key_calls: AtomicUsize,
    audio_calls: AtomicUsize,
    audio_requests: Mutex<Vec<(u32, u32)>>,
    last_verses_query: Mutex<Option<VersesQuery>>,
}

impl FakeQuranClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(
        mut self,
        kind: ContainerKind,
        id: u32,
        page: u32,
        verses: Vec<Verse>,
        pagination: Pagination,
    ) -> Self {
        self.pages
            .insert((kind, id, page), VersesPage { verses, pagination });
        self
    }

    pub fn with_verse(mut self, verse: Verse) -> Self {
        self.by_key.insert(verse.verse_key.clone(), verse);
        self
    }

    pub fn with_chapters(mut self, chapters: Vec<Chapter>) -> Self {
        self.chapters = chapters;
        self
    }

    pub fn with_juzs(mut self, juzs: Vec<Juz>) -> Self {
        self.juzs = juzs;
        self
    }

    pub fn with_translations(mut self, translations: Vec<Translation>) -> Self {
        self.translations = translations;
        self
    }

    pub fn with_reciters(mut self, reciters: Vec<Reciter>) -> Self {
        self.reciters = reciters;
        self
    }

    pub fn with_tafsir_resources(mut self, resources: Vec<TafsirResource>) -> Self {
        self.tafsir_resources = resources;
        self
    }

    pub fn with_tafsir(mut self, slug: &str, verse_key: &str, tafsir: Tafsir) -> Self {
        self.tafsirs
            .insert((slug.to_string(), verse_key.to_string()), tafsir);
        self
    }

    /// 该章的音频接口返回空列表
    pub fn without_audio(mut self, chapter_id: u32) -> Self {
        self.silent_chapters.insert(chapter_id);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn verses_calls(&self) -> usize {
        self.verses_calls.load(Ordering::SeqCst)
    }

    pub fn by_key_calls(&self) -> usize {
        self.by_key_calls.load(Ordering::SeqCst)
    }

    pub fn audio_calls(&self) -> usize {
        self.audio_calls.load(Ordering::SeqCst)
    }

    pub fn audio_requests(&self) -> Vec<(u32, u32)> {
        self.audio_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_verses_query(&self) -> Option<VersesQuery> {
        self.last_verses_query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn check(&self) -> Result<(), QuranApiError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(QuranApiError::Network("fake client failing".to_string()));
        }
        Ok(())
    }

    fn not_found(what: String) -> QuranApiError {
        QuranApiError::Service {
            status: 404,
            message: what,
        }
    }
}

#[async_trait]
impl QuranApiPort for FakeQuranClient {
    async fn verses(
        &self,
        kind: ContainerKind,
        id: u32,
        query: &VersesQuery,
    ) -> Result<VersesPage, QuranApiError> {
        self.verses_calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_verses_query
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(query.clone());
        self.check()?;

        tracing::debug!(kind = %kind, container_id = id, page = query.page, "FakeQuranClient: verses");

        Ok(self
            .pages
            .get(&(kind, id, query.page))
            .cloned()
            .unwrap_or_else(|| VersesPage {
                verses: Vec::new(),
                pagination: fake_pagination(query.page, query.per_page, 0),
            }))
    }

    async fn verse_by_key(&self, verse_key: &str, _translations: &str) -> Result<Verse, QuranApiError> {
        self.by_key_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.by_key
            .get(verse_key)
            .cloned()
            .ok_or_else(|| Self::not_found(format!("verse {}", verse_key)))
    }

    async fn chapters(&self, _locale: &str) -> Result<Vec<Chapter>, QuranApiError> {
        self.check()?;
        Ok(self.chapters.clone())
    }

    async fn juzs(&self) -> Result<Vec<Juz>, QuranApiError> {
        self.check()?;
        Ok(self.juzs.clone())
    }

    async fn chapter_info(&self, chapter_id: u32, locale: &str) -> Result<ChapterInfo, QuranApiError> {
        self.check()?;
        if !self.chapters.iter().any(|c| c.id == chapter_id) {
            return Err(Self::not_found(format!("chapter {}", chapter_id)));
        }
        Ok(ChapterInfo {
            id: chapter_id,
            chapter_id,
            language_name: locale.to_string(),
            short_text: format!("chapter {}", chapter_id),
            source: "fake".to_string(),
            text: String::new(),
        })
    }

    async fn translations(&self, _locale: &str) -> Result<Vec<Translation>, QuranApiError> {
        self.check()?;
        Ok(self.translations.clone())
    }

    async fn tafsirs(&self) -> Result<Vec<TafsirResource>, QuranApiError> {
        self.check()?;
        Ok(self.tafsir_resources.clone())
    }

    async fn tafsir(&self, slug: &str, verse_key: &str) -> Result<Tafsir, QuranApiError> {
        self.check()?;
        self.tafsirs
            .get(&(slug.to_string(), verse_key.to_string()))
            .cloned()
            .ok_or_else(|| Self::not_found(format!("tafsir {} {}", slug, verse_key)))
    }

    async fn audio_files(&self, reciter_id: u32, chapter_id: u32) -> Result<Vec<AudioFile>, QuranApiError> {
        self.audio_calls.fetch_add(1, Ordering::SeqCst);
        self.audio_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((reciter_id, chapter_id));
        self.check()?;

        if self.silent_chapters.contains(&chapter_id) {
            return Ok(Vec::new());
        }

        Ok(vec![AudioFile {
            id: chapter_id.into(),
            chapter_id,
            file_size: None,
            format: Some("mp3".to_string()),
            total_files: Some(1),
            audio_url: format!("https://audio.test/{}/{}.mp3", reciter_id, chapter_id),
            duration: 1000.0,
            verse_timings: Vec::new(),
        }])
    }

    async fn reciters(&self, _locale: &str) -> Result<Vec<Reciter>, QuranApiError> {
        self.check()?;
        Ok(self.reciters.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_pagination() {
        let first = fake_pagination(1, 10, 20);
        assert_eq!(first.next_page, Some(2));
        assert_eq!(first.total_pages, 2);

        let last = fake_pagination(29, 10, 286);
        assert_eq!(last.total_pages, 29);
        assert!(!last.has_next());
    }

    #[tokio::test]
    async fn test_missing_page_is_empty() {
        let client = FakeQuranClient::new();
        let page = client
            .verses(ContainerKind::Page, 3, &VersesQuery::new("131", 1, 10))
            .await
            .unwrap();
        assert!(page.verses.is_empty());
        assert!(!page.pagination.has_next());
        assert_eq!(client.verses_calls(), 1);
    }

    #[tokio::test]
    async fn test_failing_switch() {
        let client = FakeQuranClient::new();
        client.set_failing(true);
        assert!(matches!(
            client.audio_files(7, 1).await,
            Err(QuranApiError::Network(_))
        ));
        assert_eq!(client.audio_requests(), vec![(7, 1)]);

        client.set_failing(false);
        let files = client.audio_files(7, 1).await.unwrap();
        assert_eq!(files[0].audio_url, "https://audio.test/7/1.mp3");
    }
}

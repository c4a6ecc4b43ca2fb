//! In-Memory Reference Data

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::ports::{ReferenceDataError, ReferenceDataPort};
use crate::domain::audio::Reciter;
use crate::domain::container::{dedup_juzs, Chapter, Juz, Page};
use crate::domain::translation::Translation;

/// 内存参考数据，构造时一次性给定
#[derive(Debug, Default, Clone)]
pub struct InMemoryReferenceData {
    chapters: Vec<Chapter>,
    juzs: Vec<Juz>,
    pages: Option<Vec<Page>>,
    reciters: Vec<Reciter>,
    translations: Vec<Translation>,
}

impl InMemoryReferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn with_chapters(mut self, chapters: Vec<Chapter>) -> Self {
        self.chapters = chapters;
        self
    }

    pub fn with_juzs(mut self, juzs: Vec<Juz>) -> Self {
        self.juzs = dedup_juzs(juzs);
        self
    }

    pub fn with_pages(mut self, pages: Vec<Page>) -> Self {
        self.pages = Some(pages);
        self
    }

    pub fn with_reciters(mut self, reciters: Vec<Reciter>) -> Self {
        self.reciters = reciters;
        self
    }

    pub fn with_translations(mut self, translations: Vec<Translation>) -> Self {
        self.translations = translations;
        self
    }
}

#[async_trait]
impl ReferenceDataPort for InMemoryReferenceData {
    async fn chapters(&self) -> Result<Vec<Chapter>, ReferenceDataError> {
        Ok(self.chapters.clone())
    }

    async fn juzs(&self) -> Result<Vec<Juz>, ReferenceDataError> {
        Ok(self.juzs.clone())
    }

    /// 未指定时生成不带章号映射的完整页目录
    async fn pages(&self) -> Result<Vec<Page>, ReferenceDataError> {
        Ok(self
            .pages
            .clone()
            .unwrap_or_else(|| Page::catalog(&BTreeMap::new())))
    }

    async fn reciters(&self) -> Result<Vec<Reciter>, ReferenceDataError> {
        Ok(self.reciters.clone())
    }

    async fn translations(&self) -> Result<Vec<Translation>, ReferenceDataError> {
        Ok(self.translations.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::container::sample_juz;

    #[tokio::test]
    async fn test_defaults() {
        let data = InMemoryReferenceData::new()
            .with_juzs(vec![sample_juz(2, &[(2, "142-252")]), sample_juz(2, &[(2, "142-252")])]);
        assert!(data.chapters().await.unwrap().is_empty());
        assert_eq!(data.juzs().await.unwrap().len(), 1);
        assert_eq!(data.pages().await.unwrap().len(), 604);

        let data = data.with_pages(vec![Page::new(1)]);
        assert_eq!(data.pages().await.unwrap().len(), 1);
    }
}

//! Tafsir Store - 经注资源与按节经注

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use super::{read, write, LoadingGuard};
use crate::application::error::ApplicationError;
use crate::application::ports::QuranApiPort;
use crate::domain::tafsir::{language_selection, Tafsir, TafsirResource};
use crate::domain::verse::VerseKey;

pub struct TafsirStore {
    api: Arc<dyn QuranApiPort>,
    resources: RwLock<Vec<TafsirResource>>,
    current: RwLock<Option<Tafsir>>,
    slug: RwLock<String>,
    verse_key: RwLock<String>,
    language: RwLock<String>,
    loading: AtomicBool,
}

impl TafsirStore {
    pub fn new(api: Arc<dyn QuranApiPort>, default_slug: &str, default_verse_key: &str) -> Self {
        Self {
            api,
            resources: RwLock::new(Vec::new()),
            current: RwLock::new(None),
            slug: RwLock::new(default_slug.to_string()),
            verse_key: RwLock::new(default_verse_key.to_string()),
            language: RwLock::new("English".to_string()),
            loading: AtomicBool::new(false),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub async fn load_resources(&self) -> Result<(), ApplicationError> {
        if !read(&self.resources).is_empty() {
            return Ok(());
        }
        let _guard = LoadingGuard::new(&self.loading, true);
        let resources = self.api.tafsirs().await?;
        tracing::info!(count = resources.len(), "Tafsir resources loaded");
        *write(&self.resources) = resources;
        Ok(())
    }

    pub fn resources(&self) -> Vec<TafsirResource> {
        read(&self.resources).clone()
    }

    /// 首字母大写、去重后的语言列表
    pub fn languages(&self) -> Vec<String> {
        language_selection(&read(&self.resources))
    }

    pub fn language(&self) -> String {
        read(&self.language).clone()
    }

    pub fn set_language(&self, language: &str) {
        *write(&self.language) = language.to_string();
    }

    pub fn slug(&self) -> String {
        read(&self.slug).clone()
    }

    pub fn verse_key(&self) -> String {
        read(&self.verse_key).clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn current(&self) -> Option<Tafsir> {
        read(&self.current).clone()
    }

    /// 当前经注 slug 的语言前缀，用于判断文字方向
    pub fn rtl_prefix(&self) -> Option<String> {
        read(&self.current)
            .as_ref()
            .map(|tafsir| tafsir.language_prefix().to_string())
    }

    /// 拉取 (slug, 经文键) 的经注并设为当前
    pub async fn fetch(&self, slug: &str, verse_key: &str) -> Result<Tafsir, ApplicationError> {
        if slug.trim().is_empty() {
            return Err(ApplicationError::validation("tafsir slug 不能为空"));
        }
        let key: VerseKey = verse_key.parse()?;

        let _guard = LoadingGuard::new(&self.loading, true);
        let tafsir = self.api.tafsir(slug, &key.to_string()).await?;
        tracing::debug!(slug = %slug, verse_key = %key, "Tafsir fetched");

        *write(&self.current) = Some(tafsir.clone());
        Ok(tafsir)
    }

    /// 更新 slug 和/或经文键，然后按新的组合拉取
    pub async fn select(
        &self,
        slug: Option<String>,
        verse_key: Option<String>,
    ) -> Result<Tafsir, ApplicationError> {
        // 先校验再写入，非法输入不改变当前选择
        if let Some(slug) = &slug {
            if slug.trim().is_empty() {
                return Err(ApplicationError::validation("tafsir slug 不能为空"));
            }
        }
        let key = verse_key
            .as_deref()
            .map(str::parse::<VerseKey>)
            .transpose()?;

        if let Some(slug) = slug {
            *write(&self.slug) = slug;
        }
        if let Some(key) = key {
            *write(&self.verse_key) = key.to_string();
        }
        let (slug, verse_key) = (self.slug(), self.verse_key());
        self.fetch(&slug, &verse_key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::container::TranslatedName;
    use crate::infrastructure::adapters::FakeQuranClient;

    fn resource(id: u32, slug: &str, language: &str) -> TafsirResource {
        TafsirResource {
            id,
            name: slug.to_string(),
            author_name: String::new(),
            slug: slug.to_string(),
            language_name: language.to_string(),
            translated_name: TranslatedName::default(),
        }
    }

    fn tafsir(slug: &str, text: &str) -> Tafsir {
        Tafsir {
            language_id: 38,
            resource_id: 169,
            resource_name: slug.to_string(),
            slug: slug.to_string(),
            text: text.to_string(),
            translated_name: TranslatedName::default(),
            verses: Default::default(),
        }
    }

    fn api() -> Arc<FakeQuranClient> {
        Arc::new(
            FakeQuranClient::new()
                .with_tafsir_resources(vec![
                    resource(169, "en-tafisr-ibn-kathir", "english"),
                    resource(16, "ar-tafsir-muyassar", "arabic"),
                ])
                .with_tafsir("en-tafisr-ibn-kathir", "1:1", tafsir("en-tafisr-ibn-kathir", "opening"))
                .with_tafsir("en-tafisr-ibn-kathir", "2:255", tafsir("en-tafisr-ibn-kathir", "throne"))
                .with_tafsir("ar-tafsir-muyassar", "2:255", tafsir("ar-tafsir-muyassar", "الكرسي")),
        )
    }

    #[tokio::test]
    async fn test_languages_from_resources() {
        let store = TafsirStore::new(api(), "en-tafisr-ibn-kathir", "1:1");
        store.load_resources().await.unwrap();
        assert_eq!(store.languages(), vec!["English".to_string(), "Arabic".to_string()]);
    }

    #[tokio::test]
    async fn test_select_fetches_new_combination() {
        let store = TafsirStore::new(api(), "en-tafisr-ibn-kathir", "1:1");

        let first = store.select(None, None).await.unwrap();
        assert_eq!(first.text, "opening");

        let second = store.select(None, Some("2:255".to_string())).await.unwrap();
        assert_eq!(second.text, "throne");

        store
            .select(Some("ar-tafsir-muyassar".to_string()), None)
            .await
            .unwrap();
        assert_eq!(store.rtl_prefix().as_deref(), Some("ar"));
        assert_eq!(store.verse_key(), "2:255");
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_rejects_malformed_key() {
        let store = TafsirStore::new(api(), "en-tafisr-ibn-kathir", "1:1");
        assert!(store.fetch("en-tafisr-ibn-kathir", "one").await.is_err());
        assert!(store.fetch("", "1:1").await.is_err());
        assert!(store.current().is_none());
    }

    #[tokio::test]
    async fn test_invalid_selection_keeps_previous_choice() {
        let store = TafsirStore::new(api(), "en-tafisr-ibn-kathir", "1:1");
        store.select(None, Some("2:255".to_string())).await.unwrap();

        let result = store
            .select(Some("ar-tafsir-muyassar".to_string()), Some("two".to_string()))
            .await;
        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        assert_eq!(store.slug(), "en-tafisr-ibn-kathir");
        assert_eq!(store.verse_key(), "2:255");

        assert!(store.select(Some(String::new()), None).await.is_err());
        assert_eq!(store.slug(), "en-tafisr-ibn-kathir");

        let tafsir = store
            .select(Some("ar-tafsir-muyassar".to_string()), None)
            .await
            .unwrap();
        assert_eq!(tafsir.text, "الكرسي");
    }
}

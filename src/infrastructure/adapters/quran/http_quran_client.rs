//! HTTP Quran Client - 调用 quran.com v4 与 QDC 接口
//!
//! 实现 QuranApiPort trait
//!
//! 经文与目录走 v4 接口，经注与音频目录走 QDC 接口:
//! GET {base_url}/verses/by_chapter/{id}?translations=..&page=..&per_page=..
//! GET {qdc_url}/audio/reciters/{reciter}/audio_files?chapter={id}&segments=true
//!
//! 每个请求发出前固定等待 request_delay_ms

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{
    QuranApiError, QuranApiPort, VersesPage, VersesQuery, KEY_VERSE_FIELDS, KEY_WORD_FIELDS,
    TRANSLATION_FIELDS, VERSE_FIELDS, WORD_FIELDS,
};
use crate::domain::audio::{AudioFile, Reciter};
use crate::domain::container::{Chapter, ChapterInfo, ContainerKind, Juz};
use crate::domain::tafsir::{Tafsir, TafsirResource, TAFSIR_WORD_FIELDS};
use crate::domain::translation::Translation;
use crate::domain::verse::{Pagination, Verse};

#[derive(Debug, Deserialize)]
struct VersesEnvelope {
    verses: Vec<Verse>,
    pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct VerseEnvelope {
    verse: Verse,
}

#[derive(Debug, Deserialize)]
struct ChaptersEnvelope {
    chapters: Vec<Chapter>,
}

#[derive(Debug, Deserialize)]
struct JuzsEnvelope {
    juzs: Vec<Juz>,
}

#[derive(Debug, Deserialize)]
struct ChapterInfoEnvelope {
    chapter_info: ChapterInfo,
}

#[derive(Debug, Deserialize)]
struct TranslationsEnvelope {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct TafsirsEnvelope {
    tafsirs: Vec<TafsirResource>,
}

#[derive(Debug, Deserialize)]
struct TafsirEnvelope {
    tafsir: Tafsir,
}

#[derive(Debug, Deserialize)]
struct AudioFilesEnvelope {
    audio_files: Vec<AudioFile>,
}

#[derive(Debug, Deserialize)]
struct RecitersEnvelope {
    reciters: Vec<Reciter>,
}

/// HTTP Quran 客户端配置
#[derive(Debug, Clone)]
pub struct HttpQuranClientConfig {
    /// v4 接口基础 URL
    pub base_url: String,
    /// QDC 接口基础 URL（经注、音频）
    pub qdc_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 请求发出前的固定延迟（毫秒）
    pub request_delay_ms: u64,
}

impl Default for HttpQuranClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.quran.com/api/v4".to_string(),
            qdc_url: "https://api.qurancdn.com/api/qdc".to_string(),
            timeout_secs: 30,
            request_delay_ms: 500,
        }
    }
}

impl HttpQuranClientConfig {
    pub fn new(base_url: impl Into<String>, qdc_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            qdc_url: qdc_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_request_delay(mut self, millis: u64) -> Self {
        self.request_delay_ms = millis;
        self
    }
}

/// HTTP Quran 客户端
pub struct HttpQuranClient {
    client: Client,
    config: HttpQuranClientConfig,
}

impl HttpQuranClient {
    pub fn new(config: HttpQuranClientConfig) -> Result<Self, QuranApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| QuranApiError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn with_default_config() -> Result<Self, QuranApiError> {
        Self::new(HttpQuranClientConfig::default())
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn qdc_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.qdc_url.trim_end_matches('/'), path)
    }

    /// 按容器种类选择字段投影
    fn projection(kind: ContainerKind) -> (&'static str, &'static str) {
        match kind {
            ContainerKind::Chapter => (VERSE_FIELDS, WORD_FIELDS),
            ContainerKind::Juz | ContainerKind::Page => (KEY_VERSE_FIELDS, KEY_WORD_FIELDS),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, QuranApiError> {
        if self.config.request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.request_delay_ms)).await;
        }

        tracing::debug!(url = %url, params = query.len(), "Sending Quran API request");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    QuranApiError::Timeout
                } else if e.is_connect() {
                    QuranApiError::Network(format!("Cannot connect to Quran API: {}", e))
                } else {
                    QuranApiError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(QuranApiError::Service {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| QuranApiError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl QuranApiPort for HttpQuranClient {
    async fn verses(
        &self,
        kind: ContainerKind,
        id: u32,
        query: &VersesQuery,
    ) -> Result<VersesPage, QuranApiError> {
        let (fields, word_fields) = Self::projection(kind);
        let url = self.api_url(&format!("verses/{}/{}", kind.path_segment(), id));
        let params = [
            ("translations", query.translations.clone()),
            ("words", "true".to_string()),
            ("translation_fields", TRANSLATION_FIELDS.to_string()),
            ("page", query.page.to_string()),
            ("per_page", query.per_page.to_string()),
            ("fields", fields.to_string()),
            ("word_fields", word_fields.to_string()),
        ];

        let envelope: VersesEnvelope = self.get_json(&url, &params).await?;

        tracing::debug!(
            kind = %kind,
            container_id = id,
            page = envelope.pagination.current_page,
            count = envelope.verses.len(),
            "Verses page received"
        );

        Ok(VersesPage {
            verses: envelope.verses,
            pagination: envelope.pagination,
        })
    }

    async fn verse_by_key(&self, verse_key: &str, translations: &str) -> Result<Verse, QuranApiError> {
        let url = self.api_url(&format!("verses/by_key/{}", verse_key));
        let params = [
            ("translations", translations.to_string()),
            ("words", "true".to_string()),
            ("translation_fields", TRANSLATION_FIELDS.to_string()),
            ("fields", KEY_VERSE_FIELDS.to_string()),
            ("word_fields", KEY_WORD_FIELDS.to_string()),
        ];
        let envelope: VerseEnvelope = self.get_json(&url, &params).await?;
        Ok(envelope.verse)
    }

    async fn chapters(&self, locale: &str) -> Result<Vec<Chapter>, QuranApiError> {
        let envelope: ChaptersEnvelope = self
            .get_json(&self.api_url("chapters"), &[("language", locale.to_string())])
            .await?;
        Ok(envelope.chapters)
    }

    async fn juzs(&self) -> Result<Vec<Juz>, QuranApiError> {
        let envelope: JuzsEnvelope = self.get_json(&self.api_url("juzs"), &[]).await?;
        Ok(envelope.juzs)
    }

    async fn chapter_info(&self, chapter_id: u32, locale: &str) -> Result<ChapterInfo, QuranApiError> {
        let url = self.api_url(&format!("chapters/{}/info", chapter_id));
        let envelope: ChapterInfoEnvelope = self
            .get_json(&url, &[("language", locale.to_string())])
            .await?;
        Ok(envelope.chapter_info)
    }

    async fn translations(&self, locale: &str) -> Result<Vec<Translation>, QuranApiError> {
        let envelope: TranslationsEnvelope = self
            .get_json(
                &self.api_url("resources/translations"),
                &[("language", locale.to_string())],
            )
            .await?;
        Ok(envelope.translations)
    }

    async fn tafsirs(&self) -> Result<Vec<TafsirResource>, QuranApiError> {
        let envelope: TafsirsEnvelope = self
            .get_json(&self.api_url("resources/tafsirs"), &[])
            .await?;
        Ok(envelope.tafsirs)
    }

    async fn tafsir(&self, slug: &str, verse_key: &str) -> Result<Tafsir, QuranApiError> {
        let url = self.qdc_url(&format!("tafsirs/{}/by_ayah/{}", slug, verse_key));
        let params = [
            ("words", "true".to_string()),
            ("word_fields", TAFSIR_WORD_FIELDS.to_string()),
        ];
        let envelope: TafsirEnvelope = self.get_json(&url, &params).await?;
        Ok(envelope.tafsir)
    }

    async fn audio_files(&self, reciter_id: u32, chapter_id: u32) -> Result<Vec<AudioFile>, QuranApiError> {
        let url = self.qdc_url(&format!("audio/reciters/{}/audio_files", reciter_id));
        let params = [
            ("chapter", chapter_id.to_string()),
            ("segments", "true".to_string()),
        ];
        let envelope: AudioFilesEnvelope = self.get_json(&url, &params).await?;

        tracing::info!(
            reciter_id,
            chapter_id,
            files = envelope.audio_files.len(),
            "Audio files received"
        );

        Ok(envelope.audio_files)
    }

    async fn reciters(&self, locale: &str) -> Result<Vec<Reciter>, QuranApiError> {
        let envelope: RecitersEnvelope = self
            .get_json(
                &self.qdc_url("audio/reciters"),
                &[("locale", locale.to_string())],
            )
            .await?;
        Ok(envelope.reciters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpQuranClientConfig::default();
        assert_eq!(config.base_url, "https://api.quran.com/api/v4");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.request_delay_ms, 500);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpQuranClientConfig::new("http://localhost:9000/v4/", "http://localhost:9000/qdc")
            .with_timeout(5)
            .with_request_delay(0);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.request_delay_ms, 0);

        let client = HttpQuranClient::new(config).unwrap();
        assert_eq!(client.api_url("juzs"), "http://localhost:9000/v4/juzs");
        assert_eq!(
            client.qdc_url("audio/reciters"),
            "http://localhost:9000/qdc/audio/reciters"
        );
    }

    #[test]
    fn test_projection_by_kind() {
        assert_eq!(HttpQuranClient::projection(ContainerKind::Chapter).0, VERSE_FIELDS);
        assert_eq!(HttpQuranClient::projection(ContainerKind::Page).1, KEY_WORD_FIELDS);
    }

    #[test]
    fn test_verses_envelope() {
        let json = r#"{
            "verses": [{"id": 1, "verse_number": 1, "verse_key": "1:1", "words": [], "translations": []}],
            "pagination": {"per_page": 10, "current_page": 1, "next_page": null, "total_pages": 1, "total_records": 7}
        }"#;
        let envelope: VersesEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.verses.len(), 1);
        assert_eq!(envelope.pagination.total_records, 7);
    }

    #[test]
    fn test_audio_files_envelope() {
        let json = r#"{"audio_files": [{
            "id": 1, "chapter_id": 1, "file_size": 710784.0, "format": "mp3",
            "audio_url": "https://download.quranicaudio.com/qdc/mishari_al_afasy/murattal/1.mp3",
            "duration": 43000,
            "verse_timings": [{"verse_key": "1:1", "timestamp_from": 0, "timestamp_to": 6493, "duration": 6493, "segments": [[1, 0, 630]]}]
        }]}"#;
        let envelope: AudioFilesEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.audio_files[0].verse_timings[0].timestamp_to, 6493);
    }
}

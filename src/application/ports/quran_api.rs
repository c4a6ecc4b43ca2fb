//! Quran API Port - 远端经文 / 资源 / 音频接口抽象
//!
//! 具体实现在 infrastructure/adapters/quran 层

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::audio::{AudioFile, Reciter};
use crate::domain::container::{Chapter, ChapterInfo, ContainerKind, Juz};
use crate::domain::tafsir::{Tafsir, TafsirResource};
use crate::domain::translation::Translation;
use crate::domain::verse::{Pagination, Verse};

/// 译文字段投影
pub const TRANSLATION_FIELDS: &str = "id,language_id,resource_id,resource_name,text,verse_key,verse_number";

/// 按容器拉取时的经文字段投影
pub const VERSE_FIELDS: &str = "text_uthmani,text_uthmani_simple,text_imlaei,text_imlaei_simple,text_indopak,juz_number,hizb_number,sajdah_type,page_number,text_uthmani_tajweed,chapter_id";

/// 按容器拉取时的逐词字段投影
pub const WORD_FIELDS: &str = "position,text_uthmani,text_indopak,text_imlaei,verse_key,page_number,line_number,location,char_type_name,code_v1,code_v2";

/// 按经文键拉取时的经文字段投影
pub const KEY_VERSE_FIELDS: &str = "text_uthmani,chapter_id,hizb_number,text_imlaei_simple";

/// 按经文键拉取时的逐词字段投影
pub const KEY_WORD_FIELDS: &str = "verse_key,verse_id,verse_number,page_number,location,text_uthmani,code_v1,qpc_uthmani_hafs";

/// Quran API 错误
#[derive(Debug, Error)]
pub enum QuranApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: HTTP {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 经文请求参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersesQuery {
    /// 逗号分隔的译本 id
    pub translations: String,
    pub page: u32,
    pub per_page: u32,
}

impl VersesQuery {
    pub fn new(translations: impl Into<String>, page: u32, per_page: u32) -> Self {
        Self {
            translations: translations.into(),
            page,
            per_page,
        }
    }
}

/// 一页经文
#[derive(Debug, Clone, PartialEq)]
pub struct VersesPage {
    pub verses: Vec<Verse>,
    pub pagination: Pagination,
}

/// Quran API Port
#[async_trait]
pub trait QuranApiPort: Send + Sync {
    /// `GET /verses/{by_chapter|by_juz|by_page}/{id}`
    async fn verses(
        &self,
        kind: ContainerKind,
        id: u32,
        query: &VersesQuery,
    ) -> Result<VersesPage, QuranApiError>;

    /// `GET /verses/by_key/{key}`
    async fn verse_by_key(&self, verse_key: &str, translations: &str) -> Result<Verse, QuranApiError>;

    /// `GET /chapters`
    async fn chapters(&self, locale: &str) -> Result<Vec<Chapter>, QuranApiError>;

    /// `GET /juzs`
    async fn juzs(&self) -> Result<Vec<Juz>, QuranApiError>;

    /// `GET /chapters/{id}/info`
    async fn chapter_info(&self, chapter_id: u32, locale: &str) -> Result<ChapterInfo, QuranApiError>;

    /// `GET /resources/translations`
    async fn translations(&self, locale: &str) -> Result<Vec<Translation>, QuranApiError>;

    /// `GET /resources/tafsirs`
    async fn tafsirs(&self) -> Result<Vec<TafsirResource>, QuranApiError>;

    /// `GET {qdc}/tafsirs/{slug}/by_ayah/{key}`
    async fn tafsir(&self, slug: &str, verse_key: &str) -> Result<Tafsir, QuranApiError>;

    /// `GET {qdc}/audio/reciters/{reciter}/audio_files?chapter={id}&segments=true`
    async fn audio_files(&self, reciter_id: u32, chapter_id: u32) -> Result<Vec<AudioFile>, QuranApiError>;

    /// `GET {qdc}/audio/reciters?locale={locale}`
    async fn reciters(&self, locale: &str) -> Result<Vec<Reciter>, QuranApiError>;
}

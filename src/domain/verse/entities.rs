//! Verse Context - Entities
//!
//! 远端 API 返回的经文记录，拉取后不可变（`bookmarked` 除外）

use serde::{Deserialize, Serialize};

use super::VerseKey;

/// 经文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    pub id: u64,
    /// 按章拉取时 API 可能不返回该字段，见 [`Verse::chapter`]
    #[serde(default)]
    pub chapter_id: Option<u32>,
    pub verse_number: u32,
    pub verse_key: String,
    #[serde(default)]
    pub page_number: Option<u32>,
    #[serde(default)]
    pub juz_number: Option<u32>,
    #[serde(default)]
    pub hizb_number: Option<u32>,
    #[serde(default)]
    pub rub_el_hizb_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sajdah_type: Option<String>,

    // 经文原文（按请求的 fields 投影返回）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_uthmani: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_uthmani_simple: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_uthmani_tajweed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_imlaei: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_imlaei_simple: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_indopak: Option<String>,

    #[serde(default)]
    pub words: Vec<VerseWord>,
    #[serde(default)]
    pub translations: Vec<VerseTranslation>,

    #[serde(default)]
    pub bookmarked: bool,
}

impl Verse {
    /// 所属章号，缺失时从 verse_key 推导
    pub fn chapter(&self) -> Option<u32> {
        self.chapter_id
            .or_else(|| self.key().map(|key| key.chapter()))
    }

    pub fn key(&self) -> Option<VerseKey> {
        self.verse_key.parse().ok()
    }

    /// 指定译本的译文
    pub fn translation(&self, resource_id: u32) -> Option<&VerseTranslation> {
        self.translations
            .iter()
            .find(|t| t.resource_id == resource_id)
    }
}

/// 单词
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseWord {
    #[serde(default)]
    pub id: Option<u64>,
    pub position: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_uthmani: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_indopak: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_imlaei: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_v1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_v2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<WordGloss>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<WordGloss>,
}

/// 单词的逐词翻译或音译
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordGloss {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub language_name: Option<String>,
}

/// 经文译文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseTranslation {
    #[serde(default)]
    pub id: Option<u64>,
    pub resource_id: u32,
    #[serde(default)]
    pub language_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse_number: Option<u32>,
}

//! Tafsir Context - 经注

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::container::TranslatedName;

pub const DEFAULT_TAFSIR_SLUG: &str = "en-tafisr-ibn-kathir";

/// 经注请求的逐词字段
pub const TAFSIR_WORD_FIELDS: &str =
    "verse_key,verse_id,page_number,location,text_uthmani,code_v1,qpc_uthmani_hafs";

/// 经注资源
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TafsirResource {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub language_name: String,
    #[serde(default)]
    pub translated_name: TranslatedName,
}

/// 单节经注
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tafsir {
    #[serde(default)]
    pub language_id: u32,
    #[serde(default)]
    pub resource_id: u32,
    #[serde(default)]
    pub resource_name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub translated_name: TranslatedName,
    /// 按经文键索引的逐词数据，原样保留
    #[serde(default)]
    pub verses: BTreeMap<String, serde_json::Value>,
}

impl Tafsir {
    /// 文字方向判断用的语言前缀（slug 前两个字符）
    pub fn language_prefix(&self) -> &str {
        match self.slug.char_indices().nth(2) {
            Some((idx, _)) => &self.slug[..idx],
            None => &self.slug,
        }
    }
}

/// 经注语言列表：首字母大写并去重，保持首次出现顺序
pub fn language_selection(resources: &[TafsirResource]) -> Vec<String> {
    let mut languages: Vec<String> = Vec::new();
    for resource in resources {
        let language = capitalize(&resource.language_name);
        if !languages.contains(&language) {
            languages.push(language);
        }
    }
    languages
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(id: u32, language: &str) -> TafsirResource {
        TafsirResource {
            id,
            name: format!("tafsir-{}", id),
            author_name: String::new(),
            slug: format!("slug-{}", id),
            language_name: language.to_string(),
            translated_name: TranslatedName::default(),
        }
    }

    #[test]
    fn test_language_selection() {
        let selection = language_selection(&[
            resource(169, "english"),
            resource(14, "arabic"),
            resource(168, "english"),
        ]);
        assert_eq!(selection, vec!["English".to_string(), "Arabic".to_string()]);
    }

    #[test]
    fn test_language_prefix() {
        let tafsir: Tafsir = serde_json::from_value(serde_json::json!({
            "resource_id": 169, "slug": "en-tafisr-ibn-kathir", "text": "<p>...</p>",
            "verses": {"1:1": {"id": 1}}
        }))
        .unwrap();
        assert_eq!(tafsir.language_prefix(), "en");
        assert_eq!(tafsir.verses.len(), 1);

        let short = Tafsir {
            slug: "a".to_string(),
            ..tafsir
        };
        assert_eq!(short.language_prefix(), "a");
    }
}

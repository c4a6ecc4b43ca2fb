//! Container Context - Chapter（章）

use serde::{Deserialize, Serialize};

use super::kind::{number_matches, ContainerKind, ContainerMeta, SortValue};

/// 章总数
pub const TOTAL_CHAPTERS: u32 = 114;

/// 译名
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TranslatedName {
    pub name: String,
    #[serde(default)]
    pub language_name: String,
}

/// 章目录条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: u32,
    #[serde(default)]
    pub revelation_place: String,
    #[serde(default)]
    pub revelation_order: u32,
    #[serde(default)]
    pub bismillah_pre: bool,
    pub name_simple: String,
    #[serde(default)]
    pub name_complex: String,
    #[serde(default)]
    pub name_arabic: String,
    #[serde(default)]
    pub verses_count: u32,
    #[serde(default)]
    pub pages: Vec<u32>,
    #[serde(default)]
    pub translated_name: TranslatedName,
}

impl Chapter {
    pub fn name(&self) -> ChapterName {
        ChapterName {
            ar: self.name_arabic.clone(),
            en: self.name_simple.clone(),
            bismillah: self.bismillah_pre,
        }
    }
}

/// 章名（阿拉伯文 / 拉丁转写 / 是否前置太斯米）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterName {
    pub ar: String,
    pub en: String,
    pub bismillah: bool,
}

/// 章简介
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterInfo {
    pub id: u32,
    pub chapter_id: u32,
    #[serde(default)]
    pub language_name: String,
    #[serde(default)]
    pub short_text: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub text: String,
}

/// 检索归一化：小写并去掉第一个 `-` 或 `'`
fn normalize(value: &str) -> String {
    value.to_lowercase().replacen(&['-', '\''][..], "", 1)
}

impl ContainerMeta for Chapter {
    const KIND: ContainerKind = ContainerKind::Chapter;

    fn id(&self) -> u32 {
        self.id
    }

    fn matches(&self, term: &str) -> bool {
        let term = normalize(term);
        normalize(&self.name_simple).contains(&term)
            || normalize(&self.name_arabic).contains(&term)
            || (!term.is_empty() && number_matches(self.id, &term))
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "id" => Some(SortValue::Number(self.id.into())),
            "revelation_order" => Some(SortValue::Number(self.revelation_order.into())),
            "verses_count" => Some(SortValue::Number(self.verses_count.into())),
            "name_simple" => Some(SortValue::Text(self.name_simple.to_lowercase())),
            "name_arabic" => Some(SortValue::Text(self.name_arabic.clone())),
            "revelation_place" => Some(SortValue::Text(self.revelation_place.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_chapter(id: u32, name_simple: &str, name_arabic: &str) -> Chapter {
    Chapter {
        id,
        revelation_place: "makkah".to_string(),
        revelation_order: id,
        bismillah_pre: id != 1 && id != 9,
        name_simple: name_simple.to_string(),
        name_complex: name_simple.to_string(),
        name_arabic: name_arabic.to_string(),
        verses_count: 7,
        pages: vec![id, id],
        translated_name: TranslatedName {
            name: name_simple.to_string(),
            language_name: "english".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_ignores_case_and_first_hyphen() {
        let chapter = sample_chapter(2, "Al-Baqarah", "البقرة");
        assert!(chapter.matches("baqarah"));
        assert!(chapter.matches("AlBaq"));
        assert!(chapter.matches("al-baq"));
        assert!(chapter.matches("البقرة"));
        assert!(!chapter.matches("imran"));
    }

    #[test]
    fn test_search_by_number() {
        let chapter = sample_chapter(36, "Ya-Sin", "يس");
        assert!(chapter.matches("36"));
        assert!(!chapter.matches("37"));
    }

    #[test]
    fn test_sort_values() {
        let chapter = sample_chapter(3, "Ali 'Imran", "آل عمران");
        assert_eq!(chapter.sort_value("id"), Some(SortValue::Number(3)));
        assert_eq!(
            chapter.sort_value("name_simple"),
            Some(SortValue::Text("ali 'imran".to_string()))
        );
        assert_eq!(chapter.sort_value("unknown"), None);
    }

    #[test]
    fn test_chapter_name() {
        let name = sample_chapter(1, "Al-Fatihah", "الفاتحة").name();
        assert_eq!(name.en, "Al-Fatihah");
        assert_eq!(name.ar, "الفاتحة");
        assert!(!name.bismillah);
    }

    #[test]
    fn test_deserialize_api_chapter() {
        let json = r#"{
            "id": 1, "revelation_place": "makkah", "revelation_order": 5,
            "bismillah_pre": false, "name_simple": "Al-Fatihah", "name_complex": "Al-Fātiĥah",
            "name_arabic": "الفاتحة", "verses_count": 7, "pages": [1, 1],
            "translated_name": {"language_name": "english", "name": "The Opener"}
        }"#;
        let chapter: Chapter = serde_json::from_str(json).unwrap();
        assert_eq!(chapter.id(), 1);
        assert_eq!(chapter.translated_name.name, "The Opener");
    }
}

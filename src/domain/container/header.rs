//! Container Context - 吸顶标题数据

use serde::Serialize;

use super::ChapterName;
use crate::domain::verse::Verse;

/// 由所选容器首节经文推导的标题信息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderData {
    pub chapter_id: Option<u32>,
    pub chapter: Option<ChapterName>,
    pub page_number: Option<u32>,
    pub hizb_number: Option<u32>,
    pub juz_number: Option<u32>,
}

impl HeaderData {
    pub fn from_verse<F>(verse: &Verse, chapter_name: F) -> Self
    where
        F: FnOnce(u32) -> Option<ChapterName>,
    {
        let chapter_id = verse.chapter();
        Self {
            chapter_id,
            chapter: chapter_id.and_then(chapter_name),
            page_number: verse.page_number,
            hizb_number: verse.hizb_number,
            juz_number: verse.juz_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_from_first_verse() {
        let verse: Verse = serde_json::from_value(serde_json::json!({
            "id": 8, "verse_number": 1, "verse_key": "2:1",
            "page_number": 2, "hizb_number": 1, "juz_number": 1
        }))
        .unwrap();

        let header = HeaderData::from_verse(&verse, |id| {
            Some(ChapterName {
                ar: "البقرة".to_string(),
                en: format!("chapter-{}", id),
                bismillah: true,
            })
        });

        assert_eq!(header.chapter_id, Some(2));
        assert_eq!(header.chapter.unwrap().en, "chapter-2");
        assert_eq!(header.page_number, Some(2));
        assert_eq!(header.juz_number, Some(1));
    }
}

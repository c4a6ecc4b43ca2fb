//! Container Context - Juz（卷）

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::kind::{number_matches, ContainerKind, ContainerMeta, SortValue};
use crate::domain::verse::Verse;

/// 卷总数
pub const TOTAL_JUZS: u32 = 30;

/// 卷目录条目
///
/// `verse_mapping` 形如 `{"2": "142-252", "3": "1-92"}`，键为章号
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Juz {
    #[serde(default)]
    pub id: u32,
    pub juz_number: u32,
    #[serde(default)]
    pub first_verse_id: u64,
    #[serde(default)]
    pub last_verse_id: u64,
    #[serde(default)]
    pub verse_mapping: BTreeMap<u32, String>,
    #[serde(default)]
    pub verses_count: u32,
}

/// 卷内某一章的经文区间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChapterRange {
    pub chapter_id: u32,
    pub from: u32,
    pub to: u32,
}

/// 卷内按章展开的经文槽位，未缓存的经文为 None
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterSection {
    pub chapter_id: u32,
    pub from: u32,
    pub to: u32,
    pub verses: Vec<Option<Verse>>,
}

impl Juz {
    /// 解析 verse_mapping，按章号升序，跳过无法解析的条目
    pub fn chapter_ranges(&self) -> Vec<ChapterRange> {
        self.verse_mapping
            .iter()
            .filter_map(|(chapter_id, range)| {
                let range = range.as_str();
                let (from, to) = range.split_once('-').unwrap_or((range, range));
                let from = from.trim().parse().ok()?;
                let to = to.trim().parse().ok()?;
                Some(ChapterRange {
                    chapter_id: *chapter_id,
                    from,
                    to,
                })
            })
            .collect()
    }

    /// 卷首章的起始经文编号
    pub fn first_verse_number(&self) -> Option<u32> {
        self.chapter_ranges().first().map(|range| range.from)
    }

    /// 用已缓存经文填充各章槽位
    pub fn chapter_sections(&self, verses: &[Verse]) -> Vec<ChapterSection> {
        let by_key: BTreeMap<&str, &Verse> = verses
            .iter()
            .map(|verse| (verse.verse_key.as_str(), verse))
            .collect();

        self.chapter_ranges()
            .into_iter()
            .map(|range| ChapterSection {
                chapter_id: range.chapter_id,
                from: range.from,
                to: range.to,
                verses: (range.from..=range.to)
                    .map(|n| {
                        by_key
                            .get(format!("{}:{}", range.chapter_id, n).as_str())
                            .map(|verse| (*verse).clone())
                    })
                    .collect(),
            })
            .collect()
    }
}

/// 按章分组，保持各章内的原有顺序
pub fn group_by_chapter(verses: &[Verse]) -> BTreeMap<u32, Vec<Verse>> {
    let mut groups: BTreeMap<u32, Vec<Verse>> = BTreeMap::new();
    for verse in verses {
        if let Some(chapter) = verse.chapter() {
            groups.entry(chapter).or_default().push(verse.clone());
        }
    }
    groups
}

/// 远端接口会重复返回卷条目，按卷号去重并保留首次出现
pub fn dedup_juzs(juzs: Vec<Juz>) -> Vec<Juz> {
    let mut seen = std::collections::HashSet::new();
    let mut unique: Vec<Juz> = juzs
        .into_iter()
        .filter(|juz| seen.insert(juz.juz_number))
        .collect();
    unique.sort_by_key(|juz| juz.juz_number);
    unique
}

impl ContainerMeta for Juz {
    const KIND: ContainerKind = ContainerKind::Juz;

    fn id(&self) -> u32 {
        self.juz_number
    }

    fn matches(&self, term: &str) -> bool {
        number_matches(self.juz_number, term)
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "id" | "juz_number" => Some(SortValue::Number(self.juz_number.into())),
            "verses_count" => Some(SortValue::Number(self.verses_count.into())),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_juz(juz_number: u32, mapping: &[(u32, &str)]) -> Juz {
    Juz {
        id: juz_number,
        juz_number,
        first_verse_id: 1,
        last_verse_id: 148,
        verse_mapping: mapping
            .iter()
            .map(|(chapter, range)| (*chapter, range.to_string()))
            .collect(),
        verses_count: 148,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse(key: &str) -> Verse {
        let (chapter, number) = key.split_once(':').unwrap();
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "verse_number": number.parse::<u32>().unwrap(),
            "verse_key": key,
            "chapter_id": chapter.parse::<u32>().unwrap(),
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_mapping_with_string_keys() {
        let json = r#"{"id": 2, "juz_number": 2, "verse_mapping": {"2": "142-252"}, "first_verse_id": 149, "last_verse_id": 259, "verses_count": 111}"#;
        let juz: Juz = serde_json::from_str(json).unwrap();
        assert_eq!(
            juz.chapter_ranges(),
            vec![ChapterRange {
                chapter_id: 2,
                from: 142,
                to: 252
            }]
        );
        assert_eq!(juz.first_verse_number(), Some(142));
    }

    #[test]
    fn test_chapter_ranges_are_numerically_ordered() {
        let juz = sample_juz(30, &[(114, "1-6"), (78, "1-40"), (100, "1-11")]);
        let ids: Vec<u32> = juz.chapter_ranges().iter().map(|r| r.chapter_id).collect();
        assert_eq!(ids, vec![78, 100, 114]);
    }

    #[test]
    fn test_chapter_sections_fill_missing_with_none() {
        let juz = sample_juz(1, &[(1, "1-3"), (2, "1-2")]);
        let verses = vec![verse("1:1"), verse("1:3"), verse("2:2")];
        let sections = juz.chapter_sections(&verses);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].verses.len(), 3);
        assert!(sections[0].verses[0].is_some());
        assert!(sections[0].verses[1].is_none());
        assert_eq!(sections[1].verses[1].as_ref().unwrap().verse_key, "2:2");
    }

    #[test]
    fn test_group_by_chapter() {
        let groups = group_by_chapter(&[verse("1:7"), verse("2:1"), verse("2:2")]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&2].len(), 2);
    }

    #[test]
    fn test_dedup_juzs() {
        let juzs = vec![
            sample_juz(2, &[]),
            sample_juz(1, &[]),
            sample_juz(2, &[(9, "1-1")]),
        ];
        let unique = dedup_juzs(juzs);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].juz_number, 1);
        assert!(unique[1].verse_mapping.is_empty());
    }

    #[test]
    fn test_search_by_number() {
        let juz = sample_juz(12, &[]);
        assert!(juz.matches("12"));
        assert!(juz.matches("2"));
        assert!(!juz.matches("3"));
    }
}

//! Verse Cache - 单个容器的经文缓存
//!
//! 按 verse_key 去重的追加式合并：已有的键保持首次写入的内容，
//! 分页游标每次整体替换

use std::collections::HashSet;

use crate::domain::verse::{Pagination, Verse};

#[derive(Debug, Clone, Default)]
pub struct VerseCache {
    verses: Vec<Verse>,
    keys: HashSet<String>,
    pagination: Option<Pagination>,
}

impl VerseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 合并一批经文，返回新增数量
    ///
    /// 新增经文的 `bookmarked` 统一置为 false
    pub fn merge<I>(&mut self, incoming: I) -> usize
    where
        I: IntoIterator<Item = Verse>,
    {
        let mut added = 0;
        for mut verse in incoming {
            if self.keys.contains(&verse.verse_key) {
                continue;
            }
            verse.bookmarked = false;
            self.keys.insert(verse.verse_key.clone());
            self.verses.push(verse);
            added += 1;
        }
        added
    }

    pub fn replace_pagination(&mut self, pagination: Pagination) {
        self.pagination = Some(pagination);
    }

    /// 清空经文；分页游标保留到下一次成功拉取
    pub fn clear(&mut self) {
        self.verses.clear();
        self.keys.clear();
    }

    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    pub fn contains(&self, verse_key: &str) -> bool {
        self.keys.contains(verse_key)
    }

    pub fn get(&self, verse_key: &str) -> Option<&Verse> {
        if !self.contains(verse_key) {
            return None;
        }
        self.verses.iter().find(|v| v.verse_key == verse_key)
    }

    pub fn first(&self) -> Option<&Verse> {
        self.verses.first()
    }

    pub fn last(&self) -> Option<&Verse> {
        self.verses.last()
    }

    /// 按缓存顺序列出经文键
    pub fn keys(&self) -> Vec<String> {
        self.verses.iter().map(|v| v.verse_key.clone()).collect()
    }
}

#[cfg(test)]
pub(crate) fn test_verse(key: &str) -> Verse {
    let (chapter, number) = key.split_once(':').unwrap_or(("1", "1"));
    let chapter: u32 = chapter.parse().unwrap_or(1);
    let number: u32 = number.parse().unwrap_or(1);
    serde_json::from_value(serde_json::json!({
        "id": chapter * 1000 + number,
        "verse_number": number,
        "verse_key": key,
        "page_number": 1,
        "juz_number": 1,
        "hizb_number": 1,
        "text_uthmani": format!("text {}", key),
    }))
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(range: std::ops::RangeInclusive<u32>) -> Vec<Verse> {
        range.map(|n| test_verse(&format!("1:{}", n))).collect()
    }

    #[test]
    fn test_overlapping_pages_are_deduplicated() {
        let mut cache = VerseCache::new();

        assert_eq!(cache.merge(keys(1..=10)), 10);
        assert_eq!(cache.merge(keys(10..=20)), 10);

        assert_eq!(cache.len(), 20);
        let tenth = cache.keys().iter().filter(|k| *k == "1:10").count();
        assert_eq!(tenth, 1);
        assert_eq!(cache.first().unwrap().verse_key, "1:1");
        assert_eq!(cache.last().unwrap().verse_key, "1:20");
    }

    #[test]
    fn test_existing_key_keeps_first_write() {
        let mut cache = VerseCache::new();
        cache.merge(vec![test_verse("2:255")]);

        let mut replacement = test_verse("2:255");
        replacement.text_uthmani = Some("changed".to_string());
        assert_eq!(cache.merge(vec![replacement]), 0);

        assert_eq!(
            cache.get("2:255").unwrap().text_uthmani.as_deref(),
            Some("text 2:255")
        );
    }

    #[test]
    fn test_duplicates_within_one_batch() {
        let mut cache = VerseCache::new();
        let added = cache.merge(vec![test_verse("1:1"), test_verse("1:1"), test_verse("1:2")]);
        assert_eq!(added, 2);
    }

    #[test]
    fn test_merge_resets_bookmark() {
        let mut cache = VerseCache::new();
        let mut verse = test_verse("1:1");
        verse.bookmarked = true;
        cache.merge(vec![verse]);
        assert!(!cache.get("1:1").unwrap().bookmarked);
    }

    #[test]
    fn test_pagination_is_replaced() {
        let mut cache = VerseCache::new();
        cache.replace_pagination(Pagination {
            per_page: 10,
            current_page: 1,
            next_page: Some(2),
            total_pages: 3,
            total_records: 25,
        });
        cache.replace_pagination(Pagination {
            per_page: 10,
            current_page: 3,
            next_page: None,
            total_pages: 3,
            total_records: 25,
        });

        let pagination = cache.pagination().unwrap();
        assert_eq!(pagination.current_page, 3);
        assert_eq!(pagination.next_page, None);
    }

    #[test]
    fn test_clear_allows_refetch_of_same_keys() {
        let mut cache = VerseCache::new();
        cache.merge(keys(1..=5));
        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.contains("1:1"));
        assert_eq!(cache.merge(keys(1..=5)), 5);
    }
}

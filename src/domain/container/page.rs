//! Container Context - Page（页，Mushaf 页码）

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::kind::{number_matches, ContainerKind, ContainerMeta, SortValue};

/// 页总数
pub const TOTAL_PAGES: u32 = 604;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page_number: u32,
    /// 该页涉及的章号
    #[serde(default)]
    pub chapters: Vec<u32>,
}

impl Page {
    pub fn new(page_number: u32) -> Self {
        Self {
            page_number,
            chapters: Vec::new(),
        }
    }

    /// 生成 1..=604 全部页，按页→章映射补齐章号
    pub fn catalog(mapping: &BTreeMap<u32, Vec<u32>>) -> Vec<Page> {
        (1..=TOTAL_PAGES)
            .map(|page_number| Page {
                page_number,
                chapters: mapping.get(&page_number).cloned().unwrap_or_default(),
            })
            .collect()
    }
}

impl ContainerMeta for Page {
    const KIND: ContainerKind = ContainerKind::Page;

    fn id(&self) -> u32 {
        self.page_number
    }

    fn matches(&self, term: &str) -> bool {
        number_matches(self.page_number, term)
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "id" | "page_number" => Some(SortValue::Number(self.page_number.into())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_all_pages() {
        let mut mapping = BTreeMap::new();
        mapping.insert(1, vec![1]);
        mapping.insert(604, vec![112, 113, 114]);

        let pages = Page::catalog(&mapping);
        assert_eq!(pages.len(), 604);
        assert_eq!(pages[0].chapters, vec![1]);
        assert!(pages[1].chapters.is_empty());
        assert_eq!(pages[603].id(), 604);
        assert_eq!(pages[603].chapters, vec![112, 113, 114]);
    }

    #[test]
    fn test_sort_value() {
        assert_eq!(Page::new(9).sort_value("page_number"), Some(SortValue::Number(9)));
        assert_eq!(Page::new(9).sort_value("name_simple"), None);
    }
}

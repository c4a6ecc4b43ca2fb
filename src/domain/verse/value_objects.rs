//! Verse Context - Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::VerseKeyError;

/// 经文键
///
/// 两种形式:
/// - `"{chapter}:{verse}"`，如 `2:255`
/// - `"{chapter}:{from}-{to}"`，如 `2:1-5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerseKey {
    chapter: u32,
    from: u32,
    to: u32,
}

impl VerseKey {
    pub fn new(chapter: u32, verse: u32) -> Self {
        Self {
            chapter,
            from: verse,
            to: verse,
        }
    }

    pub fn range(chapter: u32, from: u32, to: u32) -> Result<Self, VerseKeyError> {
        if from > to {
            return Err(VerseKeyError::InvalidRange(format!("{}:{}-{}", chapter, from, to)));
        }
        Ok(Self { chapter, from, to })
    }

    pub fn chapter(&self) -> u32 {
        self.chapter
    }

    /// 起始经文编号（单节时即该节）
    pub fn verse(&self) -> u32 {
        self.from
    }

    pub fn start(&self) -> u32 {
        self.from
    }

    pub fn end(&self) -> u32 {
        self.to
    }

    pub fn is_range(&self) -> bool {
        self.from != self.to
    }

    pub fn contains(&self, chapter: u32, verse: u32) -> bool {
        self.chapter == chapter && (self.from..=self.to).contains(&verse)
    }
}

impl FromStr for VerseKey {
    type Err = VerseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (chapter, verses) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| VerseKeyError::Malformed(s.to_string()))?;

        let chapter = parse_number(chapter, s)?;

        match verses.split_once('-') {
            Some((from, to)) => Self::range(chapter, parse_number(from, s)?, parse_number(to, s)?),
            None => Ok(Self::new(chapter, parse_number(verses, s)?)),
        }
    }
}

fn parse_number(part: &str, whole: &str) -> Result<u32, VerseKeyError> {
    match part.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(VerseKeyError::Malformed(whole.to_string())),
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_range() {
            write!(f, "{}:{}-{}", self.chapter, self.from, self.to)
        } else {
            write!(f, "{}:{}", self.chapter, self.from)
        }
    }
}

/// 分页游标
///
/// 每次成功拉取后整体替换，不做合并
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub per_page: u32,
    pub current_page: u32,
    #[serde(default)]
    pub next_page: Option<u32>,
    pub total_pages: u32,
    pub total_records: u32,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.next_page.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_key() {
        let key: VerseKey = "2:255".parse().unwrap();
        assert_eq!(key.chapter(), 2);
        assert_eq!(key.verse(), 255);
        assert!(!key.is_range());
        assert_eq!(key.to_string(), "2:255");
    }

    #[test]
    fn test_parse_range_key() {
        let key: VerseKey = "18:1-10".parse().unwrap();
        assert_eq!(key.chapter(), 18);
        assert_eq!(key.start(), 1);
        assert_eq!(key.end(), 10);
        assert!(key.is_range());
        assert!(key.contains(18, 7));
        assert!(!key.contains(18, 11));
        assert!(!key.contains(17, 7));
        assert_eq!(key.to_string(), "18:1-10");
    }

    #[test]
    fn test_reject_malformed_keys() {
        assert!("".parse::<VerseKey>().is_err());
        assert!("12".parse::<VerseKey>().is_err());
        assert!("a:1".parse::<VerseKey>().is_err());
        assert!("0:1".parse::<VerseKey>().is_err());
        assert!("2:10-3".parse::<VerseKey>().is_err());
    }

    #[test]
    fn test_pagination_from_api_json() {
        let json = r#"{"per_page":10,"current_page":1,"next_page":2,"total_pages":29,"total_records":286}"#;
        let pagination: Pagination = serde_json::from_str(json).unwrap();
        assert!(pagination.has_next());
        assert_eq!(pagination.total_records, 286);

        let json = r#"{"per_page":10,"current_page":29,"next_page":null,"total_pages":29,"total_records":286}"#;
        let last: Pagination = serde_json::from_str(json).unwrap();
        assert!(!last.has_next());
    }
}

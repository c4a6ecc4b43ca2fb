//! JSON 目录文件
//!
//! 目录下的文件:
//! - chapters.json / juzs.json / reciters.json / translations.json:
//!   与远端接口同构，可以是 `{"chapters": [...]}` 信封，也可以是裸数组
//! - page-to-chapter-mappings.json: `{"1": ["1"], "2": ["2"], ...}`

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::application::ports::{ReferenceDataError, ReferenceDataPort};
use crate::domain::audio::Reciter;
use crate::domain::container::{dedup_juzs, Chapter, Juz, Page};
use crate::domain::translation::Translation;

const CHAPTERS_FILE: &str = "chapters.json";
const JUZS_FILE: &str = "juzs.json";
const PAGE_MAPPINGS_FILE: &str = "page-to-chapter-mappings.json";
const RECITERS_FILE: &str = "reciters.json";
const TRANSLATIONS_FILE: &str = "translations.json";

/// 映射文件里的章号既可能是数字也可能是字符串
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u32),
    Text(String),
}

impl NumberOrText {
    fn value(&self) -> Option<u32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// 基于 JSON 文件目录的参考数据
pub struct JsonReferenceData {
    dir: PathBuf,
}

impl JsonReferenceData {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_value(&self, file: &str) -> Result<serde_json::Value, ReferenceDataError> {
        let path = self.dir.join(file);
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ReferenceDataError::Unavailable(path.display().to_string())
            } else {
                ReferenceDataError::Io(format!("{}: {}", path.display(), e))
            }
        })?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ReferenceDataError::Parse(format!("{}: {}", path.display(), e)))
    }

    /// 读取列表文件，兼容信封与裸数组
    async fn read_list<T: DeserializeOwned>(
        &self,
        file: &str,
        field: &str,
    ) -> Result<Vec<T>, ReferenceDataError> {
        let mut value = self.read_value(file).await?;
        if let Some(inner) = value.get_mut(field).map(serde_json::Value::take) {
            value = inner;
        }
        let list: Vec<T> = serde_json::from_value(value)
            .map_err(|e| ReferenceDataError::Parse(format!("{}: {}", file, e)))?;

        tracing::debug!(file = %file, count = list.len(), "Reference data loaded");
        Ok(list)
    }
}

#[async_trait]
impl ReferenceDataPort for JsonReferenceData {
    async fn chapters(&self) -> Result<Vec<Chapter>, ReferenceDataError> {
        self.read_list(CHAPTERS_FILE, "chapters").await
    }

    async fn juzs(&self) -> Result<Vec<Juz>, ReferenceDataError> {
        Ok(dedup_juzs(self.read_list(JUZS_FILE, "juzs").await?))
    }

    async fn pages(&self) -> Result<Vec<Page>, ReferenceDataError> {
        let value = self.read_value(PAGE_MAPPINGS_FILE).await?;
        let raw: BTreeMap<String, Vec<NumberOrText>> = serde_json::from_value(value)
            .map_err(|e| ReferenceDataError::Parse(format!("{}: {}", PAGE_MAPPINGS_FILE, e)))?;

        let mapping: BTreeMap<u32, Vec<u32>> = raw
            .into_iter()
            .filter_map(|(page, chapters)| {
                let page = page.trim().parse().ok()?;
                Some((page, chapters.iter().filter_map(NumberOrText::value).collect()))
            })
            .collect();

        Ok(Page::catalog(&mapping))
    }

    async fn reciters(&self) -> Result<Vec<Reciter>, ReferenceDataError> {
        self.read_list(RECITERS_FILE, "reciters").await
    }

    async fn translations(&self) -> Result<Vec<Translation>, ReferenceDataError> {
        self.read_list(TRANSLATIONS_FILE, "translations").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, file: &str, content: &str) {
        std::fs::write(dir.join(file), content).unwrap();
    }

    #[tokio::test]
    async fn test_envelope_and_bare_array() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            CHAPTERS_FILE,
            r#"{"chapters": [{"id": 1, "name_simple": "Al-Fatihah", "name_arabic": "الفاتحة"}]}"#,
        );
        write(
            dir.path(),
            TRANSLATIONS_FILE,
            r#"[{"id": 131, "name": "Dr. Mustafa Khattab", "language_name": "english"}]"#,
        );

        let data = JsonReferenceData::new(dir.path());
        assert_eq!(data.chapters().await.unwrap()[0].name_simple, "Al-Fatihah");
        assert_eq!(data.translations().await.unwrap()[0].id, 131);
    }

    #[tokio::test]
    async fn test_juzs_are_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            JUZS_FILE,
            r#"{"juzs": [
                {"id": 1, "juz_number": 1, "verse_mapping": {"1": "1-7", "2": "1-141"}},
                {"id": 31, "juz_number": 1, "verse_mapping": {"1": "1-7", "2": "1-141"}},
                {"id": 2, "juz_number": 2, "verse_mapping": {"2": "142-252"}}
            ]}"#,
        );

        let juzs = JsonReferenceData::new(dir.path()).juzs().await.unwrap();
        assert_eq!(juzs.len(), 2);
    }

    #[tokio::test]
    async fn test_pages_from_mapping() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            PAGE_MAPPINGS_FILE,
            r#"{"1": ["1"], "2": ["2"], "604": ["112", 113, "114"]}"#,
        );

        let pages = JsonReferenceData::new(dir.path()).pages().await.unwrap();
        assert_eq!(pages.len(), 604);
        assert_eq!(pages[0].chapters, vec![1]);
        assert_eq!(pages[603].chapters, vec![112, 113, 114]);
        assert!(pages[300].chapters.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let result = JsonReferenceData::new(dir.path()).reciters().await;
        assert!(matches!(result, Err(ReferenceDataError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), RECITERS_FILE, "{not json");
        let result = JsonReferenceData::new(dir.path()).reciters().await;
        assert!(matches!(result, Err(ReferenceDataError::Parse(_))));
    }
}

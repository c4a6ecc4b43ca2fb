//! Reference Data Port - 静态目录数据
//!
//! 章 / 卷 / 页 / 诵读者 / 译本目录，加载后只读

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::Reciter;
use crate::domain::container::{Chapter, Juz, Page};
use crate::domain::translation::Translation;

#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Reference data unavailable: {0}")]
    Unavailable(String),
}

/// Reference Data Port
#[async_trait]
pub trait ReferenceDataPort: Send + Sync {
    async fn chapters(&self) -> Result<Vec<Chapter>, ReferenceDataError>;

    /// 已按卷号去重
    async fn juzs(&self) -> Result<Vec<Juz>, ReferenceDataError>;

    /// 1..=604 全部页
    async fn pages(&self) -> Result<Vec<Page>, ReferenceDataError>;

    async fn reciters(&self) -> Result<Vec<Reciter>, ReferenceDataError>;

    async fn translations(&self) -> Result<Vec<Translation>, ReferenceDataError>;
}

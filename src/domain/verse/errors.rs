//! Verse Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerseKeyError {
    #[error("无效的经文键: {0}")]
    Malformed(String),

    #[error("无效的经文范围: {0}")]
    InvalidRange(String),
}

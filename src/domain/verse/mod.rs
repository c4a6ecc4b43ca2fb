//! Verse Context - 经文限界上下文
//!
//! 职责:
//! - 经文记录（含逐词与译文）
//! - 经文键解析
//! - 分页游标

mod entities;
mod errors;
mod value_objects;

pub use entities::{Verse, VerseTranslation, VerseWord, WordGloss};
pub use errors::VerseKeyError;
pub use value_objects::{Pagination, VerseKey};

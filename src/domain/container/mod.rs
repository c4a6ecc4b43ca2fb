//! Container Context - 容器限界上下文
//!
//! 职责:
//! - 章 / 卷 / 页 三类目录条目
//! - 通用的检索与排序约束（[`ContainerMeta`]）
//! - 标题数据推导

mod chapter;
mod header;
mod juz;
mod kind;
mod page;

pub use chapter::{Chapter, ChapterInfo, ChapterName, TranslatedName, TOTAL_CHAPTERS};
pub use header::HeaderData;
pub use juz::{dedup_juzs, group_by_chapter, ChapterRange, ChapterSection, Juz, TOTAL_JUZS};
pub use kind::{compare_by, ContainerKind, ContainerMeta, SortDirection, SortValue};
pub use page::{Page, TOTAL_PAGES};

#[cfg(test)]
pub(crate) use chapter::sample_chapter;
#[cfg(test)]
pub(crate) use juz::sample_juz;

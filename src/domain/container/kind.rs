//! Container Context - 容器种类与通用元数据约束

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// 容器种类：章 / 卷 / 页
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Chapter,
    Juz,
    Page,
}

impl ContainerKind {
    /// `/verses/{segment}/{id}` 中的路径段
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Chapter => "by_chapter",
            Self::Juz => "by_juz",
            Self::Page => "by_page",
        }
    }

    /// 该种类容器总数
    pub fn total(&self) -> u32 {
        match self {
            Self::Chapter => super::TOTAL_CHAPTERS,
            Self::Juz => super::TOTAL_JUZS,
            Self::Page => super::TOTAL_PAGES,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chapter => "chapter",
            Self::Juz => "juz",
            Self::Page => "page",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// 可排序字段值
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum SortValue {
    Number(i64),
    Text(String),
}

/// 容器元数据
///
/// 章、卷、页三种目录条目共享的最小接口，
/// 供通用的容器存储做检索、排序与寻址
pub trait ContainerMeta: Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    const KIND: ContainerKind;

    /// 容器编号（chapter_id / juz_number / page_number）
    fn id(&self) -> u32;

    /// 目录检索
    fn matches(&self, term: &str) -> bool;

    /// 按字段名取排序值，未知字段返回 None
    fn sort_value(&self, field: &str) -> Option<SortValue>;
}

/// 按字段比较两个条目，未知字段视为相等（保持原有顺序）
pub fn compare_by<M: ContainerMeta>(a: &M, b: &M, field: &str, direction: SortDirection) -> Ordering {
    match (a.sort_value(field), b.sort_value(field)) {
        (Some(x), Some(y)) => direction.apply(x.partial_cmp(&y).unwrap_or(Ordering::Equal)),
        _ => Ordering::Equal,
    }
}

/// 数字检索：编号的十进制文本包含检索词
pub(crate) fn number_matches(number: u32, term: &str) -> bool {
    number.to_string().contains(term.trim())
}

//! Domain Layer - 领域层
//!
//! 包含以下限界上下文:
//! - Verse Context: 经文与经文键
//! - Container Context: 章 / 卷 / 页目录
//! - Audio Context: 诵读音频与诵读者
//! - Translation / Tafsir Context: 译本与经注资源
//! - Settings Context: 用户显示设置

pub mod audio;
pub mod container;
pub mod settings;
pub mod tafsir;
pub mod translation;
pub mod verse;

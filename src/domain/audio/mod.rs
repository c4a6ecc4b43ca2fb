//! Audio Context - 诵读音频
//!
//! 职责:
//! - 单章音频文件与逐节时间轴
//! - 诵读者目录与展示辅助

mod entities;
mod reciter;

pub use entities::{AudioDescriptor, AudioFile, VerseTiming};
pub use reciter::{
    avatar_placeholder, group_by_style, name_initials, Qirat, RecitationStyle, Reciter,
    AVATAR_PLACEHOLDER_API, DEFAULT_RECITER_ID, PLAYBACK_SPEEDS,
};

//! Persistence Layer - 数据持久化
//!
//! 仅持久化用户设置；经文缓存与音频缓存每次会话重建

pub mod sled;

pub use self::sled::{SledSettingsConfig, SledSettingsStorage};

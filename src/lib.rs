//! Noble Quran - 古兰经阅读与诵读服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Verse Context: 经文、经文键与分页游标
//! - Container Context: 章 / 卷 / 页目录
//! - Audio Context: 诵读音频与诵读者
//! - Translation / Tafsir / Settings
//!
//! 应用层 (application/):
//! - Ports: QuranApi, ReferenceData, SettingsStorage, TranslationSubscriber
//! - Stores: 经文拉取合并缓存、容器存储、译本选择、音频播放序列、加载遮罩
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + WebSocket
//! - Adapters: Quran API 客户端、参考数据加载
//! - Memory / Persistence: 内存与 Sled 实现
//! - Worker: 译本变更监听
//! - Events: 事件广播

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};

//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 远程 Quran API 配置
    #[serde(default)]
    pub api: ApiConfig,

    /// 阅读默认值
    #[serde(default)]
    pub reader: ReaderConfig,

    /// 加载遮罩计时
    #[serde(default)]
    pub overlay: OverlayConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 远程 API 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// v4 API 根地址
    #[serde(default = "default_api_url")]
    pub base_url: String,

    /// QDC API 根地址（音频与经注）
    #[serde(default = "default_qdc_url")]
    pub qdc_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_api_timeout")]
    pub timeout_secs: u64,

    /// 每次请求前的固定延迟（毫秒）
    #[serde(default = "default_request_delay")]
    pub request_delay_ms: u64,
}

fn default_api_url() -> String {
    "https://api.quran.com/api/v4".to_string()
}

fn default_qdc_url() -> String {
    "https://api.qurancdn.com/api/qdc".to_string()
}

fn default_api_timeout() -> u64 {
    30
}

fn default_request_delay() -> u64 {
    500
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            qdc_url: default_qdc_url(),
            timeout_secs: default_api_timeout(),
            request_delay_ms: default_request_delay(),
        }
    }
}

/// 阅读默认值
#[derive(Debug, Clone, Deserialize)]
pub struct ReaderConfig {
    /// 每页经文数
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// 初始译本选择
    #[serde(default = "default_translations")]
    pub default_translations: Vec<u32>,

    #[serde(default = "default_reciter_id")]
    pub default_reciter_id: u32,

    #[serde(default = "default_tafsir_slug")]
    pub default_tafsir_slug: String,

    #[serde(default = "default_verse_key")]
    pub default_verse_key: String,

    /// 目录与诵读者列表的语言
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_per_page() -> u32 {
    10
}

fn default_translations() -> Vec<u32> {
    vec![131]
}

fn default_reciter_id() -> u32 {
    7
}

fn default_tafsir_slug() -> String {
    "en-tafisr-ibn-kathir".to_string()
}

fn default_verse_key() -> String {
    "1:1".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            default_translations: default_translations(),
            default_reciter_id: default_reciter_id(),
            default_tafsir_slug: default_tafsir_slug(),
            default_verse_key: default_verse_key(),
            locale: default_locale(),
        }
    }
}

/// 加载遮罩配置
#[derive(Debug, Clone, Deserialize)]
pub struct OverlayConfig {
    /// 计时间隔（毫秒）
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u32,

    /// 每次推进的百分比
    #[serde(default = "default_step")]
    pub step: u32,
}

fn default_tick_ms() -> u32 {
    1000
}

fn default_step() -> u32 {
    10
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            step: default_step(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 设置数据库路径
    #[serde(default = "default_settings_path")]
    pub settings_path: PathBuf,

    /// 参考数据 JSON 目录，未设置时走 API
    #[serde(default)]
    pub reference_dir: Option<PathBuf>,
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("data/settings.sled")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
            reference_dir: None,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5070);
        assert_eq!(config.api.base_url, "https://api.quran.com/api/v4");
        assert_eq!(config.api.request_delay_ms, 500);
        assert_eq!(config.reader.default_translations, vec![131]);
        assert_eq!(config.reader.default_reciter_id, 7);
        assert_eq!(config.overlay.tick_ms, 1000);
        assert!(config.storage.reference_dir.is_none());
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "127.0.0.1:5070");
    }
}

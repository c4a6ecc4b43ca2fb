//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigBuilder, ConfigError as ConfigCrateError, Environment, File};
use config::builder::DefaultState;
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `QURAN_SERVER__PORT=8080`
/// - `QURAN_API__REQUEST_DELAY_MS=0`
/// - `QURAN_STORAGE__REFERENCE_DIR=data/reference`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置，`None` 时搜索默认文件名
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = with_defaults(Config::builder())?;

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 前缀 QURAN_，层级分隔符 __；列表值以逗号分隔
    builder = builder.add_source(
        Environment::with_prefix("QURAN")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("reader.default_translations")
            .try_parsing(true),
    );

    finish(builder)
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 5070)?
        .set_default("api.base_url", "https://api.quran.com/api/v4")?
        .set_default("api.qdc_url", "https://api.qurancdn.com/api/qdc")?
        .set_default("api.timeout_secs", 30)?
        .set_default("api.request_delay_ms", 500)?
        .set_default("reader.per_page", 10)?
        .set_default("reader.default_translations", vec![131])?
        .set_default("reader.default_reciter_id", 7)?
        .set_default("reader.default_tafsir_slug", "en-tafisr-ibn-kathir")?
        .set_default("reader.default_verse_key", "1:1")?
        .set_default("reader.locale", "en")?
        .set_default("overlay.tick_ms", 1000)?
        .set_default("overlay.step", 10)?
        .set_default("storage.settings_path", "data/settings.sled")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, ConfigError> {
    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.api.base_url.is_empty() || config.api.qdc_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "API URLs cannot be empty".to_string(),
        ));
    }

    if config.reader.per_page == 0 {
        return Err(ConfigError::ValidationError(
            "reader.per_page cannot be 0".to_string(),
        ));
    }

    if config.reader.default_translations.is_empty() {
        return Err(ConfigError::ValidationError(
            "reader.default_translations cannot be empty".to_string(),
        ));
    }

    if config.overlay.tick_ms == 0 {
        return Err(ConfigError::ValidationError(
            "overlay.tick_ms cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("API: {} (qdc: {})", config.api.base_url, config.api.qdc_url);
    tracing::info!(
        "API Timeout: {}s, Request Delay: {}ms",
        config.api.timeout_secs,
        config.api.request_delay_ms
    );
    tracing::info!(
        "Reader: per_page={}, translations={:?}, reciter={}, locale={}",
        config.reader.per_page,
        config.reader.default_translations,
        config.reader.default_reciter_id,
        config.reader.locale
    );
    tracing::info!("Settings DB: {:?}", config.storage.settings_path);
    match &config.storage.reference_dir {
        Some(dir) => tracing::info!("Reference Data: {:?}", dir),
        None => tracing::info!("Reference Data: remote API"),
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

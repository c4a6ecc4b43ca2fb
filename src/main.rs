//! Noble Quran - 古兰经阅读与诵读服务
//!
//! 启动顺序：配置 → 日志 → 适配器 → 存储 → 目录加载 → 译本监听 → HTTP 服务

use std::sync::Arc;

use noble_quran::application::ports::{QuranApiPort, ReferenceDataPort};
use noble_quran::application::stores::{
    AudioPlayer, ChapterStore, JuzStore, LoadingOverlay, PageStore, SettingsStore, TafsirStore,
    TranslationStore,
};
use noble_quran::config::{load_config, print_config, LogConfig};
use noble_quran::infrastructure::adapters::{
    ApiReferenceData, HttpQuranClient, HttpQuranClientConfig, JsonReferenceData,
};
use noble_quran::infrastructure::events::EventPublisher;
use noble_quran::infrastructure::http::{AppState, HttpServer, ServerConfig};
use noble_quran::infrastructure::persistence::SledSettingsStorage;
use noble_quran::infrastructure::worker::TranslationWatcher;

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},noble_quran={},tower_http=debug", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Noble Quran - 古兰经阅读与诵读服务");
    print_config(&config);

    // 远程 API 客户端
    let client_config = HttpQuranClientConfig::new(&config.api.base_url, &config.api.qdc_url)
        .with_timeout(config.api.timeout_secs)
        .with_request_delay(config.api.request_delay_ms);
    let api: Arc<dyn QuranApiPort> = Arc::new(HttpQuranClient::new(client_config)?);

    // 参考数据：本地 JSON 目录优先，否则走 API
    let reference: Arc<dyn ReferenceDataPort> = match &config.storage.reference_dir {
        Some(dir) => Arc::new(JsonReferenceData::new(dir.clone())),
        None => Arc::new(ApiReferenceData::new(api.clone(), config.reader.locale.clone())),
    };

    // 设置存储
    if let Some(parent) = config.storage.settings_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let settings_storage = SledSettingsStorage::open(&config.storage.settings_path)?.arc();

    let event_publisher = EventPublisher::new().arc();

    // 存储
    let translations = TranslationStore::new(
        reference.clone(),
        event_publisher.clone(),
        config.reader.default_translations.clone(),
    )
    .arc();

    let per_page = config.reader.per_page;
    let chapters = ChapterStore::new(
        api.clone(),
        reference.clone(),
        translations.clone(),
        event_publisher.clone(),
        per_page,
    )
    .arc();
    let juzs = JuzStore::new(
        api.clone(),
        reference.clone(),
        translations.clone(),
        event_publisher.clone(),
        per_page,
    )
    .arc();
    let pages = PageStore::new(
        api.clone(),
        reference.clone(),
        translations.clone(),
        event_publisher.clone(),
        per_page,
    )
    .arc();

    let overlay = LoadingOverlay::new(config.overlay.tick_ms, config.overlay.step).arc();
    let player = AudioPlayer::new(
        api.clone(),
        reference.clone(),
        event_publisher.clone(),
        overlay.clone(),
    )
    .with_chapters(chapters.clone())
    .with_reciter_id(config.reader.default_reciter_id)
    .arc();

    let tafsirs = TafsirStore::new(
        api.clone(),
        &config.reader.default_tafsir_slug,
        &config.reader.default_verse_key,
    )
    .arc();

    let settings = SettingsStore::new(settings_storage.clone()).arc();
    settings.initialize()?;

    // 目录加载失败不阻止启动，首次请求时重试
    if let Err(e) = chapters.load().await {
        tracing::warn!(error = %e, "Failed to load chapters catalog");
    }
    if let Err(e) = juzs.load().await {
        tracing::warn!(error = %e, "Failed to load juzs catalog");
    }
    if let Err(e) = pages.load().await {
        tracing::warn!(error = %e, "Failed to load pages catalog");
    }
    if let Err(e) = translations.load().await {
        tracing::warn!(error = %e, "Failed to load translations catalog");
    }
    if let Err(e) = player.load_reciters().await {
        tracing::warn!(error = %e, "Failed to load reciters");
    }

    // 译本监听：先订阅再广播初始选择
    let watcher = TranslationWatcher::new(&event_publisher, translations.clone())
        .register(chapters.clone())
        .register(juzs.clone())
        .register(pages.clone());
    tokio::spawn(watcher.run());
    translations.announce();

    // 创建 HTTP 服务器
    let server_config = ServerConfig::from(&config.server);
    let state = AppState {
        chapters,
        juzs,
        pages,
        translations,
        player,
        overlay,
        tafsirs,
        settings,
        event_publisher,
        locale: config.reader.locale.clone(),
    };

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    settings_storage.flush()?;
    tracing::info!("Server shutdown complete");

    Ok(())
}

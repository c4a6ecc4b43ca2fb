//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                      GET   健康检查
//! - /api/{chapter|juz|page}/list   GET   目录（?search= 检索）
//! - /api/{kind}/sort               POST  按字段排序（同字段切换方向）
//! - /api/{kind}/select             POST  选择容器
//! - /api/{kind}/verses             POST  拉取一页经文
//! - /api/{kind}/by_key             POST  按经文键拉取单节
//! - /api/{kind}/selected           GET   所选容器快照与标题数据
//! - /api/chapter/info              POST  章简介
//! - /api/juz/sections              GET   所选卷按章展开
//! - /api/translations/list         GET   译本目录与当前选择
//! - /api/translations/select       POST  替换译本选择
//! - /api/audio/play                POST  获取章音频
//! - /api/audio/next                POST  下一章（114 后回到 1）
//! - /api/audio/previous            POST  上一章
//! - /api/audio/reciter             POST  切换诵读者
//! - /api/audio/state               GET   播放器状态
//! - /api/audio/reciters            GET   诵读者目录
//! - /api/overlay                   GET   加载遮罩进度
//! - /api/tafsir/list               GET   经注资源
//! - /api/tafsir/get                POST  按 slug / 经文键获取经注
//! - /api/settings                  GET   设置
//! - /api/settings/audio_player     POST  保存播放器设置
//! - /api/settings/style            POST  保存样式设置
//! - /ws/events                     WS    应用事件推送

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers::{self, ContainerRoute};
use super::state::AppState;
use crate::domain::container::{Chapter, Juz, Page};

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws/events", get(handlers::events_websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest(
            "/chapter",
            container_routes::<Chapter>().route("/info", post(handlers::chapter_info)),
        )
        .nest(
            "/juz",
            container_routes::<Juz>().route("/sections", get(handlers::juz_sections)),
        )
        .nest("/page", container_routes::<Page>())
        .nest("/translations", translation_routes())
        .nest("/audio", audio_routes())
        .route("/overlay", get(handlers::overlay))
        .nest("/tafsir", tafsir_routes())
        .route("/settings", get(handlers::get_settings))
        .route("/settings/audio_player", post(handlers::save_audio_player_setting))
        .route("/settings/style", post(handlers::save_style_setting))
}

/// 三种容器共用的路由
fn container_routes<M: ContainerRoute>() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list::<M>))
        .route("/sort", post(handlers::sort::<M>))
        .route("/select", post(handlers::select::<M>))
        .route("/verses", post(handlers::fetch_page::<M>))
        .route("/by_key", post(handlers::fetch_by_key::<M>))
        .route("/selected", get(handlers::selected::<M>))
}

fn translation_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_translations))
        .route("/select", post(handlers::select_translations))
}

fn audio_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/play", post(handlers::play))
        .route("/next", post(handlers::play_next))
        .route("/previous", post(handlers::play_previous))
        .route("/reciter", post(handlers::change_reciter))
        .route("/state", get(handlers::player_state))
        .route("/reciters", get(handlers::list_reciters))
}

fn tafsir_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_tafsirs))
        .route("/get", post(handlers::get_tafsir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::ReferenceDataPort;
    use crate::application::stores::{
        AudioPlayer, ChapterStore, JuzStore, LoadingOverlay, PageStore, SettingsStore,
        TafsirStore, TranslationStore,
    };
    use crate::application::stores::test_verse;
    use crate::domain::container::{sample_chapter, ContainerKind};
    use crate::infrastructure::adapters::{fake_pagination, FakeQuranClient};
    use crate::infrastructure::events::EventPublisher;
    use crate::infrastructure::memory::{InMemoryReferenceData, InMemorySettingsStorage};
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn app() -> Router {
        let api = Arc::new(FakeQuranClient::new().with_page(
            ContainerKind::Chapter,
            1,
            1,
            (1..=7).map(|n| test_verse(&format!("1:{}", n))).collect(),
            fake_pagination(1, 10, 7),
        ));
        let events = EventPublisher::new().arc();
        let reference: Arc<dyn ReferenceDataPort> = Arc::new(InMemoryReferenceData::new().with_chapters(vec![
            sample_chapter(1, "Al-Fatihah", "الفاتحة"),
            sample_chapter(2, "Al-Baqarah", "البقرة"),
        ]));
        let translations = TranslationStore::new(reference.clone(), events.clone(), vec![131]).arc();
        let chapters = ChapterStore::new(api.clone(), reference.clone(), translations.clone(), events.clone(), 10).arc();
        let juzs = JuzStore::new(api.clone(), reference.clone(), translations.clone(), events.clone(), 10).arc();
        let pages = PageStore::new(api.clone(), reference.clone(), translations.clone(), events.clone(), 10).arc();
        let overlay = LoadingOverlay::new(1000, 10).arc();
        let player = AudioPlayer::new(api.clone(), reference, events.clone(), overlay.clone())
            .with_chapters(chapters.clone())
            .arc();

        let state = AppState {
            chapters,
            juzs,
            pages,
            translations,
            player,
            overlay,
            tafsirs: TafsirStore::new(api, "en-tafisr-ibn-kathir", "1:1").arc(),
            settings: SettingsStore::new(Arc::new(InMemorySettingsStorage::new())).arc(),
            event_publisher: events,
            locale: "en".to_string(),
        };

        create_routes().with_state(Arc::new(state))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Value {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let app = app();
        let body = call(&app, Method::GET, "/api/ping", None).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_chapter_list_and_search() {
        let app = app();
        let body = call(&app, Method::GET, "/api/chapter/list", None).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);

        let body = call(&app, Method::GET, "/api/chapter/list?search=baq", None).await;
        assert_eq!(body["data"]["items"][0]["id"], 2);
    }

    #[tokio::test]
    async fn test_fetch_verses_then_selected_header() {
        let app = app();
        call(&app, Method::GET, "/api/chapter/list", None).await;
        call(&app, Method::POST, "/api/chapter/select", Some(serde_json::json!({"id": 1}))).await;

        let body = call(
            &app,
            Method::POST,
            "/api/chapter/verses",
            Some(serde_json::json!({"id": 1, "force_loading": true})),
        )
        .await;
        assert_eq!(body["data"]["verses"].as_array().unwrap().len(), 7);

        let body = call(&app, Method::GET, "/api/chapter/selected", None).await;
        assert_eq!(body["data"]["header"]["chapter"]["en"], "Al-Fatihah");
        assert_eq!(body["data"]["verse_keys"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_unknown_container_maps_to_errno() {
        let app = app();
        call(&app, Method::GET, "/api/chapter/list", None).await;
        let body = call(&app, Method::POST, "/api/chapter/select", Some(serde_json::json!({"id": 200}))).await;
        assert_eq!(body["errno"], 404);
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_audio_play_and_state() {
        let app = app();
        let body = call(&app, Method::POST, "/api/audio/play", Some(serde_json::json!({"chapter_id": 2}))).await;
        assert_eq!(body["data"]["audio_file"]["audio_url"], "https://audio.test/7/2.mp3");
        assert_eq!(body["data"]["player"]["phase"], "ready");

        let body = call(&app, Method::GET, "/api/audio/state", None).await;
        assert_eq!(body["data"]["chapter_id"], 2);
    }

    #[tokio::test]
    async fn test_settings_defaults_and_save() {
        let app = app();
        let body = call(&app, Method::GET, "/api/settings", None).await;
        assert_eq!(body["data"]["audio_player"]["autoPlay"], true);
        assert_eq!(body["data"]["verses_per_page_options"][0], 10);

        let setting = serde_json::json!({
            "fullwidth": true, "autoPlay": false, "dismissOnEnd": true,
            "autoScroll": true, "tooltip": false
        });
        call(&app, Method::POST, "/api/settings/audio_player", Some(setting)).await;

        let body = call(&app, Method::GET, "/api/settings", None).await;
        assert_eq!(body["data"]["audio_player"]["autoPlay"], false);
    }

    #[tokio::test]
    async fn test_empty_translation_selection_is_bad_request() {
        let app = app();
        let body = call(&app, Method::POST, "/api/translations/select", Some(serde_json::json!({"ids": []}))).await;
        assert_eq!(body["errno"], 400);
    }
}

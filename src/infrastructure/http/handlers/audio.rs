//! Audio Handlers - 播放序列与加载遮罩

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::stores::{AudioRequest, PlayerSnapshot};
use crate::domain::audio::{AudioDescriptor, Reciter};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PlayRequest {
    pub chapter_id: u32,
    #[serde(default)]
    pub verse_key: Option<String>,
    #[serde(default)]
    pub audio_src: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NextRequest {
    #[serde(default)]
    pub audio_src: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeReciterRequest {
    pub reciter_id: u32,
}

/// 播放操作结果：本次得到的音频描述及操作后的播放器状态
#[derive(Debug, Serialize)]
pub struct PlaybackResponse {
    pub audio_file: Option<AudioDescriptor>,
    pub player: PlayerSnapshot,
}

#[derive(Debug, Serialize)]
pub struct RecitersResponse {
    pub reciters: Vec<Reciter>,
    pub by_style: BTreeMap<String, Vec<Reciter>>,
    pub selected: Reciter,
    pub initials: String,
    pub avatar: String,
    pub playback_speeds: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct OverlayResponse {
    pub progress: u32,
    pub running: bool,
    pub app_loading: bool,
}

fn playback(state: &AppState, audio_file: Option<AudioDescriptor>) -> Json<ApiResponse<PlaybackResponse>> {
    Json(ApiResponse::success(PlaybackResponse {
        audio_file,
        player: state.player.snapshot(),
    }))
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn play(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PlayRequest>,
) -> Result<Json<ApiResponse<PlaybackResponse>>, ApiError> {
    let request = AudioRequest {
        chapter_id: req.chapter_id,
        verse_key: req.verse_key,
        audio_src: req.audio_src,
    };
    let audio_file = state.player.get_audio(request).await?;
    Ok(playback(&state, audio_file))
}

pub async fn play_next(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NextRequest>,
) -> Result<Json<ApiResponse<PlaybackResponse>>, ApiError> {
    let audio_file = state.player.play_next(req.audio_src).await?;
    Ok(playback(&state, audio_file))
}

pub async fn play_previous(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<PlaybackResponse>>, ApiError> {
    let audio_file = state.player.play_previous().await?;
    Ok(playback(&state, audio_file))
}

pub async fn change_reciter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChangeReciterRequest>,
) -> Result<Json<ApiResponse<PlaybackResponse>>, ApiError> {
    let audio_file = state.player.change_reciter_by_id(req.reciter_id).await?;
    Ok(playback(&state, audio_file))
}

pub async fn player_state(State(state): State<Arc<AppState>>) -> Json<ApiResponse<PlayerSnapshot>> {
    Json(ApiResponse::success(state.player.snapshot()))
}

pub async fn list_reciters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<RecitersResponse>>, ApiError> {
    let player = &state.player;
    player.load_reciters().await?;

    Ok(Json(ApiResponse::success(RecitersResponse {
        reciters: player.reciters(),
        by_style: player.reciters_by_style(),
        selected: player.reciter(),
        initials: player.reciter_initials(),
        avatar: player.avatar_placeholder(),
        playback_speeds: player.playback_speeds().to_vec(),
    })))
}

pub async fn overlay(State(state): State<Arc<AppState>>) -> Json<ApiResponse<OverlayResponse>> {
    Json(ApiResponse::success(OverlayResponse {
        progress: state.overlay.progress(),
        running: state.overlay.is_running(),
        app_loading: state.overlay.is_app_loading(),
    }))
}

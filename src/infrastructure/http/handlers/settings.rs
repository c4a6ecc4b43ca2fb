//! Settings Handlers

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::application::ports::StoredValue;
use crate::domain::settings::{AudioPlayerSetting, StyleSetting, FONT_FAMILIES};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub audio_player: AudioPlayerSetting,
    pub style: StyleSetting,
    pub verses_per_page_options: Vec<u32>,
    pub font_families: Vec<&'static str>,
}

pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SettingsResponse>>, ApiError> {
    let settings = &state.settings;
    Ok(Json(ApiResponse::success(SettingsResponse {
        audio_player: settings.audio_player_setting()?,
        style: settings.style_setting()?,
        verses_per_page_options: settings.verses_per_page_options().to_vec(),
        font_families: FONT_FAMILIES.to_vec(),
    })))
}

pub async fn save_audio_player_setting(
    State(state): State<Arc<AppState>>,
    Json(setting): Json<AudioPlayerSetting>,
) -> Result<Json<ApiResponse<StoredValue>>, ApiError> {
    let stored = state.settings.set_audio_player_setting(&setting)?;
    Ok(Json(ApiResponse::success(stored)))
}

pub async fn save_style_setting(
    State(state): State<Arc<AppState>>,
    Json(setting): Json<StyleSetting>,
) -> Result<Json<ApiResponse<StoredValue>>, ApiError> {
    let stored = state.settings.set_style_setting(&setting)?;
    Ok(Json(ApiResponse::success(stored)))
}

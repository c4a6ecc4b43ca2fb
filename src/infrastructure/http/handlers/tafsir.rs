//! Tafsir Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::tafsir::{Tafsir, TafsirResource};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Serialize)]
pub struct TafsirResourcesResponse {
    pub resources: Vec<TafsirResource>,
    pub languages: Vec<String>,
    pub selected_language: String,
    pub slug: String,
    pub verse_key: String,
}

#[derive(Debug, Deserialize)]
pub struct TafsirRequest {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub verse_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TafsirResponse {
    pub tafsir: Tafsir,
    pub language_prefix: String,
}

pub async fn list_tafsirs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<TafsirResourcesResponse>>, ApiError> {
    let store = &state.tafsirs;
    store.load_resources().await?;

    Ok(Json(ApiResponse::success(TafsirResourcesResponse {
        resources: store.resources(),
        languages: store.languages(),
        selected_language: store.language(),
        slug: store.slug(),
        verse_key: store.verse_key(),
    })))
}

/// 更新 slug / 经文键并返回对应经注
pub async fn get_tafsir(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TafsirRequest>,
) -> Result<Json<ApiResponse<TafsirResponse>>, ApiError> {
    let tafsir = state.tafsirs.select(req.slug, req.verse_key).await?;
    let language_prefix = tafsir.language_prefix().to_string();
    Ok(Json(ApiResponse::success(TafsirResponse {
        tafsir,
        language_prefix,
    })))
}

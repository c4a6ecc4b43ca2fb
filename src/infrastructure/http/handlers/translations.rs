//! Translation Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::translation::Translation;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Serialize)]
pub struct TranslationsResponse {
    pub grouped: BTreeMap<String, Vec<Translation>>,
    pub selected_ids: Vec<u32>,
    pub selected: Vec<Translation>,
    pub authors_label: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectTranslationsRequest {
    pub ids: Vec<u32>,
}

#[derive(Debug, Serialize)]
pub struct SelectTranslationsResponse {
    pub ids: String,
    pub changed: bool,
}

pub async fn list_translations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<TranslationsResponse>>, ApiError> {
    let store = &state.translations;
    store.load().await?;

    Ok(Json(ApiResponse::success(TranslationsResponse {
        grouped: store.grouped(),
        selected_ids: store.selected_ids(),
        selected: store.selected(),
        authors_label: store.authors_label(),
    })))
}

/// 替换译本选择；变更后由 TranslationWatcher 异步刷新容器
pub async fn select_translations(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectTranslationsRequest>,
) -> Result<Json<ApiResponse<SelectTranslationsResponse>>, ApiError> {
    let changed = state.translations.set_selected(req.ids)?;
    Ok(Json(ApiResponse::success(SelectTranslationsResponse {
        ids: state.translations.ids_string(),
        changed,
    })))
}

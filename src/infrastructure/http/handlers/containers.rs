//! Container Handlers - 章 / 卷 / 页共用
//!
//! 每个 handler 对容器元数据类型泛型，通过 [`ContainerRoute`] 从状态中取出对应存储

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::stores::{CatalogEntry, ContainerSnapshot, ContainerStore, SortState};
use crate::domain::container::{Chapter, ChapterInfo, ChapterSection, HeaderData, Juz, Page};
use crate::domain::verse::Verse;
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 从应用状态中取出某种容器的存储
pub trait ContainerRoute: CatalogEntry {
    fn store(state: &AppState) -> &Arc<ContainerStore<Self>>;
}

impl ContainerRoute for Chapter {
    fn store(state: &AppState) -> &Arc<ContainerStore<Self>> {
        &state.chapters
    }
}

impl ContainerRoute for Juz {
    fn store(state: &AppState) -> &Arc<ContainerStore<Self>> {
        &state.juzs
    }
}

impl ContainerRoute for Page {
    fn store(state: &AppState) -> &Arc<ContainerStore<Self>> {
        &state.pages
    }
}

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse<M> {
    pub items: Vec<M>,
    pub sort: SortState,
    pub selected_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SortRequest {
    pub field: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub id: u32,
}

#[derive(Debug, Deserialize)]
pub struct FetchPageRequest {
    pub id: u32,
    #[serde(default)]
    pub force_loading: bool,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct FetchByKeyRequest {
    pub id: u32,
    pub verse_key: String,
}

#[derive(Debug, Serialize)]
pub struct SelectedResponse<M> {
    pub container: Option<ContainerSnapshot<M>>,
    pub header: Option<HeaderData>,
    pub first_verse: Option<Verse>,
    pub last_verse: Option<Verse>,
    pub verse_keys: Vec<String>,
    pub is_loading: bool,
    pub loading_length: u32,
}

#[derive(Debug, Serialize)]
pub struct JuzSectionsResponse {
    pub by_chapter: BTreeMap<u32, Vec<Verse>>,
    pub sections: Vec<ChapterSection>,
}

// ============================================================================
// Generic handlers
// ============================================================================

/// 目录列表，可带检索词
pub async fn list<M: ContainerRoute>(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<ListResponse<M>>>, ApiError> {
    let store = M::store(&state);
    store.load().await?;

    let items = match query.search.as_deref() {
        Some(term) => store.search(term),
        None => store.list(),
    };

    Ok(Json(ApiResponse::success(ListResponse {
        items,
        sort: store.sort_state(),
        selected_id: store.selected_id(),
    })))
}

pub async fn sort<M: ContainerRoute>(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SortRequest>,
) -> Result<Json<ApiResponse<SortState>>, ApiError> {
    Ok(Json(ApiResponse::success(M::store(&state).sort(&req.field))))
}

pub async fn select<M: ContainerRoute>(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    M::store(&state).select(req.id)?;
    Ok(Json(ApiResponse::ok()))
}

/// 拉取一页经文并返回该容器的快照
pub async fn fetch_page<M: ContainerRoute>(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FetchPageRequest>,
) -> Result<Json<ApiResponse<Option<ContainerSnapshot<M>>>>, ApiError> {
    let store = M::store(&state);
    store
        .fetch_page(req.id, req.force_loading, req.page, req.limit)
        .await?;
    Ok(Json(ApiResponse::success(store.snapshot(req.id))))
}

pub async fn fetch_by_key<M: ContainerRoute>(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FetchByKeyRequest>,
) -> Result<Json<ApiResponse<Option<ContainerSnapshot<M>>>>, ApiError> {
    let store = M::store(&state);
    store.fetch_by_key(req.id, &req.verse_key).await?;
    Ok(Json(ApiResponse::success(store.snapshot(req.id))))
}

/// 当前所选容器及其派生数据
pub async fn selected<M: ContainerRoute>(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SelectedResponse<M>>>, ApiError> {
    let store = M::store(&state);
    let chapters = state.chapters.clone();

    Ok(Json(ApiResponse::success(SelectedResponse {
        container: store.selected(),
        header: store.header(|id| chapters.chapter_name(id)),
        first_verse: store.first_verse(),
        last_verse: store.last_verse(),
        verse_keys: store.verse_keys(),
        is_loading: store.is_loading(),
        loading_length: store.loading_length(),
    })))
}

// ============================================================================
// Kind-specific handlers
// ============================================================================

pub async fn chapter_info(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<ApiResponse<ChapterInfo>>, ApiError> {
    let info = state.chapters.chapter_info(req.id, &state.locale).await?;
    Ok(Json(ApiResponse::success(info)))
}

pub async fn juz_sections(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<JuzSectionsResponse>>, ApiError> {
    Ok(Json(ApiResponse::success(JuzSectionsResponse {
        by_chapter: state.juzs.verses_by_chapter(),
        sections: state.juzs.chapter_sections(),
    })))
}

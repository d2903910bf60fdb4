use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{ItemOutcome, MediaType, SearchFilters, SearchQuery},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
    /// Comma-separated media types, searched one primary call each
    #[serde(default = "default_media_type")]
    media_type: String,
}

fn default_media_type() -> String {
    MediaType::Image.to_string()
}

fn parse_media_types(raw: &str) -> AppResult<Vec<MediaType>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<MediaType>().map_err(AppError::Validation))
        .collect()
}

/// Handler for text search across one or more media types
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<ItemOutcome>>> {
    let media_types = parse_media_types(&params.media_type)?;

    tracing::info!(
        request_id = %request_id,
        query = %params.q,
        media_types = ?media_types,
        "Processing search request"
    );

    let outcomes = state
        .search_service
        .search_media_types(&params.q, &media_types)
        .await?;

    tracing::info!(
        request_id = %request_id,
        results = outcomes.len(),
        "Search completed"
    );

    Ok(Json(outcomes))
}

/// Handler for a search with the full filter set
pub async fn search_filters(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(filters): Json<SearchFilters>,
) -> AppResult<Json<Vec<ItemOutcome>>> {
    let query = SearchQuery::new(filters)?;

    tracing::info!(
        request_id = %request_id,
        params = ?query.params(),
        "Processing filtered search request"
    );

    let outcomes = state.search_service.search_query(query).await?;
    Ok(Json(outcomes))
}

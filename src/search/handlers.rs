use super::engine::SearchEngine;
use super::sync::Indexable;
use super::types::{ReindexResponse, SearchParams, SearchResponse};
use crate::config::PER_PAGE;
use crate::error::AppError;
use crate::pagination::neighbours;
use crate::sets::types::SetSummary;
use crate::storage::types::Set;
use crate::users::extract::CurrentUser;

use axum::extract::Query;
use axum::{Extension, Json};
use std::sync::Arc;

/// `GET /search?term=..&page=..`
pub async fn handle_search(
    Query(params): Query<SearchParams>,
    Extension(engine): Extension<Arc<SearchEngine>>,
) -> Result<Json<SearchResponse>, AppError> {
    let term = params.term.unwrap_or_default();
    let page = params.page.unwrap_or(1).max(1);

    let (sets, total) = engine.search_sets(&term, page, PER_PAGE).await?;
    let (next_url, prev_url) = neighbours("/search", Some(&term), page, PER_PAGE, total);

    Ok(Json(SearchResponse {
        term,
        total,
        page,
        sets: sets.iter().map(SetSummary::from).collect(),
        next_url,
        prev_url,
    }))
}

/// `POST /admin/reindex`: rebuilds the set index from the store.
pub async fn handle_reindex(
    CurrentUser(user): CurrentUser,
    Extension(engine): Extension<Arc<SearchEngine>>,
) -> Result<Json<ReindexResponse>, AppError> {
    if !user.is_admin {
        return Err(AppError::Forbidden("Unauthorized.".to_string()));
    }

    let indexed = engine.reindex_sets().await?;
    tracing::info!("Admin {} reindexed {} sets", user.username, indexed);

    Ok(Json(ReindexResponse {
        index: Set::INDEX.to_string(),
        indexed,
    }))
}

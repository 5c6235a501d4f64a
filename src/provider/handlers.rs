use super::client::PassageProvider;
use super::types::{VerseInfo, VerseLookupParams, VerseLookupResponse};
use crate::error::AppError;

use axum::extract::Query;
use axum::{Extension, Json};
use std::sync::Arc;

/// `GET /api/verse?reference=..&get_verse_num=..`: raw provider lookup for the
/// set editor's live preview.
pub async fn handle_lookup_verse(
    Query(params): Query<VerseLookupParams>,
    Extension(provider): Extension<Arc<dyn PassageProvider>>,
) -> Result<Json<VerseLookupResponse>, AppError> {
    let response = provider
        .fetch(&params.reference, params.get_verse_num)
        .await?;

    Ok(Json(VerseLookupResponse {
        info: VerseInfo {
            passages: response.passages.as_display().to_string(),
            reference: response.reference,
        },
    }))
}

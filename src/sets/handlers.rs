use super::service::SetService;
use super::types::{
    Card, CardsResponse, FavoriteResponse, PageParams, SetDetail, SetForm, SetListResponse,
};
use crate::config::PER_PAGE;
use crate::error::AppError;
use crate::storage::types::SetId;
use crate::users::extract::CurrentUser;

use axum::extract::{Path, Query};
use axum::response::Redirect;
use axum::{Extension, Json};
use std::sync::Arc;

fn set_location(set_id: SetId) -> Redirect {
    Redirect::to(&format!("/sets/{}", set_id))
}

/// `POST /sets`
pub async fn handle_create_set(
    CurrentUser(user): CurrentUser,
    Extension(sets): Extension<Arc<SetService>>,
    Json(form): Json<SetForm>,
) -> Result<Redirect, AppError> {
    let set = sets.create_set(&user, form).await?;
    Ok(set_location(set.id))
}

/// `POST /sets/:set_id/edit`
pub async fn handle_edit_set(
    CurrentUser(user): CurrentUser,
    Path(set_id): Path<SetId>,
    Extension(sets): Extension<Arc<SetService>>,
    Json(form): Json<SetForm>,
) -> Result<Redirect, AppError> {
    let set = sets.edit_set(&user, set_id, form).await?;
    Ok(set_location(set.id))
}

/// `POST /sets/:set_id/copy`
pub async fn handle_copy_set(
    CurrentUser(user): CurrentUser,
    Path(set_id): Path<SetId>,
    Extension(sets): Extension<Arc<SetService>>,
    Json(form): Json<SetForm>,
) -> Result<Redirect, AppError> {
    let set = sets.copy_set(&user, set_id, form).await?;
    Ok(set_location(set.id))
}

/// `POST /sets/:set_id/delete`
pub async fn handle_delete_set(
    CurrentUser(user): CurrentUser,
    Path(set_id): Path<SetId>,
    Extension(sets): Extension<Arc<SetService>>,
) -> Result<Redirect, AppError> {
    sets.delete_set(&user, set_id).await?;
    Ok(Redirect::to("/explore"))
}

/// `GET /sets/:set_id`
pub async fn handle_show_set(
    viewer: Option<CurrentUser>,
    Path(set_id): Path<SetId>,
    Extension(sets): Extension<Arc<SetService>>,
) -> Result<Json<SetDetail>, AppError> {
    let viewer = viewer.map(|CurrentUser(user)| user);
    Ok(Json(sets.set_detail(set_id, viewer.as_ref())?))
}

/// `GET /api/sets/:set_id`: flash cards in set order.
pub async fn handle_set_cards(
    Path(set_id): Path<SetId>,
    Extension(sets): Extension<Arc<SetService>>,
) -> Result<Json<CardsResponse>, AppError> {
    let cards = sets
        .verses(set_id)?
        .into_iter()
        .map(Card::from)
        .collect();
    Ok(Json(CardsResponse { cards }))
}

/// `POST /api/sets/:set_id/favorite`
pub async fn handle_toggle_favorite(
    CurrentUser(user): CurrentUser,
    Path(set_id): Path<SetId>,
    Extension(sets): Extension<Arc<SetService>>,
) -> Result<Json<FavoriteResponse>, AppError> {
    let toggle = sets.toggle_favorite(&user, set_id)?;
    Ok(Json(FavoriteResponse {
        message: toggle.message().to_string(),
    }))
}

/// `GET /explore?page=..`
pub async fn handle_explore(
    Query(params): Query<PageParams>,
    Extension(sets): Extension<Arc<SetService>>,
) -> Json<SetListResponse> {
    let page = sets.explore(params.page.unwrap_or(1), PER_PAGE);
    Json(SetListResponse::from_page("/explore", page))
}

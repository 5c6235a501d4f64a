use super::extract::CurrentUser;
use super::types::{DeletedUserResponse, EditUserForm, ProfileResponse, RegisterForm, UserProfile};
use crate::config::PER_PAGE;
use crate::error::AppError;
use crate::search::engine::SearchEngine;
use crate::search::sync::Changes;
use crate::sets::types::{PageParams, SetListResponse};
use crate::storage::memory::Database;
use crate::storage::types::{NewUser, Page, UserId};

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

fn check_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    let chars = value.trim().chars().count();
    if chars == 0 || chars > max {
        return Err(AppError::validation(
            field,
            &format!("Field must be between 1 and {} characters long.", max),
        ));
    }
    Ok(())
}

/// `POST /users`
pub async fn handle_register(
    Extension(db): Extension<Arc<Database>>,
    Json(form): Json<RegisterForm>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    check_length("username", &form.username, 30)?;
    check_length("first_name", &form.first_name, 50)?;
    check_length("last_name", &form.last_name, 50)?;
    if !form.email.contains('@') {
        return Err(AppError::validation("email", "Invalid email address."));
    }
    if db.email_in_use(form.email.trim()) {
        return Err(AppError::validation(
            "email",
            "This email is already being used",
        ));
    }

    let user = db.insert_user(NewUser {
        username: form.username.trim().to_string(),
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        email: form.email.trim().to_string(),
        is_admin: false,
    })?;

    tracing::info!("Registered user {} ({})", user.id, user.username);
    Ok((StatusCode::CREATED, Json(UserProfile::from(&user))))
}

/// `GET /users/:user_id`: profile and the user's own sets.
pub async fn handle_show_profile(
    Path(user_id): Path<UserId>,
    Query(params): Query<PageParams>,
    Extension(db): Extension<Arc<Database>>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = db.get_user(user_id).ok_or(AppError::NotFound)?;
    let page = Page::from_vec(db.sets_by_owner(user.id), params.page.unwrap_or(1), PER_PAGE);

    Ok(Json(ProfileResponse {
        user: UserProfile::from(&user),
        listing: SetListResponse::from_page(&format!("/users/{}", user.id), page),
    }))
}

/// `GET /users/:user_id/favorites`
pub async fn handle_show_favorites(
    Path(user_id): Path<UserId>,
    Query(params): Query<PageParams>,
    Extension(db): Extension<Arc<Database>>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = db.get_user(user_id).ok_or(AppError::NotFound)?;
    let page = Page::from_vec(db.favorite_sets(user.id), params.page.unwrap_or(1), PER_PAGE);

    Ok(Json(ProfileResponse {
        user: UserProfile::from(&user),
        listing: SetListResponse::from_page(&format!("/users/{}/favorites", user.id), page),
    }))
}

/// `POST /users/:user_id/edit`: a user may only edit themselves.
pub async fn handle_edit_profile(
    CurrentUser(current): CurrentUser,
    Path(user_id): Path<UserId>,
    Extension(db): Extension<Arc<Database>>,
    Json(form): Json<EditUserForm>,
) -> Result<Json<UserProfile>, AppError> {
    if current.id != user_id {
        return Err(AppError::NotFound);
    }
    check_length("username", &form.username, 30)?;
    check_length("first_name", &form.first_name, 50)?;
    check_length("last_name", &form.last_name, 50)?;

    let mut user = current;
    user.username = form.username.trim().to_string();
    user.first_name = form.first_name.trim().to_string();
    user.last_name = form.last_name.trim().to_string();
    user.bio = form.bio.filter(|bio| !bio.trim().is_empty());

    let user = db.update_user(user)?;
    tracing::info!("User {} edited their profile", user.id);
    Ok(Json(UserProfile::from(&user)))
}

/// `POST /admin/users/:user_id/delete`: removes a user and everything they own.
pub async fn handle_delete_user(
    CurrentUser(admin): CurrentUser,
    Path(user_id): Path<UserId>,
    Extension(db): Extension<Arc<Database>>,
    Extension(engine): Extension<Arc<SearchEngine>>,
) -> Result<Json<DeletedUserResponse>, AppError> {
    if !admin.is_admin {
        return Err(AppError::Forbidden("Unauthorized.".to_string()));
    }

    let deleted = db.delete_user(user_id)?;
    let deleted_sets = deleted.len();
    engine
        .synchronizer()
        .after_commit(Changes::deleted(deleted))
        .await;

    tracing::info!(
        "Admin {} deleted user {} and {} sets",
        admin.id,
        user_id,
        deleted_sets
    );
    Ok(Json(DeletedUserResponse {
        user_id,
        deleted_sets,
    }))
}

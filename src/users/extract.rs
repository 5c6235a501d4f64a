use crate::error::AppError;
use crate::storage::memory::Database;
use crate::storage::types::User;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::sync::Arc;

/// Header carrying the id of the user the front end has logged in.
pub const USER_HEADER: &str = "x-user-id";

/// The acting user. Rejects with 401 when the header is missing, malformed or
/// names an unknown user; wrap in `Option` for endpoints open to anonymous callers.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let db = parts
            .extensions
            .get::<Arc<Database>>()
            .cloned()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Database extension missing")))?;

        let user_id = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i64>().ok())
            .ok_or(AppError::Unauthorized)?;

        db.get_user(user_id)
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}

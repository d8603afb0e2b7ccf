//! Users: list, read, their favorites, and self-deletion.

use crate::error::AppError;
use crate::extractors::{ApiQuery, AuthUser, Pagination};
use crate::handlers::parse_id;
use crate::response::{message, success_many, success_one, MSG_OK};
use crate::service::{FavoriteService, UserService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub async fn list_users(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let users = UserService::list(&state.pool, &page).await?;
    Ok(success_many(users))
}

pub async fn read_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::get(&state.pool, parse_id(&id)?).await?;
    Ok(success_one(user))
}

/// GET /users/:id/favorites
pub async fn list_user_favorites(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::get(&state.pool, parse_id(&id)?).await?;
    let favorites = FavoriteService::list_for_user(&state.pool, user.id).await?;
    Ok(success_many(favorites))
}

/// DELETE /users/:id — only the token's own account; favorites cascade.
pub async fn delete_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::get(&state.pool, parse_id(&id)?).await?;
    if user.email != auth.email {
        return Err(AppError::Unauthorized("can only delete your own account".into()));
    }
    UserService::delete(&state.pool, user.id).await?;
    Ok(message(MSG_OK))
}

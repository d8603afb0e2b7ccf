//! Favorites: add and remove by target, and the protected `/favorites` listing.

use crate::error::AppError;
use crate::extractors::{ApiQuery, AuthUser};
use crate::handlers::parse_id;
use crate::model::{FavoriteKind, FavoriteView};
use crate::response::{message, MSG_FAVORITE_REMOVED, MSG_OK};
use crate::service::{delete_owner, FavoriteService, UserService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct OwnerQuery {
    pub user_id: Option<i64>,
}

#[derive(Serialize)]
pub struct LoggedIn {
    pub logged_in_as: String,
    pub results: Vec<FavoriteView>,
}

/// `user_id` from the JSON body; an integer or a string of digits.
fn body_user_id(body: Option<Json<Value>>) -> Result<i64, AppError> {
    let missing = || AppError::BadRequest("user_id is required".into());
    let Some(Json(body)) = body else {
        return Err(missing());
    };
    match body.get("user_id") {
        Some(Value::Number(n)) => n.as_i64().ok_or_else(missing),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| missing()),
        _ => Err(missing()),
    }
}

async fn add(
    state: &AppState,
    kind: FavoriteKind,
    id_str: &str,
    body: Option<Json<Value>>,
) -> Result<impl IntoResponse, AppError> {
    let target = kind.target(parse_id(id_str)?);
    let user_id = body_user_id(body)?;
    FavoriteService::add(&state.pool, user_id, target).await?;
    Ok(message(MSG_OK))
}

async fn remove(
    state: &AppState,
    kind: FavoriteKind,
    id_str: &str,
    query: OwnerQuery,
) -> Result<impl IntoResponse, AppError> {
    let target = kind.target(parse_id(id_str)?);
    let owner = delete_owner(state.delete_scope, query.user_id)?;
    FavoriteService::remove(&state.pool, target, owner).await?;
    Ok(message(MSG_FAVORITE_REMOVED))
}

/// POST /favorite/people/:id
pub async fn add_person_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<Value>>,
) -> Result<impl IntoResponse, AppError> {
    add(&state, FavoriteKind::People, &id, body).await
}

/// POST /favorite/planet/:id
pub async fn add_planet_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<Value>>,
) -> Result<impl IntoResponse, AppError> {
    add(&state, FavoriteKind::Planet, &id, body).await
}

/// DELETE /favorite/people/:id
pub async fn remove_person_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<OwnerQuery>,
) -> Result<impl IntoResponse, AppError> {
    remove(&state, FavoriteKind::People, &id, query).await
}

/// DELETE /favorite/planet/:id
pub async fn remove_planet_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<OwnerQuery>,
) -> Result<impl IntoResponse, AppError> {
    remove(&state, FavoriteKind::Planet, &id, query).await
}

/// GET /favorites — the caller's identity and favorites.
pub async fn my_favorites(auth: AuthUser, State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let user = UserService::find_by_email(&state.pool, &auth.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("token subject no longer exists".into()))?;
    let results = FavoriteService::list_for_user(&state.pool, user.id).await?;
    Ok(Json(LoggedIn {
        logged_in_as: auth.email,
        results,
    }))
}

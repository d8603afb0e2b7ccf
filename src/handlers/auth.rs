//! POST /signup and POST /login.

use crate::error::AppError;
use crate::handlers::json_body;
use crate::response::success_one_created;
use crate::service::{AuthService, LoginRequest, SignupRequest};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct TokenBody {
    pub access_token: String,
}

pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = json_body(payload)?;
    let user = AuthService::signup(&state.pool, req).await?;
    Ok(success_one_created(user))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = json_body(payload)?;
    let access_token = AuthService::login(&state.pool, &state.tokens, req).await?;
    Ok(Json(TokenBody { access_token }))
}

//! Signup, login and token verification.

use crate::auth::{hash_password, verify_password, TokenKeys};
use crate::error::AppError;
use crate::model::{NewUser, User};
use crate::service::validation::{normalize_email, CredentialsValidator};
use crate::service::UserService;
use serde::Deserialize;
use sqlx::AnyPool;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub struct AuthService;

impl AuthService {
    /// Register a user with a salted hash of `password`.
    pub async fn signup(pool: &AnyPool, req: SignupRequest) -> Result<User, AppError> {
        CredentialsValidator::validate_signup(&req.email, &req.password)?;
        let email = normalize_email(&req.email);
        let password = req.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::Hash(e.to_string()))??;
        let new_user = NewUser {
            email,
            password_hash,
            first_name: req.first_name.filter(|s| !s.trim().is_empty()),
            last_name: req.last_name.filter(|s| !s.trim().is_empty()),
        };
        UserService::create(pool, &new_user).await
    }

    /// Check credentials and issue a bearer token for the user's email.
    pub async fn login(pool: &AnyPool, keys: &TokenKeys, req: LoginRequest) -> Result<String, AppError> {
        CredentialsValidator::require(&req.email, &req.password)?;
        let email = normalize_email(&req.email);
        let user = UserService::find_by_email(pool, &email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {} does not exist", email)))?;

        let password = req.password;
        let stored = user.password_hash;
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
            .await
            .map_err(|e| AppError::Hash(e.to_string()))??;
        if !matches {
            tracing::debug!(user_id = user.id, "login rejected: bad password");
            return Err(AppError::Unauthorized("bad email or password".into()));
        }
        let token = keys.issue(&user.email)?;
        tracing::info!(user_id = user.id, "login succeeded");
        Ok(token)
    }

    /// Subject email of a valid token.
    pub fn verify(keys: &TokenKeys, token: &str) -> Result<String, AppError> {
        Ok(keys.verify(token)?.sub)
    }
}

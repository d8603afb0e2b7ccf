//! Shared application state for all routes.

use crate::auth::TokenKeys;
use crate::config::{DeleteScope, Settings};
use sqlx::AnyPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: AnyPool,
    pub tokens: Arc<TokenKeys>,
    pub delete_scope: DeleteScope,
}

impl AppState {
    pub fn new(pool: AnyPool, settings: &Settings) -> Self {
        AppState {
            pool,
            tokens: Arc::new(TokenKeys::new(&settings.jwt_secret, settings.jwt_expires_minutes)),
            delete_scope: settings.favorite_delete_scope,
        }
    }
}

//! Router assembly.

pub mod api;
pub mod common;

pub use api::{api_routes, ENDPOINTS};
pub use common::common_routes_with_ready;

use crate::state::AppState;
use axum::Router;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, normalize_path::NormalizePath, trace::TraceLayer};

/// Request bodies are small JSON objects.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Full application: API, health/readiness and sitemap, with tracing, CORS and a body limit.
/// Trailing slashes are trimmed before routing, so `/people/` serves `/people`.
pub fn app(state: AppState) -> NormalizePath<Router> {
    NormalizePath::trim_trailing_slash(router(state))
}

/// Routes and layers without path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(api_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

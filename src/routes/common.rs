//! Common routes: sitemap, health, readiness, version.

use crate::response::MSG_OK;
use crate::routes::api::ENDPOINTS;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    database: &'static str,
}

/// Same `msg` envelope as the API responses.
#[derive(Serialize)]
struct VersionBody {
    msg: &'static str,
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct Endpoint {
    method: &'static str,
    path: &'static str,
}

#[derive(Serialize)]
struct Sitemap {
    msg: &'static str,
    endpoints: Vec<Endpoint>,
}

async fn sitemap() -> Json<Sitemap> {
    Json(Sitemap {
        msg: "starwars-api",
        endpoints: ENDPOINTS
            .iter()
            .map(|&(method, path)| Endpoint { method, path })
            .collect(),
    })
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

/// 200 when the store answers `SELECT 1`, 503 otherwise.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyBody>) {
    match sqlx::query("SELECT 1").fetch_optional(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ReadyBody {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyBody {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}

async fn version() -> Json<VersionBody> {
    Json(VersionBody {
        msg: MSG_OK,
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Common routes including readiness with a database check.
pub fn common_routes_with_ready(state: AppState) -> Router {
    Router::new()
        .route("/", get(sitemap))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}

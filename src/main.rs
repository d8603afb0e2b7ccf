//! Server binary: reads env, connects the store, ensures tables, serves the API.

use starwars_api::{app, connect, ensure_tables, seed_demo_data, AppState, Settings};
use axum::{extract::Request, ServiceExt};
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("starwars_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let (pool, dialect) = connect(&settings.database_url, settings.max_connections).await?;
    ensure_tables(&pool, dialect).await?;
    if settings.seed_demo_data {
        seed_demo_data(&pool).await?;
    }

    let state = AppState::new(pool, &settings);
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app(state))).await?;
    Ok(())
}

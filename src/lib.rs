//! Star Wars catalogue REST backend: people, planets, vehicles, users and their favorites, with bearer-token auth.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{DeleteScope, Settings};
pub use error::{AppError, ConfigError};
pub use routes::{api_routes, app, common_routes_with_ready};
pub use state::AppState;
pub use store::{connect, ensure_tables, seed_demo_data, Dialect};

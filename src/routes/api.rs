//! Resource routes: catalogue, users, favorites, auth.

use crate::handlers::auth::{login, signup};
use crate::handlers::catalog::{list_people, list_planets, list_vehicles, read_person, read_planet, read_vehicle};
use crate::handlers::favorites::{
    add_person_favorite, add_planet_favorite, my_favorites, remove_person_favorite, remove_planet_favorite,
};
use crate::handlers::users::{delete_user, list_user_favorites, list_users, read_user};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// (method, path) of every route, served by the sitemap at `/`.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("GET", "/"),
    ("GET", "/health"),
    ("GET", "/ready"),
    ("GET", "/version"),
    ("GET", "/users"),
    ("GET", "/users/:id"),
    ("DELETE", "/users/:id"),
    ("GET", "/users/:id/favorites"),
    ("GET", "/people"),
    ("GET", "/people/:id"),
    ("GET", "/planets"),
    ("GET", "/planets/:id"),
    ("GET", "/vehicles"),
    ("GET", "/vehicles/:id"),
    ("POST", "/favorite/people/:people_id"),
    ("DELETE", "/favorite/people/:people_id"),
    ("POST", "/favorite/planet/:planet_id"),
    ("DELETE", "/favorite/planet/:planet_id"),
    ("GET", "/favorites"),
    ("POST", "/signup"),
    ("POST", "/login"),
];

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", get(read_user).delete(delete_user))
        .route("/users/:id/favorites", get(list_user_favorites))
        .route("/people", get(list_people))
        .route("/people/:id", get(read_person))
        .route("/planets", get(list_planets))
        .route("/planets/:id", get(read_planet))
        .route("/vehicles", get(list_vehicles))
        .route("/vehicles/:id", get(read_vehicle))
        .route(
            "/favorite/people/:people_id",
            post(add_person_favorite).delete(remove_person_favorite),
        )
        .route(
            "/favorite/planet/:planet_id",
            post(add_planet_favorite).delete(remove_planet_favorite),
        )
        .route("/favorites", get(my_favorites))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .with_state(state)
}

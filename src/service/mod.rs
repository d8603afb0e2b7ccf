//! Services over the store: catalogue reads, users, favorites, auth.

mod auth;
mod catalog;
mod favorites;
mod users;
pub mod validation;

pub use auth::{AuthService, LoginRequest, SignupRequest};
pub use catalog::{CatalogEntity, CatalogService};
pub use favorites::{delete_owner, FavoriteService};
pub use users::UserService;
pub use validation::CredentialsValidator;

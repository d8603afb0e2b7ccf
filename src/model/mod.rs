//! Row types for the catalogue, users and favorites, and their JSON shapes.

pub mod favorite;
pub mod person;
pub mod planet;
pub mod user;
pub mod vehicle;

pub use favorite::*;
pub use person::*;
pub use planet::*;
pub use user::*;
pub use vehicle::*;

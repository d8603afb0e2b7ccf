//! Request extractors shared by handlers.

pub mod bearer;
pub mod pagination;
pub mod query;

pub use bearer::AuthUser;
pub use pagination::Pagination;
pub use query::ApiQuery;

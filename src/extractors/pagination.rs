//! `?limit=&offset=` for list endpoints.

use serde::Deserialize;

pub const DEFAULT_LIMIT: u32 = 100;
pub const MAX_LIMIT: u32 = 1000;

#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Pagination {
    /// Limit after defaulting and capping.
    pub fn limit(&self) -> i64 {
        i64::from(self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT))
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.offset.unwrap_or(0))
    }
}

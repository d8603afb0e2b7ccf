//! Read-only access to the catalogue tables (people, planets, vehicles).

use crate::error::AppError;
use crate::extractors::Pagination;
use crate::model::{Person, Planet, Vehicle};
use sqlx::any::AnyRow;
use sqlx::{AnyPool, FromRow};

/// A catalogue table: fixed identifiers, rows decoded with `FromRow`.
pub trait CatalogEntity: for<'r> FromRow<'r, AnyRow> + Send + Unpin {
    const TABLE: &'static str;
    const COLUMNS: &'static str;
    /// Used in not-found messages.
    const LABEL: &'static str;
}

impl CatalogEntity for Person {
    const TABLE: &'static str = "people";
    const COLUMNS: &'static str = "id, name, height, eye_color, gender";
    const LABEL: &'static str = "person";
}

impl CatalogEntity for Planet {
    const TABLE: &'static str = "planets";
    const COLUMNS: &'static str = "id, name, climate, gravity, terrain";
    const LABEL: &'static str = "planet";
}

impl CatalogEntity for Vehicle {
    const TABLE: &'static str = "vehicles";
    const COLUMNS: &'static str = "id, name, model, crew, passengers";
    const LABEL: &'static str = "vehicle";
}

pub struct CatalogService;

impl CatalogService {
    /// Rows ordered by id, one page.
    pub async fn list<T: CatalogEntity>(pool: &AnyPool, page: &Pagination) -> Result<Vec<T>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY id LIMIT $1 OFFSET $2",
            T::COLUMNS,
            T::TABLE
        );
        tracing::debug!(sql = %sql, limit = page.limit(), offset = page.offset(), "query");
        let rows = sqlx::query_as::<_, T>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// One row by primary key, or `NotFound`.
    pub async fn read<T: CatalogEntity>(pool: &AnyPool, id: i64) -> Result<T, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", T::COLUMNS, T::TABLE);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {} does not exist", T::LABEL, id)))
    }
}

//! Favorites: one user pointing at exactly one person or planet.

use crate::config::DeleteScope;
use crate::error::AppError;
use crate::model::{FavoriteJoinRow, FavoriteTarget, FavoriteView};
use sqlx::AnyPool;

pub struct FavoriteService;

impl FavoriteService {
    /// A user's favorites ordered by id, with the target's name resolved.
    pub async fn list_for_user(pool: &AnyPool, user_id: i64) -> Result<Vec<FavoriteView>, AppError> {
        let sql = r#"
            SELECT f.id, f.people_id, f.planet_id, p.name AS people_name, pl.name AS planet_name
            FROM favorites f
            LEFT JOIN people p ON p.id = f.people_id
            LEFT JOIN planets pl ON pl.id = f.planet_id
            WHERE f.user_id = $1
            ORDER BY f.id
        "#;
        let rows = sqlx::query_as::<_, FavoriteJoinRow>(sql)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id;
                let view = row.into_view();
                if view.is_none() {
                    tracing::warn!(favorite_id = id, "favorite without exactly one target, skipped");
                }
                view
            })
            .collect())
    }

    pub async fn add_person_favorite(pool: &AnyPool, user_id: i64, person_id: i64) -> Result<i64, AppError> {
        Self::add(pool, user_id, FavoriteTarget::Person(person_id)).await
    }

    pub async fn add_planet_favorite(pool: &AnyPool, user_id: i64, planet_id: i64) -> Result<i64, AppError> {
        Self::add(pool, user_id, FavoriteTarget::Planet(planet_id)).await
    }

    /// Insert a favorite after checking that the user and the target exist. Returns the new id.
    pub async fn add(pool: &AnyPool, user_id: i64, target: FavoriteTarget) -> Result<i64, AppError> {
        let kind = target.kind();
        let mut tx = pool.begin().await?;

        let user: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
        if user.is_none() {
            return Err(AppError::NotFound(format!("user {} does not exist", user_id)));
        }

        let exists_sql = format!("SELECT id FROM {} WHERE id = $1", kind.table());
        let found: Option<(i64,)> = sqlx::query_as(&exists_sql)
            .bind(target.id())
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            return Err(AppError::NotFound(format!("{} {} does not exist", kind, target.id())));
        }

        let insert_sql = format!(
            "INSERT INTO favorites (user_id, {}) VALUES ($1, $2) RETURNING id",
            kind.column()
        );
        let (id,): (i64,) = sqlx::query_as(&insert_sql)
            .bind(user_id)
            .bind(target.id())
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(favorite_id = id, user_id, kind = %kind, target_id = target.id(), "favorite added");
        Ok(id)
    }

    pub async fn remove_by_person_id(pool: &AnyPool, person_id: i64, owner: Option<i64>) -> Result<(), AppError> {
        Self::remove(pool, FavoriteTarget::Person(person_id), owner).await
    }

    pub async fn remove_by_planet_id(pool: &AnyPool, planet_id: i64, owner: Option<i64>) -> Result<(), AppError> {
        Self::remove(pool, FavoriteTarget::Planet(planet_id), owner).await
    }

    /// Delete one favorite pointing at `target` (lowest id first), restricted to `owner` when given.
    pub async fn remove(pool: &AnyPool, target: FavoriteTarget, owner: Option<i64>) -> Result<(), AppError> {
        let kind = target.kind();
        let mut tx = pool.begin().await?;

        let found: Option<(i64,)> = match owner {
            Some(user_id) => {
                let sql = format!(
                    "SELECT id FROM favorites WHERE {} = $1 AND user_id = $2 ORDER BY id LIMIT 1",
                    kind.column()
                );
                sqlx::query_as(&sql)
                    .bind(target.id())
                    .bind(user_id)
                    .fetch_optional(&mut *tx)
                    .await?
            }
            None => {
                let sql = format!("SELECT id FROM favorites WHERE {} = $1 ORDER BY id LIMIT 1", kind.column());
                sqlx::query_as(&sql)
                    .bind(target.id())
                    .fetch_optional(&mut *tx)
                    .await?
            }
        };
        let (id,) = found.ok_or_else(|| AppError::NotFound(format!("no favorite for {} {}", kind, target.id())))?;

        sqlx::query("DELETE FROM favorites WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(favorite_id = id, kind = %kind, target_id = target.id(), "favorite removed");
        Ok(())
    }
}

/// Owner filter for a delete under `scope`. `Owner` scope requires the user id.
pub fn delete_owner(scope: DeleteScope, user_id: Option<i64>) -> Result<Option<i64>, AppError> {
    match (scope, user_id) {
        (DeleteScope::Owner, None) => Err(AppError::BadRequest("user_id is required".into())),
        (_, user_id) => Ok(user_id),
    }
}

//! User persistence. The password hash never leaves this module except to `AuthService`.

use crate::error::{conflict_on_unique, AppError};
use crate::extractors::Pagination;
use crate::model::{NewUser, User, UserRow};
use chrono::{SecondsFormat, Utc};
use sqlx::AnyPool;

const USER_COLUMNS: &str = "id, first_name, last_name, email, password_hash, subscription_date";

pub struct UserService;

impl UserService {
    pub async fn list(pool: &AnyPool, page: &Pagination) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {} FROM users ORDER BY id LIMIT $1 OFFSET $2", USER_COLUMNS);
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        rows.into_iter()
            .map(|r| User::try_from(r).map_err(AppError::from))
            .collect()
    }

    pub async fn get(pool: &AnyPool, id: i64) -> Result<User, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {} does not exist", id)))?;
        Ok(User::try_from(row)?)
    }

    /// Exact match on the normalized email.
    pub async fn find_by_email(pool: &AnyPool, email: &str) -> Result<Option<UserRow>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Insert a user stamped with the current time. A taken email is `Conflict` (unique constraint).
    pub async fn create(pool: &AnyPool, new_user: &NewUser) -> Result<User, AppError> {
        let subscription_date = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let sql = format!(
            "INSERT INTO users (first_name, last_name, email, password_hash, subscription_date) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            USER_COLUMNS
        );
        let mut tx = pool.begin().await?;
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(new_user.first_name.as_deref())
            .bind(new_user.last_name.as_deref())
            .bind(new_user.email.as_str())
            .bind(new_user.password_hash.as_str())
            .bind(subscription_date.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| conflict_on_unique(e, format!("email {} is already registered", new_user.email)))?;
        tx.commit().await?;
        tracing::info!(user_id = row.id, "user created");
        Ok(User::try_from(row)?)
    }

    /// Delete a user; their favorites go with them.
    pub async fn delete(pool: &AnyPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("user {} does not exist", id)));
        }
        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }
}

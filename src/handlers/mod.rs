//! HTTP handlers: catalogue reads, users, favorites, auth.

pub mod auth;
pub mod catalog;
pub mod favorites;
pub mod users;

use crate::error::AppError;
use axum::{extract::rejection::JsonRejection, Json};

/// Path ids are integers; anything else is a 400 with a JSON body.
pub(crate) fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

/// JSON body, or a 400 carrying the rejection reason.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::parse_id;

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(parse_id("luke").is_err());
        assert!(parse_id("").is_err());
    }
}

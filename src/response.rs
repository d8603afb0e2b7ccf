//! Standard response envelope helpers: `{msg, result}`, `{msg, results}`, `{msg}`.

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub const MSG_OK: &str = "ok";
pub const MSG_FAVORITE_REMOVED: &str = "favorito eliminado";

#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub msg: &'static str,
    pub result: T,
}

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub msg: &'static str,
    pub results: Vec<T>,
}

#[derive(Serialize)]
pub struct Message {
    pub msg: &'static str,
}

pub fn success_one<T: Serialize>(result: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (StatusCode::OK, Json(SuccessOne { msg: MSG_OK, result }))
}

pub fn success_one_created<T: Serialize>(result: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (StatusCode::CREATED, Json(SuccessOne { msg: MSG_OK, result }))
}

pub fn success_many<T: Serialize>(results: Vec<T>) -> (StatusCode, Json<SuccessMany<T>>) {
    (StatusCode::OK, Json(SuccessMany { msg: MSG_OK, results }))
}

pub fn message(msg: &'static str) -> (StatusCode, Json<Message>) {
    (StatusCode::OK, Json(Message { msg }))
}

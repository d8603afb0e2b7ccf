//! People, planets and vehicles: list and read by id.

use crate::error::AppError;
use crate::extractors::{ApiQuery, Pagination};
use crate::handlers::parse_id;
use crate::model::{Person, Planet, Vehicle};
use crate::response::{success_many, success_one};
use crate::service::{CatalogEntity, CatalogService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Serialize;

async fn list<T: CatalogEntity + Serialize>(state: &AppState, page: &Pagination) -> Result<impl IntoResponse, AppError> {
    let rows = CatalogService::list::<T>(&state.pool, page).await?;
    Ok(success_many(rows))
}

async fn read<T: CatalogEntity + Serialize>(state: &AppState, id_str: &str) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(id_str)?;
    let row = CatalogService::read::<T>(&state.pool, id).await?;
    Ok(success_one(row))
}

pub async fn list_people(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    list::<Person>(&state, &page).await
}

pub async fn read_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    read::<Person>(&state, &id).await
}

pub async fn list_planets(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    list::<Planet>(&state, &page).await
}

pub async fn read_planet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    read::<Planet>(&state, &id).await
}

pub async fn list_vehicles(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    list::<Vehicle>(&state, &page).await
}

pub async fn read_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    read::<Vehicle>(&state, &id).await
}

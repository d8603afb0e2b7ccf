use serde::Serialize;

/// Vehicles are listed but cannot be favorited.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    pub model: Option<String>,
    pub crew: Option<String>,
    pub passengers: Option<String>,
}

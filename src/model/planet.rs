use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Planet {
    pub id: i64,
    pub name: String,
    pub climate: Option<String>,
    pub gravity: Option<String>,
    pub terrain: Option<String>,
}

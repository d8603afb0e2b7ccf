use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub height: Option<i64>,
    pub eye_color: Option<String>,
    pub gender: Option<String>,
}

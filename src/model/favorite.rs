use serde::{Deserialize, Serialize};
use std::fmt;

/// What a favorite points at. Exactly one target per favorite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FavoriteTarget {
    Person(i64),
    Planet(i64),
}

impl FavoriteTarget {
    pub fn id(&self) -> i64 {
        match self {
            FavoriteTarget::Person(id) | FavoriteTarget::Planet(id) => *id,
        }
    }

    pub fn kind(&self) -> FavoriteKind {
        match self {
            FavoriteTarget::Person(_) => FavoriteKind::People,
            FavoriteTarget::Planet(_) => FavoriteKind::Planet,
        }
    }

    /// Rebuild the target from the two nullable columns; `None` if not exactly one is set.
    pub fn from_columns(people_id: Option<i64>, planet_id: Option<i64>) -> Option<Self> {
        match (people_id, planet_id) {
            (Some(id), None) => Some(FavoriteTarget::Person(id)),
            (None, Some(id)) => Some(FavoriteTarget::Planet(id)),
            _ => None,
        }
    }
}

/// Wire tag for a favorite's target; also the path segment in `/favorite/{kind}/:id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    People,
    Planet,
}

impl FavoriteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteKind::People => "people",
            FavoriteKind::Planet => "planet",
        }
    }

    /// Foreign-key column in `favorites`.
    pub(crate) fn column(&self) -> &'static str {
        match self {
            FavoriteKind::People => "people_id",
            FavoriteKind::Planet => "planet_id",
        }
    }

    /// Table the foreign key references.
    pub(crate) fn table(&self) -> &'static str {
        match self {
            FavoriteKind::People => "people",
            FavoriteKind::Planet => "planets",
        }
    }

    pub fn target(&self, id: i64) -> FavoriteTarget {
        match self {
            FavoriteKind::People => FavoriteTarget::Person(id),
            FavoriteKind::Planet => FavoriteTarget::Planet(id),
        }
    }
}

impl fmt::Display for FavoriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the favorites-with-names join.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct FavoriteJoinRow {
    pub id: i64,
    pub people_id: Option<i64>,
    pub planet_id: Option<i64>,
    pub people_name: Option<String>,
    pub planet_name: Option<String>,
}

/// Client-facing favorite: `{id, resource_id, type, name}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FavoriteView {
    pub id: i64,
    pub resource_id: i64,
    #[serde(rename = "type")]
    pub kind: FavoriteKind,
    pub name: String,
}

impl FavoriteJoinRow {
    /// `None` when the row breaks the one-target invariant.
    pub fn into_view(self) -> Option<FavoriteView> {
        let target = FavoriteTarget::from_columns(self.people_id, self.planet_id)?;
        let name = match target {
            FavoriteTarget::Person(_) => self.people_name,
            FavoriteTarget::Planet(_) => self.planet_name,
        }
        .unwrap_or_default();
        Some(FavoriteView {
            id: self.id,
            resource_id: target.id(),
            kind: target.kind(),
            name,
        })
    }
}

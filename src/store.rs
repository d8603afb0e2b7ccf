//! Pool setup and table DDL. `DATABASE_URL` selects PostgreSQL or a local SQLite file; both go through the `Any` driver.

use crate::error::{AppError, ConfigError};
use sqlx::any::AnyPoolOptions;
use sqlx::{AnyPool, ConnectOptions};
use std::str::FromStr;

/// SQL dialect behind the `Any` pool. Only DDL differs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Sqlite,
}

impl Dialect {
    pub fn from_url(database_url: &str) -> Result<Self, ConfigError> {
        if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
            Ok(Dialect::Postgres)
        } else if database_url.starts_with("sqlite:") {
            Ok(Dialect::Sqlite)
        } else {
            Err(ConfigError::DatabaseUrl(format!(
                "unsupported scheme in '{}' (expected postgres:// or sqlite:)",
                redact(database_url)
            )))
        }
    }

    fn id_column(&self) -> &'static str {
        match self {
            Dialect::Postgres => "id BIGSERIAL PRIMARY KEY",
            Dialect::Sqlite => "id INTEGER PRIMARY KEY AUTOINCREMENT",
        }
    }
}

/// Open a pool for `database_url`. For PostgreSQL the database is created first if missing.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<(AnyPool, Dialect), AppError> {
    sqlx::any::install_default_drivers();
    let dialect = Dialect::from_url(database_url)?;
    if dialect == Dialect::Postgres {
        ensure_database_exists(database_url).await?;
    }
    let pool = AnyPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    tracing::info!(dialect = ?dialect, url = %redact(database_url), "connected to database");
    Ok((pool, dialect))
}

/// Create the tables if they do not exist. Favorites cascade with their user, person and planet.
pub async fn ensure_tables(pool: &AnyPool, dialect: Dialect) -> Result<(), AppError> {
    let id = dialect.id_column();
    let ddl = [
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS people (
                {id},
                name TEXT NOT NULL,
                height BIGINT,
                eye_color TEXT,
                gender TEXT
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS planets (
                {id},
                name TEXT NOT NULL,
                climate TEXT,
                gravity TEXT,
                terrain TEXT
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS vehicles (
                {id},
                name TEXT NOT NULL,
                model TEXT,
                crew TEXT,
                passengers TEXT
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                {id},
                first_name TEXT,
                last_name TEXT,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                subscription_date TEXT NOT NULL
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS favorites (
                {id},
                user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                people_id BIGINT REFERENCES people(id) ON DELETE CASCADE,
                planet_id BIGINT REFERENCES planets(id) ON DELETE CASCADE,
                CHECK ((people_id IS NULL) <> (planet_id IS NULL))
            )
            "#
        ),
        "CREATE INDEX IF NOT EXISTS favorites_user_id_idx ON favorites (user_id)".to_string(),
        "CREATE INDEX IF NOT EXISTS favorites_people_id_idx ON favorites (people_id)".to_string(),
        "CREATE INDEX IF NOT EXISTS favorites_planet_id_idx ON favorites (planet_id)".to_string(),
    ];
    for sql in &ddl {
        sqlx::query(sql).execute(pool).await?;
    }
    tracing::debug!("tables ensured");
    Ok(())
}

/// Insert a few canonical rows when the catalogue is empty. Returns whether anything was inserted.
pub async fn seed_demo_data(pool: &AnyPool) -> Result<bool, AppError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM people").fetch_one(pool).await?;
    if count > 0 {
        return Ok(false);
    }

    let people: &[(&str, Option<i64>, &str, &str)] = &[
        ("Luke Skywalker", Some(172), "blue", "male"),
        ("Leia Organa", Some(150), "brown", "female"),
        ("Darth Vader", Some(202), "yellow", "male"),
        ("R2-D2", Some(96), "red", "n/a"),
    ];
    let planets: &[(&str, &str, &str, &str)] = &[
        ("Tatooine", "arid", "1 standard", "desert"),
        ("Alderaan", "temperate", "1 standard", "grasslands, mountains"),
        ("Hoth", "frozen", "1.1 standard", "tundra, ice caves"),
    ];
    let vehicles: &[(&str, &str, &str, &str)] = &[
        ("Sand Crawler", "Digger Crawler", "46", "30"),
        ("X-34 landspeeder", "X-34 landspeeder", "1", "1"),
        ("TIE/LN starfighter", "Twin Ion Engine/Ln Starfighter", "1", "0"),
    ];

    let mut tx = pool.begin().await?;
    for (name, height, eye_color, gender) in people {
        sqlx::query("INSERT INTO people (name, height, eye_color, gender) VALUES ($1, $2, $3, $4)")
            .bind(*name)
            .bind(*height)
            .bind(*eye_color)
            .bind(*gender)
            .execute(&mut *tx)
            .await?;
    }
    for (name, climate, gravity, terrain) in planets {
        sqlx::query("INSERT INTO planets (name, climate, gravity, terrain) VALUES ($1, $2, $3, $4)")
            .bind(*name)
            .bind(*climate)
            .bind(*gravity)
            .bind(*terrain)
            .execute(&mut *tx)
            .await?;
    }
    for (name, model, crew, passengers) in vehicles {
        sqlx::query("INSERT INTO vehicles (name, model, crew, passengers) VALUES ($1, $2, $3, $4)")
            .bind(*name)
            .bind(*model)
            .bind(*crew)
            .bind(*passengers)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    tracing::info!(
        people = people.len(),
        planets = planets.len(),
        vehicles = vehicles.len(),
        "seeded demo data"
    );
    Ok(true)
}

/// Connect to the `postgres` maintenance database and create the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Split `postgres://.../name?opts` into the same URL pointing at `postgres`, and `name`.
fn parse_db_name_from_url(database_url: &str) -> Result<(String, String), ConfigError> {
    let (base, query) = match database_url.split_once('?') {
        Some((b, q)) => (b, Some(q)),
        None => (database_url, None),
    };
    let scheme_end = base
        .find("://")
        .ok_or_else(|| ConfigError::DatabaseUrl("missing scheme".into()))?
        + 3;
    let slash = base[scheme_end..].find('/').map(|i| i + scheme_end);
    let (prefix, db_name) = match slash {
        Some(i) => (&base[..i], &base[i + 1..]),
        None => (base, ""),
    };
    let mut admin_url = format!("{}/postgres", prefix);
    if let Some(q) = query {
        admin_url.push('?');
        admin_url.push_str(q);
    }
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Hide the password part of a URL for logging.
fn redact(database_url: &str) -> String {
    match (database_url.find("://"), database_url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let creds = &database_url[scheme_end + 3..at];
            let user = creds.split(':').next().unwrap_or_default();
            format!("{}{}:***{}", &database_url[..scheme_end + 3], user, &database_url[at..])
        }
        _ => database_url.to_string(),
    }
}

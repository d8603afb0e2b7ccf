//! Runtime settings read from the environment (after `dotenvy`).

use crate::error::ConfigError;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://starwars.db?mode=rwc";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_JWT_EXPIRES_MINUTES: i64 = 15;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEV_JWT_SECRET: &str = "starwars-dev-secret";

/// How `DELETE /favorite/{kind}/:id` picks the row to remove.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeleteScope {
    /// Match on the target id alone; `?user_id=` narrows it when given.
    #[default]
    Target,
    /// Match on (user_id, target id); `?user_id=` is required.
    Owner,
}

impl FromStr for DeleteScope {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "target" => Ok(DeleteScope::Target),
            "owner" | "user" => Ok(DeleteScope::Owner),
            _ => Err(ConfigError::InvalidValue {
                key: "FAVORITE_DELETE_SCOPE",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expires_minutes: i64,
    pub favorite_delete_scope: DeleteScope,
    pub seed_demo_data: bool,
    pub max_connections: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: DEFAULT_DATABASE_URL.into(),
            port: DEFAULT_PORT,
            jwt_secret: DEV_JWT_SECRET.into(),
            jwt_expires_minutes: DEFAULT_JWT_EXPIRES_MINUTES,
            favorite_delete_scope: DeleteScope::default(),
            seed_demo_data: false,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Settings {
    /// Read settings from process env. Unset keys take defaults; malformed values are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injectable lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let jwt_secret = match get("JWT_SECRET_KEY") {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET_KEY not set, using the development secret");
                defaults.jwt_secret
            }
        };

        Ok(Settings {
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            jwt_secret,
            jwt_expires_minutes: parse_or("JWT_EXPIRES_MINUTES", get("JWT_EXPIRES_MINUTES"), defaults.jwt_expires_minutes)?,
            favorite_delete_scope: get("FAVORITE_DELETE_SCOPE")
                .map(|v| v.parse::<DeleteScope>())
                .transpose()?
                .unwrap_or_default(),
            seed_demo_data: parse_bool("SEED_DEMO_DATA", get("SEED_DEMO_DATA"))?,
            max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), defaults.max_connections)?,
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue { key, value: v }),
    }
}

fn parse_bool(key: &'static str, raw: Option<String>) -> Result<bool, ConfigError> {
    let Some(v) = raw else {
        return Ok(false);
    };
    match v.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value: v }),
    }
}

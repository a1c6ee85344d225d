//! Runtime settings from the environment (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/devhub";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Which `Store` backs the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    /// Process-local, lost on exit.
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            other => Err(ConfigError::UnknownStore(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    /// Run CREATE DATABASE when the target database is missing.
    pub create_if_missing: bool,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub store: StoreKind,
    pub database: DatabaseSettings,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = parse_or(&lookup, "DEVHUB_BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let store = match lookup("DEVHUB_STORE") {
            Some(v) => v.parse()?,
            None => StoreKind::Postgres,
        };
        let max_connections = match lookup("DEVHUB_DB_MAX_CONNECTIONS") {
            Some(v) => parse_value("DEVHUB_DB_MAX_CONNECTIONS", &v)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DEVHUB_DB_MAX_CONNECTIONS",
                value: "0".into(),
            });
        }
        let create_if_missing = match lookup("DEVHUB_CREATE_DATABASE") {
            Some(v) => parse_value("DEVHUB_CREATE_DATABASE", &v)?,
            None => true,
        };
        let url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        Ok(Settings {
            bind_addr,
            store,
            database: DatabaseSettings {
                url,
                max_connections,
                create_if_missing,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    parse_value(key, &raw)
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let env: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.bind_addr.port(), 3000);
        assert_eq!(s.store, StoreKind::Postgres);
        assert_eq!(s.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(s.database.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(s.database.create_if_missing);
    }

    #[test]
    fn overrides_are_applied() {
        let s = settings(&[
            ("DEVHUB_BIND_ADDR", "127.0.0.1:8080"),
            ("DEVHUB_STORE", "Memory"),
            ("DEVHUB_DB_MAX_CONNECTIONS", "12"),
            ("DEVHUB_CREATE_DATABASE", "false"),
            ("DATABASE_URL", "postgres://db/other"),
        ])
        .unwrap();
        assert_eq!(s.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(s.store, StoreKind::Memory);
        assert_eq!(s.database.max_connections, 12);
        assert!(!s.database.create_if_missing);
        assert_eq!(s.database.url, "postgres://db/other");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            settings(&[("DEVHUB_BIND_ADDR", "nowhere")]),
            Err(ConfigError::InvalidValue { key: "DEVHUB_BIND_ADDR", .. })
        ));
        assert!(matches!(
            settings(&[("DEVHUB_STORE", "redis")]),
            Err(ConfigError::UnknownStore(_))
        ));
        assert!(settings(&[("DEVHUB_DB_MAX_CONNECTIONS", "0")]).is_err());
    }
}

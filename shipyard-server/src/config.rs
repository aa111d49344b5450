//! Server configuration loaded from the environment.

use std::str::FromStr;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ORIGINS: &str = "http://127.0.0.1:4200,http://localhost:4200";

/// Where ships are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL through Diesel, using `DATABASE_URL`.
    Postgres,
    /// Process memory; contents are lost on restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "SHIPYARD_STORAGE must be postgres or memory, got {other:?}"
            )),
        }
    }
}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Listen address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Origins allowed by CORS.
    pub allowed_origins: Vec<String>,
    /// Storage backend.
    pub storage: StorageBackend,
    /// PostgreSQL connection string, required for [`StorageBackend::Postgres`].
    pub database_url: Option<String>,
}

impl ServerConfig {
    /// Build the config from process environment variables.
    #[cfg_attr(test, allow(dead_code))]
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let host = lookup("SHIPYARD_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("SHIPYARD_PORT") {
            Some(raw) => u16::from_str(raw.trim())
                .map_err(|_| format!("SHIPYARD_PORT must be a u16 number, got {raw:?}"))?,
            None => DEFAULT_PORT,
        };
        let origins = lookup("SHIPYARD_UI_ORIGINS").unwrap_or_else(|| DEFAULT_ORIGINS.to_string());
        let allowed_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();
        let storage = match lookup("SHIPYARD_STORAGE") {
            Some(raw) => raw.parse()?,
            None => StorageBackend::Postgres,
        };
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err("DATABASE_URL must be set to a PostgreSQL connection string".to_string());
        }

        Ok(Self {
            host,
            port,
            allowed_origins,
            storage,
            database_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ServerConfig, StorageBackend};
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_require_database_url() {
        let err = config(&[]).expect_err("postgres needs a url");
        assert!(err.contains("DATABASE_URL"));

        let config = config(&[("DATABASE_URL", "postgres://localhost/fleet")]).expect("config");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.allowed_origins.len(), 2);
    }

    #[test]
    fn memory_storage_needs_no_database() {
        let config = config(&[
            ("SHIPYARD_STORAGE", "Memory"),
            ("SHIPYARD_PORT", "9090"),
            ("SHIPYARD_UI_ORIGINS", "https://fleet.example, ,"),
        ])
        .expect("config");

        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.port, 9090);
        assert_eq!(config.allowed_origins, vec!["https://fleet.example"]);
        assert_eq!(config.database_url, None);
    }

    #[test]
    fn rejects_bad_port_and_storage() {
        let err = config(&[("SHIPYARD_STORAGE", "memory"), ("SHIPYARD_PORT", "huge")])
            .expect_err("bad port");
        assert!(err.contains("SHIPYARD_PORT"));

        let err = config(&[("SHIPYARD_STORAGE", "sqlite")]).expect_err("bad storage");
        assert!(err.contains("SHIPYARD_STORAGE"));
    }
}

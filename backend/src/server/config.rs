//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, then `FASTFIX_*` environment variables, then
//! defaults. `DATABASE_URL` is honoured as a fallback for the database URL.

use std::env;
use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_SEED_CATALOGUE: bool = true;

/// Which repository implementation backs the ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

/// Raw settings as read from flags and environment.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FASTFIX")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// `memory` or `postgres`.
    pub storage: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Load the bundled catalogue into an empty store at startup.
    pub seed_catalogue: Option<bool>,
}

/// Settings that failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("bind address {value:?} is not a socket address")]
    InvalidBindAddr { value: String },
    #[error("storage {value:?} is not one of memory, postgres")]
    UnknownStorage { value: String },
    #[error("postgres storage requires FASTFIX_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,
    #[error("db_max_connections must be at least 1")]
    ZeroConnections,
}

/// Validated server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: StorageBackend,
    pub(crate) database_url: Option<String>,
    pub(crate) db_max_connections: u32,
    pub(crate) seed_catalogue: bool,
}

impl ServerConfig {
    /// Validate raw settings, consulting `DATABASE_URL` when no prefixed URL
    /// was given.
    pub fn from_settings(settings: AppSettings) -> Result<Self, SettingsError> {
        let fallback_url = env::var("DATABASE_URL").ok();
        Self::resolve(settings, fallback_url)
    }

    fn resolve(
        settings: AppSettings,
        fallback_url: Option<String>,
    ) -> Result<Self, SettingsError> {
        let raw_addr = settings
            .bind_addr
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = raw_addr
            .trim()
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddr { value: raw_addr })?;

        let storage = match settings.storage.as_deref().map(str::trim) {
            None | Some("memory") => StorageBackend::Memory,
            Some("postgres") => StorageBackend::Postgres,
            Some(other) => {
                return Err(SettingsError::UnknownStorage {
                    value: other.to_owned(),
                });
            }
        };

        let database_url = settings
            .database_url
            .or(fallback_url)
            .filter(|url| !url.trim().is_empty());
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(SettingsError::MissingDatabaseUrl);
        }

        let db_max_connections = settings
            .db_max_connections
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        if db_max_connections == 0 {
            return Err(SettingsError::ZeroConnections);
        }

        Ok(Self {
            bind_addr,
            storage,
            database_url,
            db_max_connections,
            seed_catalogue: settings.seed_catalogue.unwrap_or(DEFAULT_SEED_CATALOGUE),
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

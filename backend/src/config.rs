//! Runtime configuration, read once at startup from the environment.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:family_ledger.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection URL; the file is created if missing
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    /// Browser origin allowed by the CORS layer
    pub cors_origin: HeaderValue,
}

impl AppConfig {
    /// Load from `DATABASE_URL`, `BIND_ADDR`, `DB_MAX_CONNECTIONS` and `CORS_ORIGIN`.
    ///
    /// Unset variables fall back to their defaults. A variable that is set
    /// but cannot be parsed is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("Invalid BIND_ADDR '{}'", bind_addr))?;

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => value
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| {
                    format!("Invalid DB_MAX_CONNECTIONS '{}': expected a positive integer", value)
                })?,
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let cors_origin = lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = HeaderValue::from_str(&cors_origin)
            .with_context(|| format!("Invalid CORS_ORIGIN '{}'", cors_origin))?;

        Ok(Self {
            database_url,
            bind_addr,
            db_max_connections,
            cors_origin,
        })
    }
}

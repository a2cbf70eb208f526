//! Service configuration loaded from environment variables.

use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{Result, anyhow};

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to (`LISTEN_ADDR`, default 0.0.0.0:3000)
    pub listen_addr: SocketAddr,

    /// PostgreSQL settings. Left unset (`DB_CONNECTION_URL` absent or blank),
    /// the service runs on the in-memory store and loses all data on exit;
    /// there is no default database URL.
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection URL (`DB_CONNECTION_URL`)
    pub url: String,

    /// Pool size (`DB_MAX_CONNECTIONS`, default 5)
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection (`DB_CONNECT_TIMEOUT`, default 30)
    pub connect_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Blank
    /// values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let listen_addr = parse_or(
            "LISTEN_ADDR",
            var("LISTEN_ADDR"),
            SocketAddr::from(([0, 0, 0, 0], 3000)),
        )?;

        let database = match var("DB_CONNECTION_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_or("DB_MAX_CONNECTIONS", var("DB_MAX_CONNECTIONS"), 5)?,
                connect_timeout_secs: parse_or(
                    "DB_CONNECT_TIMEOUT",
                    var("DB_CONNECT_TIMEOUT"),
                    30,
                )?,
            }),
            None => None,
        };

        Ok(Self {
            listen_addr,
            database,
        })
    }
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|err| anyhow!("invalid {name} value `{raw}`: {err}")),
        None => Ok(default),
    }
}

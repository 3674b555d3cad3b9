use anyhow::{Context, Result, bail};
use std::env;
use std::net::SocketAddr;

use crate::features::srs::DEFAULT_MAX_DUE_LIMIT;

/// Value of DATABASE_URL that keeps cards in process memory only
pub const IN_MEMORY_DATABASE: &str = "memory";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_due_limit: usize,
    pub pool_size: u32,
}

fn parsed<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", name, raw)),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Reads settings from the environment (and `.env` if the caller loaded it)
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "ruzhi.db".into());
        let bind_addr = parsed("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 5000)))?;
        let max_due_limit = parsed("DUE_CARDS_MAX_LIMIT", DEFAULT_MAX_DUE_LIMIT)?;
        let pool_size = parsed("DB_POOL_SIZE", 8u32)?;

        if max_due_limit == 0 {
            bail!("DUE_CARDS_MAX_LIMIT must be at least 1");
        }
        if pool_size == 0 {
            bail!("DB_POOL_SIZE must be at least 1");
        }

        Ok(Self {
            database_url,
            bind_addr,
            max_due_limit,
            pool_size,
        })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == IN_MEMORY_DATABASE
    }
}

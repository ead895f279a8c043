//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,

    /// Connection pool size for the shared pool
    pub database_max_connections: u32,

    /// Avatar lookup provider ("gravatar" or "mock")
    pub avatar_provider: String,

    /// Auth provider ("mock" until an external client is configured)
    pub auth_provider: String,

    /// Runtime configuration
    pub log_level: String,
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,

            database_max_connections: env_or("DATABASE_MAX_CONNECTIONS", "10")
                .parse()
                .unwrap_or(10),

            avatar_provider: env_or("AVATAR_PROVIDER", "gravatar"),

            auth_provider: env_or("AUTH_PROVIDER", "mock"),

            log_level: env_or("LOG_LEVEL", "info"),
            rust_log: env_or("RUST_LOG", "rolodex=debug"),
            port: env_or("PORT", "3000").parse().unwrap_or(3000),
        })
    }
}

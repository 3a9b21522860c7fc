use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://game_manager.db";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Password for `POST /api/admin/login`; also the `X-Admin-Token` secret
    pub admin_password: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: database_url_from_env(),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "20002".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            admin_password: env::var("ADMIN_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty())
                .context("ADMIN_PASSWORD must be set")?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `DATABASE_URL` alone, for tools that never serve HTTP
pub fn database_url_from_env() -> String {
    let _ = dotenv();
    env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

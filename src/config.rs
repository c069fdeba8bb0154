use std::env;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub service_host: String,
    pub service_port: u16,
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_user: Option<String>,
    pub db_pass: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let service_host = env::var("SERVER_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        let service_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid port number (0-65535)")?;

        let db_host = env::var("DB_HOST")
            .unwrap_or_else(|_| "localhost".to_string());

        let db_port = env::var("DB_PORT")
            .unwrap_or_else(|_| "27017".to_string())
            .parse::<u16>()
            .context("DB_PORT must be a valid port number (0-65535)")?;

        let db_name = env::var("DB_NAME")
            .context("DB_NAME environment variable is required")?;

        let db_user = env::var("DB_USER").ok().filter(|u| !u.is_empty());
        let db_pass = env::var("DB_PASS").ok();

        Ok(Config {
            service_host,
            service_port,
            db_host,
            db_port,
            db_name,
            db_user,
            db_pass,
        })
    }

    /// Connection string without credentials; those are attached to the
    /// client options separately so they never end up in logs.
    pub fn mongo_uri(&self) -> String {
        format!("mongodb://{}:{}", self.db_host, self.db_port)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Database: {} (name: {})", self.mongo_uri(), self.db_name);
        tracing::info!("  Database user: {}",
            self.db_user.as_deref().unwrap_or("none (unauthenticated)"));
        tracing::info!("  Service listening on: {}", self.listen_addr());
    }
}

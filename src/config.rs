//! Configuration module
//!
//! All settings come from environment variables, matching the deployment
//! contract: `DB_CONNECTION`, `DATABASE`, `MIGRATION`, `JWT_SECRET`,
//! `JWT_AUDIENCE`, `JWT_ISSUER`, `JWT_SECONDS`, `HOST`, `PORT`.

use crate::auth::jwt::JwtConfig;
use crate::infrastructure::DatabaseConfig;

/// Server bind configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Application configuration, assembled from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: JwtConfig,
    /// Run database migrations at startup (`MIGRATION=apply`)
    pub apply_migrations: bool,
}

impl AppConfig {
    /// Load configuration from environment variables, with defaults
    /// suitable for local development.
    pub fn from_env() -> Self {
        let server = ServerConfig {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
        };

        let apply_migrations = std::env::var("MIGRATION")
            .map(|v| v.eq_ignore_ascii_case("apply"))
            .unwrap_or(false);

        Self {
            server,
            database: DatabaseConfig::from_env(),
            security: JwtConfig::from_env(),
            apply_migrations,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            security: JwtConfig::default(),
            apply_migrations: false,
        }
    }
}

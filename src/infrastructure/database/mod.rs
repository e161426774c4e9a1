pub mod entities;
pub mod migrator;
pub mod repositories;

use sea_orm::{Database, DatabaseConnection};
use tracing::{info, warn};

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./users.db?mode=rwc")
    pub url: String,
    /// Database kind label (sqlite, postgres, mysql)
    pub kind: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./users.db?mode=rwc".to_string(),
            kind: "sqlite".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Create config from the `DB_CONNECTION` / `DATABASE` environment
    /// variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("DB_CONNECTION").unwrap_or(defaults.url),
            kind: std::env::var("DATABASE")
                .map(|v| v.to_lowercase())
                .unwrap_or(defaults.kind),
        }
    }

    /// Whether the URL scheme matches the declared database kind.
    pub fn kind_matches_url(&self) -> bool {
        match self.kind.as_str() {
            "sqlite" => self.url.starts_with("sqlite:"),
            "postgres" => self.url.starts_with("postgres:") || self.url.starts_with("postgresql:"),
            "mysql" => self.url.starts_with("mysql:"),
            _ => false,
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to {} database", config.kind);
    if !config.kind_matches_url() {
        warn!(
            "DATABASE kind '{}' does not match the DB_CONNECTION scheme",
            config.kind
        );
    }
    let db = Database::connect(&config.url).await?;
    info!("Database connected successfully");
    Ok(db)
}

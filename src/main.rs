//!
//! Users API server: CRUD over user records with JWT bearer auth.
//! Reads configuration from environment variables.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use users_api::application::{DbUserService, UserService};
use users_api::config::AppConfig;
use users_api::infrastructure::database::migrator::Migrator;
use users_api::infrastructure::database::repositories::UserRepository;
use users_api::{create_api_router, init_database};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let app_cfg = AppConfig::from_env();
    info!("Starting Users API...");

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&app_cfg.database).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    if app_cfg.apply_migrations {
        info!("Running database migrations...");
        if let Err(e) = Migrator::up(&db, None).await {
            error!("Failed to run migrations: {}", e);
            return Err(e.into());
        }
        info!("Migrations completed");
    } else {
        info!("MIGRATION flag not set, skipping migrations");
    }

    // ── Service wiring (explicit constructor composition) ──────
    let repo = Arc::new(UserRepository::new(db.clone()));
    let service: Arc<dyn UserService> = Arc::new(DbUserService::new(repo));

    info!(
        "JWT configured: issuer={}, audience={}, {}s token expiration",
        app_cfg.security.issuer, app_cfg.security.audience, app_cfg.security.expiration_seconds
    );

    let router = create_api_router(service, app_cfg.security.clone());

    // ── HTTP server with graceful shutdown ─────────────────────
    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received");
        })
        .await?;

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Users API shutdown complete");
    Ok(())
}

//! CLI subcommands.

pub mod migrate;
pub mod profiles;

use sqlx::PgPool;
use textile_hub_admin::{
    config::{ConfigError, get_database_url},
    db,
    services::ProfileError,
};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    Profile(#[from] ProfileError),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Connect to the admin database named by `ADMIN_DATABASE_URL` (or `DATABASE_URL`).
async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = get_database_url("ADMIN_DATABASE_URL")?;
    tracing::info!("Connecting to admin database...");
    Ok(db::create_pool(&database_url).await?)
}

//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! th-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Migrations live in `crates/admin/migrations/` and are embedded at build
//! time. The admin server never runs them on startup.

use super::{CommandError, connect};

/// Run the `hub` schema migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing, the connection
/// fails, or a migration fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running hub migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;

    tracing::info!("Hub migrations complete!");
    Ok(())
}

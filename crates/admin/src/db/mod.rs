//! Store access for the admin dashboard.
//!
//! # Database: `hub` schema (shared with the storefront services)
//!
//! ## Tables read here
//!
//! - `user_account` - Authentication record (email, verification flag)
//! - `user_profile` - Per-user administrative record (role, status, contact)
//! - `product` - Catalog products
//! - `wishlist`, `cart`, `customer_order` - Profile relations holding
//!   `product_ids` arrays (weak references, no foreign key)
//!
//! # Seams
//!
//! Aggregation code never talks to `PostgreSQL` directly. It receives a
//! [`ProfileStore`] and a [`ProductStore`]; [`ProfileRepository`] and
//! [`ProductRepository`] are the `PostgreSQL` implementations, and tests
//! substitute in-memory ones.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p textile-hub-cli -- migrate
//! ```

pub mod products;
pub mod profiles;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use textile_hub_core::{ProductId, ProfileId, UserStatus};

use crate::models::{
    Pagination, ProductSummary, ProfileFilter, ProfileWithOrders, ProfileWithRelations,
};

pub use products::ProductRepository;
pub use profiles::ProfileRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx (includes pool acquire timeouts).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Read access to user profiles, plus the status write used by the users page.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load one profile with its wishlists, orders and carts.
    ///
    /// Returns `Ok(None)` when no profile has this id.
    async fn find_with_relations(
        &self,
        id: &ProfileId,
    ) -> Result<Option<ProfileWithRelations>, RepositoryError>;

    /// Load one page of profiles matching `filter`, each with its orders.
    async fn find_many_with_orders(
        &self,
        filter: &ProfileFilter,
        page: Pagination,
    ) -> Result<Vec<ProfileWithOrders>, RepositoryError>;

    /// Count all profiles matching `filter`, ignoring pagination.
    async fn count(&self, filter: &ProfileFilter) -> Result<u64, RepositoryError>;

    /// Set a profile's account status.
    ///
    /// Returns `Ok(false)` when no profile has this id.
    async fn set_status(&self, id: &ProfileId, status: UserStatus)
    -> Result<bool, RepositoryError>;

    /// Check that the store is reachable.
    async fn health_check(&self) -> Result<(), RepositoryError>;
}

/// Read access to the product catalog.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Load display projections for every product in `ids` that exists.
    ///
    /// Missing ids are silently absent from the result.
    async fn find_summaries(&self, ids: &[ProductId])
    -> Result<Vec<ProductSummary>, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

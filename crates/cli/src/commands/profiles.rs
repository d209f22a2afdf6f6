//! Profile inspection and moderation commands.
//!
//! # Usage
//!
//! ```bash
//! # Show one profile with resolved wishlists, orders and carts
//! th-cli profiles show prof-123
//!
//! # List profiles with purchase summaries
//! th-cli profiles list --skip 0 --take 20 --email example.com
//!
//! # Block or unblock a profile
//! th-cli profiles block prof-123
//! th-cli profiles unblock prof-123
//! ```
//!
//! Results are printed to stdout as pretty JSON, matching the admin API.

use serde::Serialize;
use textile_hub_admin::{
    config::ListingConfig,
    db::{ProductRepository, ProfileRepository},
    models::ProfileFilter,
    services::{ProfileService, UsersQuery},
};
use textile_hub_core::{ProfileId, UserStatus};

use super::{CommandError, connect};

/// Listing options for `profiles list`.
#[derive(Debug, Default)]
pub struct ListOptions {
    pub skip: i64,
    pub take: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Print one enriched profile together with its purchase history.
///
/// # Errors
///
/// Returns `CommandError` if the profile does not exist or a store fails.
pub async fn show(id: &str) -> Result<(), CommandError> {
    let pool = connect().await?;
    let profiles = ProfileRepository::new(pool.clone());
    let products = ProductRepository::new(pool);
    let service = ProfileService::new(&profiles, &products);

    let profile = service
        .get_one_user_with_profile(&ProfileId::new(id))
        .await?;
    let history = profile.purchase_history();

    print_json(&serde_json::json!({
        "profile": profile,
        "purchase_history": history,
    }))
}

/// Print one page of profile summaries.
///
/// # Errors
///
/// Returns `CommandError` on invalid pagination or store failure.
pub async fn list(options: ListOptions) -> Result<(), CommandError> {
    let pool = connect().await?;
    let profiles = ProfileRepository::new(pool.clone());
    let products = ProductRepository::new(pool);
    let service = ProfileService::new(&profiles, &products);

    let query = UsersQuery {
        skip: options.skip,
        take: ListingConfig::from_env()?.page_size(options.take),
        filter: ProfileFilter::new(options.first_name, options.last_name, options.email),
    };
    let page = service.get_users_with_profile(&query).await?;

    tracing::info!(returned = page.users.len(), total = page.total, "Listed profiles");
    print_json(&page)
}

/// Set a profile's status and print the result.
///
/// # Errors
///
/// Returns `CommandError` if the profile does not exist or the write fails.
pub async fn set_status(id: &str, status: UserStatus) -> Result<(), CommandError> {
    let pool = connect().await?;
    let profiles = ProfileRepository::new(pool.clone());
    let products = ProductRepository::new(pool);
    let service = ProfileService::new(&profiles, &products);

    let change = service
        .set_profile_status(&ProfileId::new(id), status)
        .await?;
    print_json(&change)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CommandError> {
    let rendered = serde_json::to_string_pretty(value)?;
    #[allow(clippy::print_stdout)]
    {
        println!("{rendered}");
    }
    Ok(())
}

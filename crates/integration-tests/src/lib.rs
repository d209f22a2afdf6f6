//! Integration test support for Textile Hub.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process tests (no database needed)
//! cargo test -p textile-hub-integration-tests
//!
//! # Live-server smoke tests (admin server + seeded database)
//! cargo test -p textile-hub-integration-tests -- --ignored
//! ```
//!
//! # Contents
//!
//! - [`FakeStore`] - In-memory profile and product store with failure
//!   switches and lookup recording
//! - [`ProfileBuilder`], [`product`] - Fixtures
//! - [`app`] - The admin router over a [`FakeStore`]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;
use tokio::sync::{Mutex, RwLock};

use textile_hub_admin::config::{AdminConfig, ListingConfig};
use textile_hub_admin::db::{ProductStore, ProfileStore, RepositoryError};
use textile_hub_admin::models::{
    CartRecord, LinkedUser, OrderRecord, Pagination, ProductSummary, ProfileDetails, ProfileFilter,
    ProfileWithOrders, ProfileWithRelations, WishlistRecord,
};
use textile_hub_admin::routes;
use textile_hub_admin::state::AppState;
use textile_hub_core::{
    CartId, Money, ProductId, ProductRef, ProductStatus, ProfileId, ProfileRole, UserStatus,
    WishlistId,
};

// =============================================================================
// Fake Store
// =============================================================================

#[derive(Default)]
struct FakeData {
    /// Listing order is insertion order.
    profiles: Vec<ProfileWithRelations>,
    products: HashMap<ProductId, ProductSummary>,
}

/// In-memory implementation of both store traits.
#[derive(Default)]
pub struct FakeStore {
    data: RwLock<FakeData>,
    product_lookups: Mutex<Vec<Vec<ProductId>>>,
    fail_profiles: AtomicBool,
    fail_products: AtomicBool,
    fail_count: AtomicBool,
}

impl FakeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed profiles and products.
    pub async fn seed(
        &self,
        profiles: impl IntoIterator<Item = ProfileWithRelations>,
        products: impl IntoIterator<Item = ProductSummary>,
    ) {
        let mut data = self.data.write().await;
        data.profiles.extend(profiles);
        data.products
            .extend(products.into_iter().map(|p| (p.id.clone(), p)));
    }

    /// Make every profile store call fail.
    pub fn fail_profiles(&self, fail: bool) {
        self.fail_profiles.store(fail, Ordering::SeqCst);
    }

    /// Make every product store call fail.
    pub fn fail_products(&self, fail: bool) {
        self.fail_products.store(fail, Ordering::SeqCst);
    }

    /// Make only the profile count fail.
    pub fn fail_count(&self, fail: bool) {
        self.fail_count.store(fail, Ordering::SeqCst);
    }

    /// Every id list passed to `find_summaries`, in call order.
    pub async fn product_lookups(&self) -> Vec<Vec<ProductId>> {
        self.product_lookups.lock().await.clone()
    }

    /// Current status of a seeded profile.
    pub async fn status_of(&self, id: &str) -> Option<UserStatus> {
        self.data
            .read()
            .await
            .profiles
            .iter()
            .find(|p| p.profile.id.as_str() == id)
            .map(|p| p.profile.status)
    }

    fn check(flag: &AtomicBool, what: &str) -> Result<(), RepositoryError> {
        if flag.load(Ordering::SeqCst) {
            return Err(RepositoryError::DataCorruption(format!(
                "simulated {what} failure"
            )));
        }
        Ok(())
    }
}

fn window(page: Pagination) -> (usize, usize) {
    (
        usize::try_from(page.skip()).unwrap_or(0),
        usize::try_from(page.take()).unwrap_or(0),
    )
}

#[async_trait]
impl ProfileStore for FakeStore {
    async fn find_with_relations(
        &self,
        id: &ProfileId,
    ) -> Result<Option<ProfileWithRelations>, RepositoryError> {
        Self::check(&self.fail_profiles, "profile store")?;
        Ok(self
            .data
            .read()
            .await
            .profiles
            .iter()
            .find(|p| &p.profile.id == id)
            .cloned())
    }

    async fn find_many_with_orders(
        &self,
        filter: &ProfileFilter,
        page: Pagination,
    ) -> Result<Vec<ProfileWithOrders>, RepositoryError> {
        Self::check(&self.fail_profiles, "profile store")?;
        let (skip, take) = window(page);
        Ok(self
            .data
            .read()
            .await
            .profiles
            .iter()
            .filter(|p| filter.matches(&p.profile))
            .skip(skip)
            .take(take)
            .map(|p| ProfileWithOrders {
                profile: p.profile.clone(),
                orders: p.orders.clone(),
            })
            .collect())
    }

    async fn count(&self, filter: &ProfileFilter) -> Result<u64, RepositoryError> {
        Self::check(&self.fail_profiles, "profile store")?;
        Self::check(&self.fail_count, "profile count")?;
        let matching = self
            .data
            .read()
            .await
            .profiles
            .iter()
            .filter(|p| filter.matches(&p.profile))
            .count();
        Ok(u64::try_from(matching).unwrap_or(u64::MAX))
    }

    async fn set_status(
        &self,
        id: &ProfileId,
        status: UserStatus,
    ) -> Result<bool, RepositoryError> {
        Self::check(&self.fail_profiles, "profile store")?;
        let mut data = self.data.write().await;
        let Some(profile) = data.profiles.iter_mut().find(|p| &p.profile.id == id) else {
            return Ok(false);
        };
        profile.profile.status = status;
        Ok(true)
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        Self::check(&self.fail_profiles, "profile store")
    }
}

#[async_trait]
impl ProductStore for FakeStore {
    async fn find_summaries(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<ProductSummary>, RepositoryError> {
        self.product_lookups.lock().await.push(ids.to_vec());
        Self::check(&self.fail_products, "product store")?;
        let data = self.data.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| data.products.get(id).cloned())
            .collect())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// A catalog product priced in cents.
#[must_use]
pub fn product(id: &str, cents: u32) -> ProductSummary {
    ProductSummary {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price: Money::from_cents(cents),
        image: vec![format!("{id}.jpg")],
        status: ProductStatus::Available,
    }
}

fn refs(ids: &[&str]) -> Vec<ProductRef> {
    ids.iter().copied().map(ProductRef::from).collect()
}

/// Builder for seeded profiles.
pub struct ProfileBuilder {
    profile: ProfileWithRelations,
}

impl ProfileBuilder {
    /// A customer profile with no relations.
    #[must_use]
    pub fn new(id: &str) -> Self {
        let created_at: DateTime<Utc> = Utc::now() - Duration::days(30);
        Self {
            profile: ProfileWithRelations {
                profile: ProfileDetails {
                    id: ProfileId::new(id),
                    role: ProfileRole::Customer,
                    status: UserStatus::Active,
                    first_name: "Test".to_string(),
                    last_name: "Customer".to_string(),
                    phone_number: None,
                    address: None,
                    image: None,
                    created_at,
                    updated_at: created_at,
                    user: LinkedUser {
                        email: format!("{id}@textilehub.test"),
                        email_verified: true,
                    },
                },
                wishlists: Vec::new(),
                orders: Vec::new(),
                carts: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn name(mut self, first: &str, last: &str) -> Self {
        self.profile.profile.first_name = first.to_string();
        self.profile.profile.last_name = last.to_string();
        self
    }

    #[must_use]
    pub fn email(mut self, email: &str) -> Self {
        self.profile.profile.user.email = email.to_string();
        self
    }

    #[must_use]
    pub const fn status(mut self, status: UserStatus) -> Self {
        self.profile.profile.status = status;
        self
    }

    #[must_use]
    pub fn wishlist(mut self, id: &str, products: &[&str]) -> Self {
        self.profile.wishlists.push(WishlistRecord {
            id: WishlistId::new(id),
            products: refs(products),
        });
        self
    }

    #[must_use]
    pub fn cart(mut self, id: &str, products: &[&str]) -> Self {
        self.profile.carts.push(CartRecord {
            id: CartId::new(id),
            products: refs(products),
        });
        self
    }

    /// An order with one entry per unit and a shipping charge in cents.
    #[must_use]
    pub fn order(mut self, products: &[&str], shipping_cents: u32) -> Self {
        self.profile.orders.push(OrderRecord {
            products: refs(products),
            shipping_charge: Money::from_cents(shipping_cents),
        });
        self
    }

    #[must_use]
    pub fn build(self) -> ProfileWithRelations {
        self.profile
    }
}

// =============================================================================
// Router Harness
// =============================================================================

/// Config with default listing bounds and no Sentry.
#[must_use]
pub fn test_config(listing: ListingConfig) -> AdminConfig {
    AdminConfig {
        database_url: SecretString::from("postgres://unused/test"),
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 0,
        listing,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// The admin router backed by `store` for both profiles and products.
#[must_use]
pub fn app(store: Arc<FakeStore>) -> Router {
    app_with_listing(store, ListingConfig::default())
}

/// As [`app`], with custom page size bounds.
#[must_use]
pub fn app_with_listing(store: Arc<FakeStore>, listing: ListingConfig) -> Router {
    let state = AppState::with_stores(test_config(listing), store.clone(), store);
    routes::routes().with_state(state)
}

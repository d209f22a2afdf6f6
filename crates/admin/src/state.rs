//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::db::{ProductRepository, ProductStore, ProfileRepository, ProfileStore};
use crate::services::ProfileService;

/// Application state shared across all handlers.
///
/// Cloning is cheap: everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    profiles: Arc<dyn ProfileStore>,
    products: Arc<dyn ProductStore>,
}

impl AppState {
    /// Build state backed by `PostgreSQL` repositories sharing one pool.
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool) -> Self {
        Self::with_stores(
            config,
            Arc::new(ProfileRepository::new(pool.clone())),
            Arc::new(ProductRepository::new(pool)),
        )
    }

    /// Build state over arbitrary store implementations.
    #[must_use]
    pub fn with_stores(
        config: AdminConfig,
        profiles: Arc<dyn ProfileStore>,
        products: Arc<dyn ProductStore>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                profiles,
                products,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn profiles(&self) -> &dyn ProfileStore {
        self.inner.profiles.as_ref()
    }

    /// A profile service borrowing this state's stores.
    #[must_use]
    pub fn profile_service(&self) -> ProfileService<'_> {
        ProfileService::new(self.inner.profiles.as_ref(), self.inner.products.as_ref())
    }
}

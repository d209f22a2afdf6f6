//! Product domain types as seen by the dashboard.

use std::collections::HashMap;

use serde::Serialize;

use textile_hub_core::{Money, ProductId, ProductStatus};

/// Display projection of a catalog product.
///
/// Only the fields the profile views render are loaded; descriptions,
/// stock and attributes stay in the catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSummary {
    /// Catalog identifier.
    pub id: ProductId,
    /// Product name (stored lowercase by the catalog).
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Image asset references, primary image first.
    pub image: Vec<String>,
    /// Availability.
    pub status: ProductStatus,
}

/// Products resolved by one batch fetch, keyed by id.
pub type ProductCatalog = HashMap<ProductId, ProductSummary>;

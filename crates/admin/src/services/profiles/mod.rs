//! User profile aggregation.
//!
//! Two read operations back the users screens:
//!
//! 1. **Enrichment** (`get_one_user_with_profile`): load one profile with its
//!    wishlists, orders and carts, batch-fetch every referenced product once,
//!    and replace each reference with the product it resolves to.
//! 2. **Summary** (`get_users_with_profile`): load a filtered page of profiles
//!    with their orders and the total match count concurrently, then derive
//!    per-profile purchase metrics.
//!
//! Enrichment keeps list order and multiplicity: an order holding the same
//! product twice still holds it twice afterwards. Only the id set sent to the
//! product store is deduplicated. References that no longer resolve are
//! dropped.
//!
//! Summary spend is priced at [`placeholder_unit_price`] per product rather
//! than each product's real price, because the listing does not join the
//! catalog. Real prices are used by [`EnrichedProfile::purchase_history`].

mod error;

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use textile_hub_core::{Money, ProductId, ProductRef, ProfileId, UserStatus};

use crate::db::{ProductStore, ProfileStore};
use crate::models::{
    EnrichedCart, EnrichedOrder, EnrichedProfile, EnrichedWishlist, Pagination, ProductCatalog,
    ProductSummary, ProfileFilter, ProfilePage, ProfileStatusChange, ProfileSummary,
    ProfileWithOrders, ProfileWithRelations, ValidationError,
};

pub use error::ProfileError;

/// Fixed unit price used for listing spend figures.
#[must_use]
pub fn placeholder_unit_price() -> Money {
    Money::from_cents(1000)
}

/// Parameters for a users listing request.
#[derive(Debug, Clone, Default)]
pub struct UsersQuery {
    /// Number of matching profiles to skip.
    pub skip: i64,
    /// Page size.
    pub take: i64,
    /// Optional substring filters.
    pub filter: ProfileFilter,
}

/// Profile aggregation over injected stores.
pub struct ProfileService<'a> {
    profiles: &'a dyn ProfileStore,
    products: &'a dyn ProductStore,
}

impl<'a> ProfileService<'a> {
    /// Create a new profile service.
    #[must_use]
    pub const fn new(profiles: &'a dyn ProfileStore, products: &'a dyn ProductStore) -> Self {
        Self { profiles, products }
    }

    /// Load one profile with every product reference resolved.
    ///
    /// # Errors
    ///
    /// - `ProfileError::Validation` if `id` is blank (no store access happens).
    /// - `ProfileError::NotFound` if no profile has this id.
    /// - `ProfileError::BackingStore` if either store fails.
    #[instrument(skip(self), fields(profile_id = %id))]
    pub async fn get_one_user_with_profile(
        &self,
        id: &ProfileId,
    ) -> Result<EnrichedProfile, ProfileError> {
        if id.is_blank() {
            return Err(ValidationError::EmptyId.into());
        }

        let profile = self
            .profiles
            .find_with_relations(id)
            .await?
            .ok_or_else(|| ProfileError::NotFound(id.clone()))?;

        let product_ids = referenced_product_ids(&profile);
        let catalog: ProductCatalog = if product_ids.is_empty() {
            ProductCatalog::new()
        } else {
            self.products
                .find_summaries(&product_ids)
                .await?
                .into_iter()
                .map(|product| (product.id.clone(), product))
                .collect()
        };

        let dangling = product_ids.len().saturating_sub(catalog.len());
        debug!(
            distinct_products = product_ids.len(),
            resolved = catalog.len(),
            "Resolved profile product references"
        );
        if dangling > 0 {
            info!(dangling, "Dropping references to products that no longer exist");
        }

        Ok(enrich(profile, &catalog))
    }

    /// Load one page of profiles with derived purchase metrics.
    ///
    /// The page and the total count are fetched concurrently; if either
    /// fails, nothing is returned.
    ///
    /// # Errors
    ///
    /// - `ProfileError::Validation` if `skip < 0` or `take <= 0`.
    /// - `ProfileError::BackingStore` if the profile store fails.
    #[instrument(skip(self, query), fields(skip = query.skip, take = query.take))]
    pub async fn get_users_with_profile(
        &self,
        query: &UsersQuery,
    ) -> Result<ProfilePage, ProfileError> {
        let page = Pagination::new(query.skip, query.take)?;

        let (rows, total) = tokio::try_join!(
            self.profiles.find_many_with_orders(&query.filter, page),
            self.profiles.count(&query.filter),
        )?;

        let unit_price = placeholder_unit_price();
        let users: Vec<ProfileSummary> = rows
            .into_iter()
            .map(|row| summarize(row, unit_price))
            .collect();

        debug!(
            returned = users.len(),
            total,
            filtered = !query.filter.is_empty(),
            "Loaded users page"
        );
        Ok(ProfilePage { users, total })
    }

    /// Block or unblock a profile.
    ///
    /// # Errors
    ///
    /// - `ProfileError::Validation` if `id` is blank.
    /// - `ProfileError::NotFound` if no profile has this id.
    /// - `ProfileError::BackingStore` if the write fails.
    #[instrument(skip(self), fields(profile_id = %id, status = %status))]
    pub async fn set_profile_status(
        &self,
        id: &ProfileId,
        status: UserStatus,
    ) -> Result<ProfileStatusChange, ProfileError> {
        if id.is_blank() {
            return Err(ValidationError::EmptyId.into());
        }

        if !self.profiles.set_status(id, status).await? {
            return Err(ProfileError::NotFound(id.clone()));
        }

        info!("Profile status updated");
        Ok(ProfileStatusChange {
            id: id.clone(),
            status,
        })
    }
}

/// Every distinct product id referenced by the profile, in first-seen order.
fn referenced_product_ids(profile: &ProfileWithRelations) -> Vec<ProductId> {
    let refs = profile
        .wishlists
        .iter()
        .flat_map(|w| &w.products)
        .chain(profile.orders.iter().flat_map(|o| &o.products))
        .chain(profile.carts.iter().flat_map(|c| &c.products));

    let mut seen = HashSet::new();
    refs.map(ProductRef::id)
        .filter(|id| seen.insert(*id))
        .cloned()
        .collect()
}

fn resolve_all(refs: &[ProductRef], catalog: &ProductCatalog) -> Vec<ProductSummary> {
    refs.iter()
        .filter_map(|product| product.resolve(catalog))
        .cloned()
        .collect()
}

fn enrich(profile: ProfileWithRelations, catalog: &ProductCatalog) -> EnrichedProfile {
    EnrichedProfile {
        profile: profile.profile,
        wishlists: profile
            .wishlists
            .into_iter()
            .map(|w| EnrichedWishlist {
                products: resolve_all(&w.products, catalog),
                id: w.id,
            })
            .collect(),
        orders: profile
            .orders
            .into_iter()
            .map(|o| EnrichedOrder {
                products: resolve_all(&o.products, catalog),
                shipping_charge: o.shipping_charge,
            })
            .collect(),
        carts: profile
            .carts
            .into_iter()
            .map(|c| EnrichedCart {
                products: resolve_all(&c.products, catalog),
                id: c.id,
            })
            .collect(),
    }
}

fn summarize(row: ProfileWithOrders, unit_price: Money) -> ProfileSummary {
    let order_count = row.orders.len();
    let total_products_purchased: usize = row.orders.iter().map(|o| o.products.len()).sum();
    let total_amount_spent: Money = row
        .orders
        .iter()
        .map(|o| unit_price.times(o.products.len()) + o.shipping_charge)
        .sum();

    let average_expenses = if order_count == 0 {
        Decimal::ZERO
    } else {
        Decimal::from(total_products_purchased)
            .checked_div(Decimal::from(order_count))
            .unwrap_or(Decimal::ZERO)
    };

    ProfileSummary {
        profile: row.profile,
        total_products_purchased,
        total_amount_spent,
        average_expenses,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use textile_hub_core::{CartId, ProductStatus, ProfileRole, WishlistId};

    use super::*;
    use crate::models::{CartRecord, LinkedUser, OrderRecord, ProfileDetails, WishlistRecord};

    fn details(id: &str) -> ProfileDetails {
        let now = Utc::now();
        ProfileDetails {
            id: ProfileId::new(id),
            role: ProfileRole::Customer,
            status: UserStatus::Active,
            first_name: "Ada".to_string(),
            last_name: "Okafor".to_string(),
            phone_number: None,
            address: None,
            image: None,
            created_at: now,
            updated_at: now,
            user: LinkedUser {
                email: "ada@example.com".to_string(),
                email_verified: true,
            },
        }
    }

    fn refs(ids: &[&str]) -> Vec<ProductRef> {
        ids.iter().copied().map(ProductRef::from).collect()
    }

    fn product(id: &str, cents: u32) -> ProductSummary {
        ProductSummary {
            id: ProductId::new(id),
            name: format!("product {id}"),
            price: Money::from_cents(cents),
            image: Vec::new(),
            status: ProductStatus::Available,
        }
    }

    fn catalog(products: Vec<ProductSummary>) -> ProductCatalog {
        products.into_iter().map(|p| (p.id.clone(), p)).collect()
    }

    fn order(ids: &[&str], shipping_cents: u32) -> OrderRecord {
        OrderRecord {
            products: refs(ids),
            shipping_charge: Money::from_cents(shipping_cents),
        }
    }

    #[test]
    fn test_referenced_ids_are_deduplicated_in_first_seen_order() {
        let profile = ProfileWithRelations {
            profile: details("prof-1"),
            wishlists: vec![WishlistRecord {
                id: WishlistId::new("w1"),
                products: refs(&["p2", "p1"]),
            }],
            orders: vec![order(&["p1", "p3", "p3"], 0)],
            carts: vec![CartRecord {
                id: CartId::new("c1"),
                products: refs(&["p2", "p4"]),
            }],
        };

        let ids = referenced_product_ids(&profile);
        let ids: Vec<&str> = ids.iter().map(ProductId::as_str).collect();
        assert_eq!(ids, ["p2", "p1", "p3", "p4"]);
    }

    #[test]
    fn test_enrich_drops_dangling_and_keeps_order() {
        let profile = ProfileWithRelations {
            profile: details("prof-1"),
            wishlists: vec![WishlistRecord {
                id: WishlistId::new("w1"),
                products: refs(&["p1", "p2", "p3"]),
            }],
            orders: Vec::new(),
            carts: Vec::new(),
        };
        let catalog = catalog(vec![product("p3", 300), product("p1", 100)]);

        let enriched = enrich(profile, &catalog);
        let names: Vec<&str> = enriched.wishlists[0]
            .products
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(names, ["p1", "p3"]);
        assert_eq!(enriched.wishlists[0].id, WishlistId::new("w1"));
    }

    #[test]
    fn test_enrich_preserves_multiplicity_within_an_order() {
        let profile = ProfileWithRelations {
            profile: details("prof-1"),
            wishlists: Vec::new(),
            orders: vec![order(&["p1", "p1", "p2"], 500)],
            carts: Vec::new(),
        };
        let catalog = catalog(vec![product("p1", 1500), product("p2", 2000)]);

        let enriched = enrich(profile, &catalog);
        assert_eq!(enriched.orders[0].products.len(), 3);
        assert_eq!(enriched.orders[0].shipping_charge, Money::from_cents(500));

        let history = enriched.purchase_history();
        assert_eq!(history.total_orders, 1);
        assert_eq!(history.order_totals, vec![Money::from_cents(5500)]);
        assert_eq!(history.total_spent, Money::from_cents(5500));
    }

    #[test]
    fn test_summarize_without_orders_is_all_zero() {
        let summary = summarize(
            ProfileWithOrders {
                profile: details("prof-1"),
                orders: Vec::new(),
            },
            placeholder_unit_price(),
        );

        assert_eq!(summary.total_products_purchased, 0);
        assert_eq!(summary.total_amount_spent, Money::ZERO);
        assert_eq!(summary.average_expenses, Decimal::ZERO);
    }

    #[test]
    fn test_summarize_uses_placeholder_price_and_shipping() {
        let summary = summarize(
            ProfileWithOrders {
                profile: details("prof-1"),
                orders: vec![order(&["p1", "p2", "p3"], 500), order(&["p9", "p9"], 0)],
            },
            placeholder_unit_price(),
        );

        assert_eq!(summary.total_products_purchased, 5);
        // 3 * 10 + 5 + 2 * 10 + 0
        assert_eq!(summary.total_amount_spent.amount(), Decimal::new(55, 0));
        assert_eq!(summary.average_expenses, Decimal::new(25, 1));
    }
}

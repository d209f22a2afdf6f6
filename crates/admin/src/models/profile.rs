//! User profile domain types.
//!
//! Two shapes exist for each relation: the stored shape, which only carries
//! [`ProductRef`]s, and the enriched shape, where every reference that still
//! resolves has been replaced by a [`ProductSummary`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use textile_hub_core::{
    CartId, Money, ProductRef, ProfileId, ProfileRole, UserStatus, WishlistId,
};

use super::product::ProductSummary;

/// The authentication record a profile is linked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedUser {
    /// Sign-in email address.
    pub email: String,
    /// Whether the address has been verified.
    pub email_verified: bool,
}

/// Scalar profile fields, shared by every profile view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileDetails {
    pub id: ProfileId,
    pub role: ProfileRole,
    pub status: UserStatus,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: LinkedUser,
}

/// A stored wishlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistRecord {
    pub id: WishlistId,
    pub products: Vec<ProductRef>,
}

/// A stored cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRecord {
    pub id: CartId,
    pub products: Vec<ProductRef>,
}

/// A placed order, as far as profile views are concerned.
///
/// One entry per unit: a product bought twice appears twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub products: Vec<ProductRef>,
    pub shipping_charge: Money,
}

/// A profile with all three relations loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileWithRelations {
    pub profile: ProfileDetails,
    pub wishlists: Vec<WishlistRecord>,
    pub orders: Vec<OrderRecord>,
    pub carts: Vec<CartRecord>,
}

/// A profile with only its order history loaded, for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileWithOrders {
    pub profile: ProfileDetails,
    pub orders: Vec<OrderRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedWishlist {
    pub id: WishlistId,
    pub products: Vec<ProductSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedCart {
    pub id: CartId,
    pub products: Vec<ProductSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedOrder {
    pub products: Vec<ProductSummary>,
    pub shipping_charge: Money,
}

impl EnrichedOrder {
    /// Sum of resolved product prices plus shipping.
    #[must_use]
    pub fn total(&self) -> Money {
        self.products.iter().map(|p| p.price).sum::<Money>() + self.shipping_charge
    }
}

/// Full detail record for the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedProfile {
    #[serde(flatten)]
    pub profile: ProfileDetails,
    pub wishlists: Vec<EnrichedWishlist>,
    pub orders: Vec<EnrichedOrder>,
    pub carts: Vec<EnrichedCart>,
}

impl EnrichedProfile {
    /// Order statistics priced from the resolved products.
    ///
    /// Products that no longer exist were dropped during enrichment and so
    /// contribute nothing here.
    #[must_use]
    pub fn purchase_history(&self) -> PurchaseHistory {
        let order_totals: Vec<Money> = self.orders.iter().map(EnrichedOrder::total).collect();
        PurchaseHistory {
            total_orders: self.orders.len(),
            total_spent: order_totals.iter().sum(),
            order_totals,
        }
    }
}

/// Purchase figures shown alongside the detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseHistory {
    pub total_orders: usize,
    pub total_spent: Money,
    /// Per-order totals, in order history order.
    pub order_totals: Vec<Money>,
}

/// A listing row with derived order metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSummary {
    #[serde(flatten)]
    pub profile: ProfileDetails,
    pub total_products_purchased: usize,
    /// Placeholder-priced; see `services::profiles::placeholder_unit_price`.
    pub total_amount_spent: Money,
    /// Average number of products per order.
    pub average_expenses: Decimal,
}

/// One page of listing rows plus the unpaginated match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfilePage {
    pub users: Vec<ProfileSummary>,
    pub total: u64,
}

/// Result of a block/unblock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileStatusChange {
    pub id: ProfileId,
    pub status: UserStatus,
}

//! `PostgreSQL` profile store.
//!
//! Queries are built at runtime (`query_as::<_, Row>`) because the filter
//! predicate is shared between the page query and the count query.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use textile_hub_core::{
    CartId, Money, ProductRef, ProductId, ProfileId, ProfileRole, UserStatus, WishlistId,
};

use super::{ProfileStore, RepositoryError};
use crate::models::{
    CartRecord, LinkedUser, OrderRecord, Pagination, ProfileDetails, ProfileFilter,
    ProfileWithOrders, ProfileWithRelations, WishlistRecord,
};

const PROFILE_COLUMNS: &str = r"
    p.id, p.role, p.status, p.first_name, p.last_name, p.phone_number,
    p.address, p.image, p.created_at, p.updated_at, u.email, u.email_verified
";

const PROFILE_SOURCE: &str = r"
    hub.user_profile p
    JOIN hub.user_account u ON u.id = p.user_id
";

/// Binds $1..$3 to `ILIKE` patterns (or NULL for an absent filter).
const PROFILE_FILTER: &str = r"
    ($1::text IS NULL OR p.first_name ILIKE $1)
    AND ($2::text IS NULL OR p.last_name ILIKE $2)
    AND ($3::text IS NULL OR u.email ILIKE $3)
";

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: String,
    role: ProfileRole,
    status: UserStatus,
    first_name: String,
    last_name: String,
    phone_number: Option<String>,
    address: Option<String>,
    image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    email: String,
    email_verified: bool,
}

impl From<ProfileRow> for ProfileDetails {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: ProfileId::new(row.id),
            role: row.role,
            status: row.status,
            first_name: row.first_name,
            last_name: row.last_name,
            phone_number: row.phone_number,
            address: row.address,
            image: row.image,
            created_at: row.created_at,
            updated_at: row.updated_at,
            user: LinkedUser {
                email: row.email,
                email_verified: row.email_verified,
            },
        }
    }
}

/// Wishlist and cart rows share a shape.
#[derive(Debug, sqlx::FromRow)]
struct ProductListRow {
    id: String,
    product_ids: Vec<String>,
}

impl From<ProductListRow> for WishlistRecord {
    fn from(row: ProductListRow) -> Self {
        Self {
            id: WishlistId::new(row.id),
            products: product_refs(row.product_ids),
        }
    }
}

impl From<ProductListRow> for CartRecord {
    fn from(row: ProductListRow) -> Self {
        Self {
            id: CartId::new(row.id),
            products: product_refs(row.product_ids),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    profile_id: String,
    product_ids: Vec<String>,
    shipping_charge: Decimal,
}

impl OrderRow {
    fn into_parts(self) -> Result<(ProfileId, OrderRecord), RepositoryError> {
        let shipping_charge = Money::new(self.shipping_charge).map_err(|e| {
            RepositoryError::DataCorruption(format!(
                "invalid shipping charge on order for profile {}: {e}",
                self.profile_id
            ))
        })?;

        Ok((
            ProfileId::new(self.profile_id),
            OrderRecord {
                products: product_refs(self.product_ids),
                shipping_charge,
            },
        ))
    }
}

fn product_refs(ids: Vec<String>) -> Vec<ProductRef> {
    ids.into_iter()
        .map(|id| ProductRef::new(ProductId::new(id)))
        .collect()
}

/// Turn a substring filter into an `ILIKE` pattern, escaping wildcards.
fn like_pattern(value: Option<&str>) -> Option<String> {
    value.map(|v| {
        let escaped = v
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{escaped}%")
    })
}

// =============================================================================
// Repository
// =============================================================================

/// `PostgreSQL` implementation of [`ProfileStore`].
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn product_lists(
        &self,
        table: ListTable,
        profile_id: &ProfileId,
    ) -> Result<Vec<ProductListRow>, sqlx::Error> {
        let sql = format!(
            "SELECT id, product_ids FROM {} WHERE profile_id = $1 ORDER BY created_at, id",
            table.name()
        );
        sqlx::query_as::<_, ProductListRow>(&sql)
            .bind(profile_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn orders_for(&self, profile_ids: &[String]) -> Result<Vec<OrderRow>, sqlx::Error> {
        sqlx::query_as::<_, OrderRow>(
            r"
            SELECT profile_id, product_ids, shipping_charge
            FROM hub.customer_order
            WHERE profile_id = ANY($1)
            ORDER BY created_at, id
            ",
        )
        .bind(profile_ids)
        .fetch_all(&self.pool)
        .await
    }
}

#[derive(Debug, Clone, Copy)]
enum ListTable {
    Wishlist,
    Cart,
}

impl ListTable {
    const fn name(self) -> &'static str {
        match self {
            Self::Wishlist => "hub.wishlist",
            Self::Cart => "hub.cart",
        }
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    #[instrument(skip(self), fields(profile_id = %id))]
    async fn find_with_relations(
        &self,
        id: &ProfileId,
    ) -> Result<Option<ProfileWithRelations>, RepositoryError> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM {PROFILE_SOURCE} WHERE p.id = $1");
        let Some(row) = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let profile_ids = [id.as_str().to_owned()];
        let (wishlists, orders, carts) = tokio::try_join!(
            self.product_lists(ListTable::Wishlist, id),
            self.orders_for(&profile_ids),
            self.product_lists(ListTable::Cart, id),
        )?;

        let orders = orders
            .into_iter()
            .map(|row| row.into_parts().map(|(_, order)| order))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(ProfileWithRelations {
            profile: row.into(),
            wishlists: wishlists.into_iter().map(Into::into).collect(),
            orders,
            carts: carts.into_iter().map(Into::into).collect(),
        }))
    }

    #[instrument(skip(self))]
    async fn find_many_with_orders(
        &self,
        filter: &ProfileFilter,
        page: Pagination,
    ) -> Result<Vec<ProfileWithOrders>, RepositoryError> {
        let sql = format!(
            "SELECT {PROFILE_COLUMNS} FROM {PROFILE_SOURCE} WHERE {PROFILE_FILTER}
             ORDER BY p.created_at DESC, p.id
             OFFSET $4 LIMIT $5"
        );
        let rows = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(like_pattern(filter.first_name()))
            .bind(like_pattern(filter.last_name()))
            .bind(like_pattern(filter.email()))
            .bind(page.skip())
            .bind(page.take())
            .fetch_all(&self.pool)
            .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let profile_ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
        let mut orders_by_profile: HashMap<ProfileId, Vec<OrderRecord>> = HashMap::new();
        for row in self.orders_for(&profile_ids).await? {
            let (profile_id, order) = row.into_parts()?;
            orders_by_profile.entry(profile_id).or_default().push(order);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let profile = ProfileDetails::from(row);
                let orders = orders_by_profile.remove(&profile.id).unwrap_or_default();
                ProfileWithOrders { profile, orders }
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &ProfileFilter) -> Result<u64, RepositoryError> {
        let sql = format!("SELECT COUNT(*) FROM {PROFILE_SOURCE} WHERE {PROFILE_FILTER}");
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(like_pattern(filter.first_name()))
            .bind(like_pattern(filter.last_name()))
            .bind(like_pattern(filter.email()))
            .fetch_one(&self.pool)
            .await?;

        u64::try_from(count)
            .map_err(|e| RepositoryError::DataCorruption(format!("negative profile count: {e}")))
    }

    #[instrument(skip(self), fields(profile_id = %id, status = %status))]
    async fn set_status(
        &self,
        id: &ProfileId,
        status: UserStatus,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE hub.user_profile
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

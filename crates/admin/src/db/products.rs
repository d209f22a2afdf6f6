//! `PostgreSQL` product store.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use textile_hub_core::{Money, ProductId, ProductStatus};

use super::{ProductStore, RepositoryError};
use crate::models::ProductSummary;

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    price: Decimal,
    image: Vec<String>,
    status: ProductStatus,
}

impl TryFrom<ProductRow> for ProductSummary {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Money::new(row.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price for product {}: {e}", row.id))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            price,
            image: row.image,
            status: row.status,
        })
    }
}

/// `PostgreSQL` implementation of [`ProductStore`].
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    async fn find_summaries(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<ProductSummary>, RepositoryError> {
        let ids: Vec<String> = ids.iter().map(|id| id.as_str().to_owned()).collect();
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price, image, status
            FROM hub.product
            WHERE id = ANY($1)
            ",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_row_converts() {
        let row = ProductRow {
            id: "p1".to_string(),
            name: "linen shirt".to_string(),
            price: Decimal::new(4500, 2),
            image: vec!["image-abc".to_string()],
            status: ProductStatus::Available,
        };
        let product = ProductSummary::try_from(row).expect("valid row");
        assert_eq!(product.id, ProductId::new("p1"));
        assert_eq!(product.price, Money::from_cents(4500));
    }

    #[test]
    fn test_product_row_rejects_negative_price() {
        let row = ProductRow {
            id: "p1".to_string(),
            name: "linen shirt".to_string(),
            price: Decimal::new(-1, 0),
            image: Vec::new(),
            status: ProductStatus::Discontinued,
        };
        assert!(matches!(
            ProductSummary::try_from(row),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}

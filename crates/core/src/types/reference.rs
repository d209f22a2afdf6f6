//! Weak references to catalog products.
//!
//! Wishlists, carts and orders store product identifiers in plain arrays with
//! no foreign key. A product can be deleted while those arrays still name it,
//! so every reference has to be resolved against a lookup and may come back
//! empty. [`ProductRef`] makes that explicit in the type.

use std::collections::HashMap;
use std::hash::BuildHasher;

use serde::{Deserialize, Serialize};

use super::ProductId;

/// A product identifier that may or may not still point at a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductRef(ProductId);

impl ProductRef {
    /// Wrap a product identifier.
    #[must_use]
    pub const fn new(id: ProductId) -> Self {
        Self(id)
    }

    /// The referenced identifier.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.0
    }

    /// Resolve the reference against a lookup keyed by product id.
    ///
    /// Returns `None` when the product no longer exists.
    #[must_use]
    pub fn resolve<'a, V, S: BuildHasher>(
        &self,
        lookup: &'a HashMap<ProductId, V, S>,
    ) -> Option<&'a V> {
        lookup.get(&self.0)
    }
}

impl From<ProductId> for ProductRef {
    fn from(id: ProductId) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductRef {
    fn from(id: &str) -> Self {
        Self(ProductId::from(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_present_and_dangling() {
        let lookup: HashMap<ProductId, &str> =
            HashMap::from([(ProductId::new("p1"), "linen shirt")]);

        assert_eq!(ProductRef::from("p1").resolve(&lookup), Some(&"linen shirt"));
        assert_eq!(ProductRef::from("gone").resolve(&lookup), None);
    }
}

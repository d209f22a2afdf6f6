//! Domain models for the admin dashboard.
//!
//! - [`profile`] - User profiles, their relations, and the enriched and
//!   summarised views built from them
//! - [`product`] - The product projection used when resolving references
//! - [`query`] - Validated listing parameters

pub mod product;
pub mod profile;
pub mod query;

pub use product::{ProductCatalog, ProductSummary};
pub use profile::{
    CartRecord, EnrichedCart, EnrichedOrder, EnrichedProfile, EnrichedWishlist, LinkedUser,
    OrderRecord, ProfileDetails, ProfilePage, ProfileStatusChange, ProfileSummary,
    ProfileWithOrders, ProfileWithRelations, PurchaseHistory, WishlistRecord,
};
pub use query::{Pagination, ProfileFilter, ValidationError};

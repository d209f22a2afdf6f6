//! Business logic services for admin.
//!
//! # Services
//!
//! - `profiles` - User profile enrichment, listing summaries and status changes

pub mod profiles;

pub use profiles::{ProfileError, ProfileService, UsersQuery, placeholder_unit_price};

//! Profile service error types.

use thiserror::Error;

use textile_hub_core::ProfileId;

use crate::db::RepositoryError;
use crate::models::ValidationError;

/// Errors that can occur during profile operations.
///
/// Not-found and store failures are kept apart so callers never confuse a
/// missing profile with an unavailable database.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// No profile has the requested id.
    #[error("user profile not found: {0}")]
    NotFound(ProfileId),

    /// The profile or product store failed or timed out.
    #[error("backing store error: {0}")]
    BackingStore(#[from] RepositoryError),

    /// Input rejected before any store access.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),
}

//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (profile store reachable)
//!
//! # Users
//! GET  /api/users              - Paginated, filtered profile summaries
//! GET  /api/users/{id}         - One profile with resolved products
//! POST /api/users/{id}/status  - Block or unblock a profile
//! ```

pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the complete admin router (state not yet applied).
pub fn routes() -> Router<AppState> {
    Router::new().merge(health::router()).merge(users::router())
}

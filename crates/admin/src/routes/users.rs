//! Users API handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use textile_hub_core::{ProfileId, UserStatus};

use crate::{
    error::AppError,
    models::{EnrichedProfile, ProfileFilter, ProfilePage, ProfileStatusChange, PurchaseHistory},
    services::UsersQuery,
    state::AppState,
};

/// Build the users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(index))
        .route("/api/users/{id}", get(show))
        .route("/api/users/{id}/status", post(update_status))
}

/// Query parameters for the users listing.
#[derive(Debug, Default, Deserialize)]
pub struct UsersParams {
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Profile detail with purchase figures priced from the resolved products.
#[derive(Debug, Serialize)]
pub struct UserDetailResponse {
    #[serde(flatten)]
    pub profile: EnrichedProfile,
    pub purchase_history: PurchaseHistory,
}

/// Request body for a status change.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: UserStatus,
}

/// List profile summaries.
///
/// # Errors
///
/// Returns 400 for invalid pagination and 500 if the store fails.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<UsersParams>,
) -> Result<Json<ProfilePage>, AppError> {
    let query = UsersQuery {
        skip: params.skip.unwrap_or(0),
        take: state.config().listing.page_size(params.take),
        filter: ProfileFilter::new(params.first_name, params.last_name, params.email),
    };

    let page = state.profile_service().get_users_with_profile(&query).await?;
    Ok(Json(page))
}

/// Show one profile with its wishlists, orders and carts resolved.
///
/// # Errors
///
/// Returns 400 for a blank id, 404 if the profile does not exist and 500 if
/// a store fails.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserDetailResponse>, AppError> {
    let profile = state
        .profile_service()
        .get_one_user_with_profile(&ProfileId::new(id))
        .await?;

    let purchase_history = profile.purchase_history();
    Ok(Json(UserDetailResponse {
        profile,
        purchase_history,
    }))
}

/// Block or unblock a profile.
///
/// # Errors
///
/// Returns 400 for a blank id, 404 if the profile does not exist and 500 if
/// the write fails.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdateRequest>,
) -> Result<Json<ProfileStatusChange>, AppError> {
    let change = state
        .profile_service()
        .set_profile_status(&ProfileId::new(id), body.status)
        .await?;
    Ok(Json(change))
}

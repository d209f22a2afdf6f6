//! Integration tests for the users listing and status changes.

use std::sync::Arc;

use rust_decimal::Decimal;
use textile_hub_admin::models::{ProfileFilter, ValidationError};
use textile_hub_admin::services::{ProfileError, ProfileService, UsersQuery};
use textile_hub_core::{Money, ProfileId, UserStatus};
use textile_hub_integration_tests::{FakeStore, ProfileBuilder, product};

fn query(skip: i64, take: i64) -> UsersQuery {
    UsersQuery {
        skip,
        take,
        filter: ProfileFilter::default(),
    }
}

async fn store_with_profiles(count: usize) -> Arc<FakeStore> {
    let store = Arc::new(FakeStore::new());
    store
        .seed(
            (0..count).map(|i| ProfileBuilder::new(&format!("prof-{i}")).build()),
            [],
        )
        .await;
    store
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_total_is_independent_of_window() {
    let store = store_with_profiles(8).await;
    let service = ProfileService::new(store.as_ref(), store.as_ref());

    let first = service
        .get_users_with_profile(&query(0, 5))
        .await
        .expect("first page");
    let second = service
        .get_users_with_profile(&query(5, 5))
        .await
        .expect("second page");

    assert_eq!(first.users.len(), 5);
    assert_eq!(first.total, 8);
    assert_eq!(second.users.len(), 3);
    assert_eq!(second.total, 8);
    assert_eq!(second.users[0].profile.id.as_str(), "prof-5");
}

#[tokio::test]
async fn test_skip_past_end_returns_empty_page() {
    let store = store_with_profiles(3).await;
    let service = ProfileService::new(store.as_ref(), store.as_ref());

    let page = service
        .get_users_with_profile(&query(10, 5))
        .await
        .expect("page");

    assert!(page.users.is_empty());
    assert_eq!(page.total, 3);
}

#[tokio::test]
async fn test_invalid_pagination_is_rejected() {
    let store = store_with_profiles(3).await;
    let service = ProfileService::new(store.as_ref(), store.as_ref());

    let err = service
        .get_users_with_profile(&query(-1, 5))
        .await
        .expect_err("negative skip");
    assert!(matches!(
        err,
        ProfileError::Validation(ValidationError::NegativeSkip(-1))
    ));

    let err = service
        .get_users_with_profile(&query(0, 0))
        .await
        .expect_err("zero take");
    assert!(matches!(
        err,
        ProfileError::Validation(ValidationError::NonPositiveTake(0))
    ));
}

#[tokio::test]
async fn test_count_failure_fails_whole_listing() {
    let store = store_with_profiles(3).await;
    store.fail_count(true);
    let service = ProfileService::new(store.as_ref(), store.as_ref());

    let err = service
        .get_users_with_profile(&query(0, 5))
        .await
        .expect_err("count failure should propagate");

    assert!(matches!(err, ProfileError::BackingStore(_)));
}

// ============================================================================
// Filtering
// ============================================================================

#[tokio::test]
async fn test_filters_are_case_insensitive_substrings() {
    let store = Arc::new(FakeStore::new());
    store
        .seed(
            [
                ProfileBuilder::new("prof-1")
                    .name("Ada", "Okafor")
                    .email("ada@loom.example")
                    .build(),
                ProfileBuilder::new("prof-2")
                    .name("Adaeze", "Nwosu")
                    .email("adaeze@weave.example")
                    .build(),
                ProfileBuilder::new("prof-3")
                    .name("Bola", "Okafor")
                    .email("bola@loom.example")
                    .build(),
            ],
            [],
        )
        .await;
    let service = ProfileService::new(store.as_ref(), store.as_ref());

    let page = service
        .get_users_with_profile(&UsersQuery {
            skip: 0,
            take: 10,
            filter: ProfileFilter::new(Some("ADA".to_string()), None, None),
        })
        .await
        .expect("page");
    assert_eq!(page.total, 2);

    let page = service
        .get_users_with_profile(&UsersQuery {
            skip: 0,
            take: 10,
            filter: ProfileFilter::new(None, Some("okafor".to_string()), Some("LOOM".to_string())),
        })
        .await
        .expect("page");
    let found: Vec<&str> = page.users.iter().map(|u| u.profile.id.as_str()).collect();
    assert_eq!(found, ["prof-1", "prof-3"]);
}

// ============================================================================
// Metrics
// ============================================================================

#[tokio::test]
async fn test_metrics_use_placeholder_price() {
    let store = Arc::new(FakeStore::new());
    store
        .seed(
            [ProfileBuilder::new("prof-1")
                .order(&["p1", "p2", "p3"], 500)
                .order(&["p1", "p1"], 0)
                .build()],
            // Real prices differ from the placeholder and must not be used
            [product("p1", 99_900), product("p2", 1), product("p3", 5)],
        )
        .await;
    let service = ProfileService::new(store.as_ref(), store.as_ref());

    let page = service
        .get_users_with_profile(&query(0, 10))
        .await
        .expect("page");
    let summary = &page.users[0];

    assert_eq!(summary.total_products_purchased, 5);
    // (3 * 10.00 + 5.00) + (2 * 10.00 + 0.00)
    assert_eq!(summary.total_amount_spent.amount(), Decimal::new(55, 0));
    assert_eq!(summary.average_expenses, Decimal::new(25, 1));
    assert!(store.product_lookups().await.is_empty());
}

#[tokio::test]
async fn test_metrics_without_orders_are_zero() {
    let store = store_with_profiles(1).await;
    let service = ProfileService::new(store.as_ref(), store.as_ref());

    let page = service
        .get_users_with_profile(&query(0, 10))
        .await
        .expect("page");
    let summary = &page.users[0];

    assert_eq!(summary.total_products_purchased, 0);
    assert_eq!(summary.total_amount_spent, Money::ZERO);
    assert_eq!(summary.average_expenses, Decimal::ZERO);
}

// ============================================================================
// Status Changes
// ============================================================================

#[tokio::test]
async fn test_block_and_unblock() {
    let store = store_with_profiles(1).await;
    let service = ProfileService::new(store.as_ref(), store.as_ref());
    let id = ProfileId::new("prof-0");

    let change = service
        .set_profile_status(&id, UserStatus::Blocked)
        .await
        .expect("block");
    assert_eq!(change.status, UserStatus::Blocked);
    assert_eq!(store.status_of("prof-0").await, Some(UserStatus::Blocked));

    service
        .set_profile_status(&id, UserStatus::Active)
        .await
        .expect("unblock");
    assert_eq!(store.status_of("prof-0").await, Some(UserStatus::Active));
}

#[tokio::test]
async fn test_status_change_for_unknown_profile() {
    let store = store_with_profiles(1).await;
    let service = ProfileService::new(store.as_ref(), store.as_ref());

    let err = service
        .set_profile_status(&ProfileId::new("nobody"), UserStatus::Blocked)
        .await
        .expect_err("unknown profile");

    assert!(matches!(err, ProfileError::NotFound(_)));
}

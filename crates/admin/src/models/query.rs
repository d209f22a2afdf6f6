//! Listing parameters for profile queries.

use thiserror::Error;

use super::profile::ProfileDetails;

/// Input rejected before any store access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The profile identifier is empty or whitespace.
    #[error("profile id cannot be empty")]
    EmptyId,

    /// `skip` is negative.
    #[error("skip must be zero or greater (got {0})")]
    NegativeSkip(i64),

    /// `take` is zero or negative.
    #[error("take must be greater than zero (got {0})")]
    NonPositiveTake(i64),
}

/// A validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    skip: i64,
    take: i64,
}

impl Pagination {
    /// Validate a `skip`/`take` pair.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if `skip` is negative or `take` is not positive.
    pub const fn new(skip: i64, take: i64) -> Result<Self, ValidationError> {
        if skip < 0 {
            return Err(ValidationError::NegativeSkip(skip));
        }
        if take <= 0 {
            return Err(ValidationError::NonPositiveTake(take));
        }
        Ok(Self { skip, take })
    }

    /// Number of matching rows to skip.
    #[must_use]
    pub const fn skip(&self) -> i64 {
        self.skip
    }

    /// Maximum number of rows to return.
    #[must_use]
    pub const fn take(&self) -> i64 {
        self.take
    }
}

/// Optional case-insensitive substring filters, combined with AND.
///
/// Values are matched as given; only empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFilter {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
}

impl ProfileFilter {
    /// Build a filter, dropping empty values.
    #[must_use]
    pub fn new(
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
    ) -> Self {
        Self {
            first_name: normalize(first_name),
            last_name: normalize(last_name),
            email: normalize(email),
        }
    }

    /// First name substring, if set.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Last name substring, if set.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Linked email substring, if set.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Whether no constraint is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }

    /// Evaluate the filter against a profile in memory.
    ///
    /// Mirrors the `ILIKE` predicate used by the `PostgreSQL` store.
    #[must_use]
    pub fn matches(&self, profile: &ProfileDetails) -> bool {
        contains_ci(&profile.first_name, self.first_name())
            && contains_ci(&profile.last_name, self.last_name())
            && contains_ci(&profile.user.email, self.email())
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|n| haystack.to_lowercase().contains(&n.to_lowercase()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_rejects_invalid_windows() {
        assert_eq!(
            Pagination::new(-1, 10),
            Err(ValidationError::NegativeSkip(-1))
        );
        assert_eq!(
            Pagination::new(0, 0),
            Err(ValidationError::NonPositiveTake(0))
        );
        assert_eq!(
            Pagination::new(0, -5),
            Err(ValidationError::NonPositiveTake(-5))
        );
        let page = Pagination::new(20, 10).unwrap();
        assert_eq!((page.skip(), page.take()), (20, 10));
    }

    #[test]
    fn test_filter_drops_only_empty_values() {
        let filter = ProfileFilter::new(Some(String::new()), None, Some(String::new()));
        assert!(filter.is_empty());

        let filter = ProfileFilter::new(Some(" Jo".to_string()), None, None);
        assert_eq!(filter.first_name(), Some(" Jo"));
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_filter_keeps_surrounding_whitespace_when_matching() {
        let now = chrono::Utc::now();
        let profile = ProfileDetails {
            id: textile_hub_core::ProfileId::new("a"),
            role: textile_hub_core::ProfileRole::Customer,
            status: textile_hub_core::UserStatus::Active,
            first_name: "Jo".to_string(),
            last_name: "Mary Jo".to_string(),
            phone_number: None,
            address: None,
            image: None,
            created_at: now,
            updated_at: now,
            user: crate::models::LinkedUser {
                email: "jo@example.com".to_string(),
                email_verified: true,
            },
        };

        let leading_space = ProfileFilter::new(Some(" Jo".to_string()), None, None);
        assert!(!leading_space.matches(&profile));

        let in_last_name = ProfileFilter::new(None, Some(" jo".to_string()), None);
        assert!(in_last_name.matches(&profile));

        let combined = ProfileFilter::new(
            Some("jo".to_string()),
            None,
            Some("example.com".to_string()),
        );
        assert!(combined.matches(&profile));
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        assert!(contains_ci("Johanna", Some("jo")));
        assert!(contains_ci("ann@EXAMPLE.com", Some("example.COM")));
        assert!(!contains_ci("Mary", Some("jo")));
        assert!(contains_ci("anything", None));
    }
}

//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ADMIN_DEFAULT_PAGE_SIZE` - Users listing page size when `take` is omitted (default: 10)
//! - `ADMIN_MAX_PAGE_SIZE` - Upper bound applied to `take` (default: 100)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Users listing page sizes
    pub listing: ListingConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Page size bounds for the users listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingConfig {
    default_page_size: u32,
    max_page_size: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl ListingConfig {
    /// Create page size bounds.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the default is zero or larger
    /// than the maximum.
    pub fn new(default_page_size: u32, max_page_size: u32) -> Result<Self, ConfigError> {
        if default_page_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_DEFAULT_PAGE_SIZE".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        if default_page_size > max_page_size {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_DEFAULT_PAGE_SIZE".to_string(),
                format!("must not exceed ADMIN_MAX_PAGE_SIZE ({max_page_size})"),
            ));
        }
        Ok(Self {
            default_page_size,
            max_page_size,
        })
    }

    /// Load page size bounds from `ADMIN_DEFAULT_PAGE_SIZE` and
    /// `ADMIN_MAX_PAGE_SIZE`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if either value does not parse or
    /// the bounds are inconsistent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str, default: u32| -> Result<u32, ConfigError> {
            lookup(key).map_or(Ok(default), |raw| parse_value(key, &raw))
        };
        Self::new(
            read("ADMIN_DEFAULT_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            read("ADMIN_MAX_PAGE_SIZE", MAX_PAGE_SIZE)?,
        )
    }

    /// Resolve the effective page size for a request.
    ///
    /// An omitted `take` uses the default; a positive `take` is capped at the
    /// maximum. Zero and negative values pass through unchanged so that
    /// validation can reject them.
    #[must_use]
    pub fn page_size(&self, take: Option<i64>) -> i64 {
        match take {
            None => i64::from(self.default_page_size),
            Some(take) if take > 0 => take.min(i64::from(self.max_page_size)),
            Some(take) => take,
        }
    }

    #[must_use]
    pub const fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    #[must_use]
    pub const fn max_page_size(&self) -> u32 {
        self.max_page_size
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("ADMIN_DATABASE_URL")?;
        let host: IpAddr = parse_env_or_default("ADMIN_HOST", "127.0.0.1")?;
        let port: u16 = parse_env_or_default("ADMIN_PORT", "3001")?;
        let listing = ListingConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_url,
            host,
            port,
            listing,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Environment Helpers
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` naming `primary_key` if neither is set.
pub fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config() -> AdminConfig {
        AdminConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            listing: ListingConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3001);
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let debug = format!("{:?}", config());
        assert!(!debug.contains("postgres://localhost/test"));
    }

    #[test]
    fn test_listing_defaults() {
        let listing = ListingConfig::default();
        assert_eq!(listing.default_page_size(), 10);
        assert_eq!(listing.max_page_size(), 100);
    }

    #[test]
    fn test_listing_rejects_zero_default() {
        assert!(matches!(
            ListingConfig::new(0, 100),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "ADMIN_DEFAULT_PAGE_SIZE"
        ));
    }

    #[test]
    fn test_listing_rejects_default_above_max() {
        assert!(ListingConfig::new(50, 20).is_err());
        assert!(ListingConfig::new(20, 20).is_ok());
    }

    #[test]
    fn test_page_size_resolution() {
        let listing = ListingConfig::new(10, 50).unwrap();
        assert_eq!(listing.page_size(None), 10);
        assert_eq!(listing.page_size(Some(25)), 25);
        assert_eq!(listing.page_size(Some(500)), 50);
        assert_eq!(listing.page_size(Some(0)), 0);
        assert_eq!(listing.page_size(Some(-3)), -3);
    }

    #[test]
    fn test_listing_from_lookup() {
        let vars: HashMap<&str, &str> =
            HashMap::from([("ADMIN_DEFAULT_PAGE_SIZE", "25"), ("ADMIN_MAX_PAGE_SIZE", "40")]);
        let listing =
            ListingConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_string())).unwrap();
        assert_eq!(listing.default_page_size(), 25);
        assert_eq!(listing.max_page_size(), 40);
        assert_eq!(listing.page_size(Some(100)), 40);

        let listing = ListingConfig::from_lookup(|_| None).unwrap();
        assert_eq!(listing, ListingConfig::default());

        let bad = ListingConfig::from_lookup(|key| {
            (key == "ADMIN_MAX_PAGE_SIZE").then(|| "lots".to_string())
        });
        assert!(matches!(
            bad,
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "ADMIN_MAX_PAGE_SIZE"
        ));
    }

    #[test]
    fn test_parse_value_reports_key() {
        let err = parse_value::<u16>("ADMIN_PORT", "not-a-port").unwrap_err();
        assert!(err.to_string().starts_with("Invalid environment variable ADMIN_PORT"));

        let port: u16 = parse_value("ADMIN_PORT", " 8080 ").unwrap();
        assert_eq!(port, 8080);
    }
}

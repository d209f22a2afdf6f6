//! Textile Hub Core - Shared types library.
//!
//! This crate provides common types used across all Textile Hub components:
//! - `admin` - Admin dashboard service (profile aggregation, JSON API)
//! - `cli` - Command-line tools for migrations and profile inspection
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, statuses and
//!   weak product references

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

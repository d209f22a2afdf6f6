//! Core types for Textile Hub.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod reference;
pub mod status;

pub use id::*;
pub use money::{Money, MoneyError};
pub use reference::ProductRef;
pub use status::*;

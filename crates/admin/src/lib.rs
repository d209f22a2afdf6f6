//! Textile Hub admin library.
//!
//! This crate provides the admin functionality as a library,
//! allowing it to be tested and reused by the CLI.
//!
//! # Layers
//!
//! - [`db`] - Store traits and their `PostgreSQL` implementations
//! - [`services`] - Profile enrichment and listing summaries over those stores
//! - [`routes`] - JSON API handlers
//! - [`config`], [`state`], [`error`] - Wiring

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

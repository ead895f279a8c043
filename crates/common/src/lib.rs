//! Shared utilities, configuration, and error handling for Rolodex
//!
//! This crate provides common functionality used across the Rolodex
//! application:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Axum extractors shared by domain API layers

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;

pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{Pagination, ValidatedJson};

//! Shared utilities, configuration, and error handling for Teamline
//!
//! This crate provides common functionality used across the Teamline
//! application:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Persistence-layer error mapping

pub mod config;
pub mod db;
pub mod error;

pub use config::Config;
pub use db::RepositoryError;
pub use error::{Error, Result};

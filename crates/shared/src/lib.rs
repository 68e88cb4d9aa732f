//! Shared types, errors, and configuration for Komisi.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for representatives, companies, rules, and records
//! - Decimal rounding helpers for money and percentages
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management
//! - JWT issuing and validation

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};

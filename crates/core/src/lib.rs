//! Core business logic for Komisi.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! The commission engine, its aggregation into reports, and the rule and
//! record validation live here. Persistence is reached only through the
//! [`reports::CommissionDataSource`] trait.
//!
//! # Modules
//!
//! - `commission` - Tiered commission calculator, per-record aggregation, validation
//! - `reports` - Single-representative and organization-wide commission reports
//! - `auth` - User roles, capabilities, and password hashing

pub mod auth;
pub mod commission;
pub mod reports;

#[cfg(test)]
mod testing;

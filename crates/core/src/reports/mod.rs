//! Commission reports.
//!
//! Two reports are produced: one for a single representative and one across
//! the whole organization. [`ReportBuilder`] fetches rows through a
//! [`CommissionDataSource`]; [`ReportService`] turns them into payloads.

pub mod builder;
pub mod error;
pub mod service;
pub mod source;
pub mod types;

#[cfg(test)]
mod tests;

pub use builder::ReportBuilder;
pub use error::ReportError;
pub use service::ReportService;
pub use source::CommissionDataSource;
pub use types::*;

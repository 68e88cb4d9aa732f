//! Tiered commission engine.
//!
//! - `calculator` - pure `(sales, target, rule) -> CommissionResult`
//! - `aggregator` - category-to-rule lookup and per-record commissioning
//! - `validation` - rule and record checks applied before writes
//! - `service` - one-off previews against the stored rule set

pub mod aggregator;
pub mod calculator;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use aggregator::{RuleBook, SalesAggregator};
pub use calculator::CommissionCalculator;
pub use service::{CommissionPreview, CommissionService};
pub use types::*;
pub use validation::{
    CommissionRuleInput, RecordValidationError, RuleValidationError, validate_non_negative,
    validate_period, validate_rule,
};

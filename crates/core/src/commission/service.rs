//! Commission preview for a single figure.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::aggregator::RuleBook;
use super::calculator::CommissionCalculator;
use super::types::{CommissionResult, CommissionRule};
use crate::reports::CommissionDataSource;

/// Result of previewing a commission for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommissionPreview {
    /// Category asked about.
    pub category: String,
    /// Rule that applied; `None` when the category has no rule.
    pub rule: Option<CommissionRule>,
    /// Sales figure.
    #[serde(with = "rust_decimal::serde::float")]
    pub sales: Decimal,
    /// Target figure.
    #[serde(with = "rust_decimal::serde::float")]
    pub target: Decimal,
    /// `sales / target * 100`, rounded; zero when target is zero.
    #[serde(with = "rust_decimal::serde::float")]
    pub achievement_percentage: Decimal,
    /// Commission breakdown.
    pub commission: CommissionResult,
}

/// Computes commissions against the live rule set.
pub struct CommissionService<D> {
    source: Arc<D>,
}

impl<D: CommissionDataSource> CommissionService<D> {
    /// Creates a service reading rules from `source`.
    pub fn new(source: Arc<D>) -> Self {
        Self { source }
    }

    /// Resolves the rule for `category` and runs the calculator.
    ///
    /// A missing rule is not an error; the preview carries `rule: None` and a
    /// zero commission.
    ///
    /// # Errors
    ///
    /// Propagates the data source error when rules cannot be fetched.
    pub async fn preview(
        &self,
        category: &str,
        sales: Decimal,
        target: Decimal,
    ) -> Result<CommissionPreview, D::Error> {
        let rules = RuleBook::from_rules(self.source.fetch_all_commission_rules().await?);
        let rule = rules.get(category).cloned();

        debug!(category, has_rule = rule.is_some(), "Commission preview");

        Ok(CommissionPreview {
            category: category.to_string(),
            commission: CommissionCalculator::calculate(sales, target, rule.as_ref()),
            achievement_percentage: CommissionCalculator::achievement_percentage(sales, target),
            rule,
            sales,
            target,
        })
    }
}

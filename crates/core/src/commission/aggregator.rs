//! Joins sales records to rules by category and runs the calculator.

use std::collections::HashMap;

use tracing::warn;

use super::calculator::CommissionCalculator;
use super::types::{CommissionRule, CommissionedSale, SalesRecord};

/// Commission rules indexed by category.
///
/// When two rules share a category the first one in fetch order wins; later
/// duplicates are ignored rather than rejected.
#[derive(Debug, Clone, Default)]
pub struct RuleBook {
    by_category: HashMap<String, CommissionRule>,
}

impl RuleBook {
    /// Builds the index from rules in fetch order.
    #[must_use]
    pub fn from_rules(rules: impl IntoIterator<Item = CommissionRule>) -> Self {
        let mut by_category = HashMap::new();
        for rule in rules {
            if by_category.contains_key(&rule.category) {
                warn!(category = %rule.category, rule_id = %rule.id, "Duplicate commission rule category ignored");
                continue;
            }
            by_category.insert(rule.category.clone(), rule);
        }
        Self { by_category }
    }

    /// Returns the rule for a category, if one is configured.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&CommissionRule> {
        self.by_category.get(category)
    }

    /// Number of distinct categories with a rule.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_category.len()
    }

    /// Returns true when no rules are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }
}

/// Stateless sales record aggregator.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Computes achievement and commission for each record, preserving order.
    ///
    /// Records whose category has no rule still appear, with zero commission.
    #[must_use]
    pub fn aggregate(records: Vec<SalesRecord>, rules: &RuleBook) -> Vec<CommissionedSale> {
        records
            .into_iter()
            .map(|record| Self::commission_record(record, rules))
            .collect()
    }

    /// Computes achievement and commission for one record.
    #[must_use]
    pub fn commission_record(record: SalesRecord, rules: &RuleBook) -> CommissionedSale {
        let rule = rules.get(&record.category);
        if rule.is_none() {
            warn!(
                record_id = %record.id,
                category = %record.category,
                "No commission rule for category, commission is zero"
            );
        }

        let commission = CommissionCalculator::calculate(record.sales, record.target, rule);
        let achievement_percentage =
            CommissionCalculator::achievement_percentage(record.sales, record.target);

        CommissionedSale {
            record,
            achievement_percentage,
            commission,
        }
    }
}

//! Checks applied before rules and records are written.
//!
//! The calculator never calls these; it trusts whatever reaches it.

use komisi_shared::types::CommissionRuleId;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::CommissionRule;

/// Earliest year accepted on a sales or collection record.
pub const MIN_YEAR: i32 = 2000;

/// Latest year accepted on a sales or collection record.
pub const MAX_YEAR: i32 = 2100;

/// Highest achievement percentage a tier bound may name.
pub const MAX_TIER_BOUND: Decimal = dec!(1000);

/// Longest category name the store accepts, in characters.
pub const MAX_CATEGORY_LEN: usize = 100;

/// Decimal places kept for tier bounds.
pub const BOUND_SCALE: u32 = 4;

/// Decimal places kept for tier rates.
pub const RATE_SCALE: u32 = 6;

/// Decimal places kept for sales, target and collection amounts.
pub const AMOUNT_SCALE: u32 = 4;

/// Largest sales, target or collection amount the store accepts.
pub const MAX_AMOUNT: Decimal = dec!(999999999999999.9999);

/// Rule fields as submitted by a client, before an ID is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRuleInput {
    /// Sales category.
    pub category: String,
    /// Lower achievement bound of tier 1.
    pub tier1_from: Decimal,
    /// Upper achievement bound of tier 1.
    pub tier1_to: Decimal,
    /// Tier 1 rate.
    pub tier1_rate: Decimal,
    /// Lower achievement bound of tier 2.
    pub tier2_from: Decimal,
    /// Upper achievement bound of tier 2.
    pub tier2_to: Decimal,
    /// Tier 2 rate.
    pub tier2_rate: Decimal,
    /// Lower achievement bound of tier 3.
    pub tier3_from: Decimal,
    /// Tier 3 rate.
    pub tier3_rate: Decimal,
}

impl CommissionRuleInput {
    /// Attaches an ID, producing the stored rule.
    #[must_use]
    pub fn into_rule(self, id: CommissionRuleId) -> CommissionRule {
        CommissionRule {
            id,
            category: self.category,
            tier1_from: self.tier1_from,
            tier1_to: self.tier1_to,
            tier1_rate: self.tier1_rate,
            tier2_from: self.tier2_from,
            tier2_to: self.tier2_to,
            tier2_rate: self.tier2_rate,
            tier3_from: self.tier3_from,
            tier3_rate: self.tier3_rate,
        }
    }
}

impl From<&CommissionRule> for CommissionRuleInput {
    fn from(rule: &CommissionRule) -> Self {
        Self {
            category: rule.category.clone(),
            tier1_from: rule.tier1_from,
            tier1_to: rule.tier1_to,
            tier1_rate: rule.tier1_rate,
            tier2_from: rule.tier2_from,
            tier2_to: rule.tier2_to,
            tier2_rate: rule.tier2_rate,
            tier3_from: rule.tier3_from,
            tier3_rate: rule.tier3_rate,
        }
    }
}

/// Reasons a commission rule is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleValidationError {
    /// Category is blank.
    #[error("Category must not be empty")]
    EmptyCategory,

    /// Category longer than [`MAX_CATEGORY_LEN`] characters.
    #[error("Category must be at most {MAX_CATEGORY_LEN} characters, got {0}")]
    CategoryTooLong(usize),

    /// An achievement bound lies outside 0..=1000.
    #[error("{field} must be between 0 and 1000, got {value}")]
    BoundOutOfRange {
        /// Offending field.
        field: &'static str,
        /// Submitted value.
        value: Decimal,
    },

    /// A tier's lower bound exceeds its upper bound.
    #[error("{from_field} ({from}) must not exceed {to_field} ({to})")]
    InvertedTier {
        /// Lower bound field.
        from_field: &'static str,
        /// Lower bound value.
        from: Decimal,
        /// Upper bound field.
        to_field: &'static str,
        /// Upper bound value.
        to: Decimal,
    },

    /// Adjacent tiers overlap.
    #[error("{lower_field} ({lower}) must be below {upper_field} ({upper})")]
    OverlappingTiers {
        /// Upper bound of the lower tier.
        lower_field: &'static str,
        /// Its value.
        lower: Decimal,
        /// Lower bound of the next tier.
        upper_field: &'static str,
        /// Its value.
        upper: Decimal,
    },

    /// A rate is not in (0, 1].
    #[error("{field} must be greater than 0 and at most 1, got {value}")]
    RateOutOfRange {
        /// Offending field.
        field: &'static str,
        /// Submitted value.
        value: Decimal,
    },

    /// A bound or rate carries more decimal places than are stored.
    #[error("{field} allows at most {max_scale} decimal places, got {value}")]
    TooManyDecimals {
        /// Offending field.
        field: &'static str,
        /// Submitted value.
        value: Decimal,
        /// Decimal places kept.
        max_scale: u32,
    },
}

/// Reasons a sales or collection record is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordValidationError {
    /// Month outside 1..=12.
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(i32),

    /// Year outside the accepted window.
    #[error("Year must be between {MIN_YEAR} and {MAX_YEAR}, got {0}")]
    InvalidYear(i32),

    /// A monetary field is negative.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Offending field.
        field: &'static str,
        /// Submitted value.
        value: Decimal,
    },

    /// A monetary field exceeds [`MAX_AMOUNT`].
    #[error("{field} must be at most {MAX_AMOUNT}, got {value}")]
    TooLarge {
        /// Offending field.
        field: &'static str,
        /// Submitted value.
        value: Decimal,
    },

    /// A monetary field has more than [`AMOUNT_SCALE`] decimal places.
    #[error("{field} allows at most {AMOUNT_SCALE} decimal places, got {value}")]
    TooManyDecimals {
        /// Offending field.
        field: &'static str,
        /// Submitted value.
        value: Decimal,
    },
}

/// Decimal places left once trailing zeros are dropped.
fn significant_scale(value: Decimal) -> u32 {
    value.normalize().scale()
}

/// Validates a rule before it is stored.
///
/// # Errors
///
/// Returns the first violated constraint.
pub fn validate_rule(input: &CommissionRuleInput) -> Result<(), RuleValidationError> {
    if input.category.trim().is_empty() {
        return Err(RuleValidationError::EmptyCategory);
    }
    let len = input.category.chars().count();
    if len > MAX_CATEGORY_LEN {
        return Err(RuleValidationError::CategoryTooLong(len));
    }

    let bounds = [
        ("tier1_from", input.tier1_from),
        ("tier1_to", input.tier1_to),
        ("tier2_from", input.tier2_from),
        ("tier2_to", input.tier2_to),
        ("tier3_from", input.tier3_from),
    ];
    for (field, value) in bounds {
        if value < Decimal::ZERO || value > MAX_TIER_BOUND {
            return Err(RuleValidationError::BoundOutOfRange { field, value });
        }
        if significant_scale(value) > BOUND_SCALE {
            return Err(RuleValidationError::TooManyDecimals {
                field,
                value,
                max_scale: BOUND_SCALE,
            });
        }
    }

    ordered_tier("tier1_from", input.tier1_from, "tier1_to", input.tier1_to)?;
    ordered_tier("tier2_from", input.tier2_from, "tier2_to", input.tier2_to)?;

    if input.tier1_to >= input.tier2_from {
        return Err(RuleValidationError::OverlappingTiers {
            lower_field: "tier1_to",
            lower: input.tier1_to,
            upper_field: "tier2_from",
            upper: input.tier2_from,
        });
    }
    if input.tier2_to >= input.tier3_from {
        return Err(RuleValidationError::OverlappingTiers {
            lower_field: "tier2_to",
            lower: input.tier2_to,
            upper_field: "tier3_from",
            upper: input.tier3_from,
        });
    }

    let rates = [
        ("tier1_rate", input.tier1_rate),
        ("tier2_rate", input.tier2_rate),
        ("tier3_rate", input.tier3_rate),
    ];
    for (field, value) in rates {
        if value <= Decimal::ZERO || value > Decimal::ONE {
            return Err(RuleValidationError::RateOutOfRange { field, value });
        }
        if significant_scale(value) > RATE_SCALE {
            return Err(RuleValidationError::TooManyDecimals {
                field,
                value,
                max_scale: RATE_SCALE,
            });
        }
    }

    Ok(())
}

fn ordered_tier(
    from_field: &'static str,
    from: Decimal,
    to_field: &'static str,
    to: Decimal,
) -> Result<(), RuleValidationError> {
    if from > to {
        return Err(RuleValidationError::InvertedTier {
            from_field,
            from,
            to_field,
            to,
        });
    }
    Ok(())
}

/// Validates a record's year and month.
///
/// # Errors
///
/// Returns `InvalidMonth` or `InvalidYear`.
pub fn validate_period(year: i32, month: i32) -> Result<(), RecordValidationError> {
    if !(1..=12).contains(&month) {
        return Err(RecordValidationError::InvalidMonth(month));
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(RecordValidationError::InvalidYear(year));
    }
    Ok(())
}

/// Rejects sales, target or collection amounts the store cannot hold as given.
///
/// # Errors
///
/// Returns `Negative`, `TooLarge` or `TooManyDecimals` naming the field.
pub fn validate_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), RecordValidationError> {
    if value < Decimal::ZERO {
        return Err(RecordValidationError::Negative { field, value });
    }
    if value > MAX_AMOUNT {
        return Err(RecordValidationError::TooLarge { field, value });
    }
    if significant_scale(value) > AMOUNT_SCALE {
        return Err(RecordValidationError::TooManyDecimals { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn valid_input() -> CommissionRuleInput {
        CommissionRuleInput {
            category: "pharma".to_string(),
            tier1_from: dec!(0),
            tier1_to: dec!(70),
            tier1_rate: dec!(0.0025),
            tier2_from: dec!(71),
            tier2_to: dec!(100),
            tier2_rate: dec!(0.003),
            tier3_from: dec!(101),
            tier3_rate: dec!(0.004),
        }
    }

    #[test]
    fn test_valid_rule_passes() {
        assert_eq!(validate_rule(&valid_input()), Ok(()));
    }

    #[test]
    fn test_blank_category() {
        let mut input = valid_input();
        input.category = "   ".to_string();
        assert_eq!(validate_rule(&input), Err(RuleValidationError::EmptyCategory));
    }

    #[test]
    fn test_bound_out_of_range() {
        let mut input = valid_input();
        input.tier3_from = dec!(1200);
        assert_eq!(
            validate_rule(&input),
            Err(RuleValidationError::BoundOutOfRange {
                field: "tier3_from",
                value: dec!(1200),
            })
        );
    }

    #[test]
    fn test_inverted_tier() {
        let mut input = valid_input();
        input.tier1_from = dec!(50);
        input.tier1_to = dec!(40);
        assert!(matches!(
            validate_rule(&input),
            Err(RuleValidationError::InvertedTier { from_field: "tier1_from", .. })
        ));
    }

    #[rstest]
    #[case(dec!(71), dec!(71), dec!(101), "tier1_to")]
    #[case(dec!(70), dec!(71), dec!(100), "tier2_to")]
    fn test_overlapping_tiers(
        #[case] tier1_to: Decimal,
        #[case] tier2_from: Decimal,
        #[case] tier3_from: Decimal,
        #[case] expected_field: &str,
    ) {
        let mut input = valid_input();
        input.tier1_to = tier1_to;
        input.tier2_from = tier2_from;
        input.tier3_from = tier3_from;

        match validate_rule(&input) {
            Err(RuleValidationError::OverlappingTiers { lower_field, .. }) => {
                assert_eq!(lower_field, expected_field);
            }
            other => panic!("expected overlap error, got {other:?}"),
        }
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-0.01))]
    #[case(dec!(1.01))]
    fn test_rate_out_of_range(#[case] rate: Decimal) {
        let mut input = valid_input();
        input.tier2_rate = rate;
        assert_eq!(
            validate_rule(&input),
            Err(RuleValidationError::RateOutOfRange {
                field: "tier2_rate",
                value: rate,
            })
        );
    }

    #[test]
    fn test_rate_of_one_is_allowed() {
        let mut input = valid_input();
        input.tier3_rate = Decimal::ONE;
        assert_eq!(validate_rule(&input), Ok(()));
    }

    #[rstest]
    #[case(2024, 1, true)]
    #[case(2024, 12, true)]
    #[case(2024, 0, false)]
    #[case(2024, 13, false)]
    #[case(1999, 6, false)]
    #[case(2101, 6, false)]
    fn test_validate_period(#[case] year: i32, #[case] month: i32, #[case] ok: bool) {
        assert_eq!(validate_period(year, month).is_ok(), ok);
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("sales", Decimal::ZERO).is_ok());
        assert!(validate_non_negative("sales", dec!(10.5)).is_ok());
        assert_eq!(
            validate_non_negative("target", dec!(-1)),
            Err(RecordValidationError::Negative {
                field: "target",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn test_category_length_limit() {
        let mut input = valid_input();
        input.category = "x".repeat(MAX_CATEGORY_LEN);
        assert_eq!(validate_rule(&input), Ok(()));

        input.category = "x".repeat(150);
        assert_eq!(
            validate_rule(&input),
            Err(RuleValidationError::CategoryTooLong(150))
        );
    }

    #[test]
    fn test_highest_bound_is_accepted() {
        let mut input = valid_input();
        input.tier3_from = MAX_TIER_BOUND;
        assert_eq!(validate_rule(&input), Ok(()));
    }

    #[rstest]
    #[case("tier1_rate", dec!(0.0000001))]
    #[case("tier2_rate", dec!(0.0030001))]
    #[case("tier3_from", dec!(101.00001))]
    fn test_too_many_decimals(#[case] field: &str, #[case] value: Decimal) {
        let mut input = valid_input();
        match field {
            "tier1_rate" => input.tier1_rate = value,
            "tier2_rate" => input.tier2_rate = value,
            _ => input.tier3_from = value,
        }

        assert!(matches!(
            validate_rule(&input),
            Err(RuleValidationError::TooManyDecimals { field: f, .. }) if f == field
        ));
    }

    #[rstest]
    #[case(dec!(0.000001))]
    #[case(dec!(0.0025000000))]
    fn test_stored_precision_rates_pass(#[case] rate: Decimal) {
        let mut input = valid_input();
        input.tier1_rate = rate;
        assert_eq!(validate_rule(&input), Ok(()));
    }

    #[rstest]
    #[case(dec!(10.1234), true)]
    #[case(dec!(10.12340000), true)]
    #[case(MAX_AMOUNT, true)]
    #[case(dec!(10.12345), false)]
    #[case(dec!(1000000000000000), false)]
    fn test_amount_fits_store(#[case] value: Decimal, #[case] ok: bool) {
        assert_eq!(validate_non_negative("sales", value).is_ok(), ok);
    }

    #[test]
    fn test_input_round_trips_through_rule() {
        let rule = valid_input().into_rule(CommissionRuleId::new());
        assert_eq!(CommissionRuleInput::from(&rule), valid_input());
    }
}

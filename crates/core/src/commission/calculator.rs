//! Tiered commission calculator.
//!
//! Given one sales figure, one target, and the matching rule:
//!
//! - Tier 1 pays `tier1_rate` on 70% of target, always.
//! - Tier 2 pays `tier2_rate` on 30% of target once achievement reaches 71%.
//! - Tier 3 pays `tier3_rate` on everything sold above target.
//!
//! A zero target pays tier 1 on the whole sales figure and skips tiers 2 and 3.
//!
//! NOTE: tier 1 ignores `tier1_from`/`tier1_to` and the tier 2 gate ignores
//! `tier2_from`. The 70/30 split and the 71% gate are fixed business rules,
//! kept as-is until product confirms whether the rule bounds were meant to
//! drive them.

use komisi_shared::types::{percent_of, round_money};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::types::{CommissionResult, CommissionRule};

/// Share of target paid at the tier 1 rate.
pub const TIER1_TARGET_SHARE: Decimal = dec!(0.7);

/// Share of target paid at the tier 2 rate.
pub const TIER2_TARGET_SHARE: Decimal = dec!(0.3);

/// Minimum achievement percentage (inclusive) that unlocks tier 2.
pub const TIER2_MIN_ACHIEVEMENT: Decimal = dec!(71);

/// Stateless commission calculator.
pub struct CommissionCalculator;

impl CommissionCalculator {
    /// Computes the commission breakdown for one sales figure.
    ///
    /// A missing rule yields an all-zero result. Inputs are assumed
    /// non-negative; upstream validation rejects anything else.
    /// Every field is rounded to 2 decimal places independently, and the total
    /// is rounded from the unrounded tier commissions.
    #[must_use]
    pub fn calculate(
        sales: Decimal,
        target: Decimal,
        rule: Option<&CommissionRule>,
    ) -> CommissionResult {
        let Some(rule) = rule else {
            return CommissionResult::default();
        };

        if target.is_zero() {
            let tier1_commission = sales * rule.tier1_rate;
            return Self::finish(
                (sales, tier1_commission),
                (Decimal::ZERO, Decimal::ZERO),
                (Decimal::ZERO, Decimal::ZERO),
            );
        }

        let achievement = percent_of(sales, target);

        let tier1_amount = target * TIER1_TARGET_SHARE;
        let tier1 = (tier1_amount, tier1_amount * rule.tier1_rate);

        let tier2 = if achievement >= TIER2_MIN_ACHIEVEMENT {
            let amount = target * TIER2_TARGET_SHARE;
            (amount, amount * rule.tier2_rate)
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        let tier3 = if sales > target {
            let amount = sales - target;
            (amount, amount * rule.tier3_rate)
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        Self::finish(tier1, tier2, tier3)
    }

    /// Returns `sales / target * 100` rounded for output, zero when target is zero.
    #[must_use]
    pub fn achievement_percentage(sales: Decimal, target: Decimal) -> Decimal {
        round_money(percent_of(sales, target))
    }

    fn finish(
        (tier1_amount, tier1_commission): (Decimal, Decimal),
        (tier2_amount, tier2_commission): (Decimal, Decimal),
        (tier3_amount, tier3_commission): (Decimal, Decimal),
    ) -> CommissionResult {
        CommissionResult {
            tier1_amount: round_money(tier1_amount),
            tier1_commission: round_money(tier1_commission),
            tier2_amount: round_money(tier2_amount),
            tier2_commission: round_money(tier2_commission),
            tier3_amount: round_money(tier3_amount),
            tier3_commission: round_money(tier3_commission),
            total_commission: round_money(tier1_commission + tier2_commission + tier3_commission),
        }
    }
}

//! Property tests for the commission calculator and preview service.

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::calculator::CommissionCalculator;
use super::service::CommissionService;
use super::types::CommissionRule;
use crate::testing::{InMemorySource, rule};

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn rate() -> impl Strategy<Value = Decimal> {
    (1i64..=10_000i64).prop_map(|bp| Decimal::new(bp, 4))
}

fn arb_rule() -> impl Strategy<Value = CommissionRule> {
    (rate(), rate(), rate()).prop_map(|(t1, t2, t3)| rule("pharma", t1, t2, t3))
}

proptest! {
    /// Same inputs, same output.
    #[test]
    fn prop_calculate_is_idempotent(sales in amount(), target in amount(), rule in arb_rule()) {
        let first = CommissionCalculator::calculate(sales, target, Some(&rule));
        let second = CommissionCalculator::calculate(sales, target, Some(&rule));
        prop_assert_eq!(first, second);
    }

    /// Every output field carries at most two decimal places.
    #[test]
    fn prop_outputs_are_rounded(sales in amount(), target in amount(), rule in arb_rule()) {
        let result = CommissionCalculator::calculate(sales, target, Some(&rule));
        for value in [
            result.tier1_amount,
            result.tier1_commission,
            result.tier2_amount,
            result.tier2_commission,
            result.tier3_amount,
            result.tier3_commission,
            result.total_commission,
        ] {
            prop_assert!(value.scale() <= 2, "{} has scale {}", value, value.scale());
        }
    }

    /// The rounded total differs from the sum of the rounded tiers by at most one cent.
    #[test]
    fn prop_total_tracks_tier_sum(sales in amount(), target in amount(), rule in arb_rule()) {
        let result = CommissionCalculator::calculate(sales, target, Some(&rule));
        let tier_sum = result.tier1_commission + result.tier2_commission + result.tier3_commission;
        prop_assert!((result.total_commission - tier_sum).abs() <= dec!(0.01));
    }

    /// A positive target always pays tier 1 on 70% of it.
    #[test]
    fn prop_tier1_is_seventy_percent_of_target(
        sales in amount(),
        target in (1i64..100_000_000i64).prop_map(|c| Decimal::new(c, 2)),
        rule in arb_rule(),
    ) {
        let result = CommissionCalculator::calculate(sales, target, Some(&rule));
        prop_assert_eq!(
            result.tier1_amount,
            komisi_shared::types::round_money(target * dec!(0.7))
        );
    }

    /// Tier 3 pays only above target.
    #[test]
    fn prop_tier3_only_above_target(sales in amount(), target in amount(), rule in arb_rule()) {
        let result = CommissionCalculator::calculate(sales, target, Some(&rule));
        if sales <= target || target.is_zero() {
            prop_assert_eq!(result.tier3_amount, Decimal::ZERO);
        } else {
            prop_assert_eq!(result.tier3_amount, sales - target);
        }
    }

    /// No rule, no commission.
    #[test]
    fn prop_missing_rule_is_zero(sales in amount(), target in amount()) {
        prop_assert!(CommissionCalculator::calculate(sales, target, None).is_zero());
    }
}

#[test]
fn test_total_is_rounded_from_unrounded_tiers() {
    let rule = rule("pharma", dec!(0.004), dec!(0.004), dec!(0.004));
    let result = CommissionCalculator::calculate(dec!(2), dec!(1), Some(&rule));

    // 0.0028 + 0.0012 + 0.004 = 0.008 rounds up even though each tier rounds to zero.
    assert_eq!(result.tier1_commission, Decimal::ZERO);
    assert_eq!(result.tier2_commission, Decimal::ZERO);
    assert_eq!(result.tier3_commission, Decimal::ZERO);
    assert_eq!(result.total_commission, dec!(0.01));
}

#[tokio::test]
async fn test_preview_uses_stored_rule() {
    let source = InMemorySource {
        rules: vec![rule("pharma", dec!(0.0025), dec!(0.003), dec!(0.004))],
        ..Default::default()
    };
    let service = CommissionService::new(Arc::new(source));

    let preview = service
        .preview("pharma", dec!(150000), dec!(100000))
        .await
        .unwrap();

    assert_eq!(preview.rule.as_ref().map(|r| r.category.as_str()), Some("pharma"));
    assert_eq!(preview.commission.total_commission, dec!(465.00));
    assert_eq!(preview.achievement_percentage, dec!(150));
}

#[tokio::test]
async fn test_preview_without_rule_is_zero() {
    let service = CommissionService::new(Arc::new(InMemorySource::default()));

    let preview = service.preview("unknown", dec!(100), dec!(50)).await.unwrap();

    assert!(preview.rule.is_none());
    assert!(preview.commission.is_zero());
    assert_eq!(preview.achievement_percentage, dec!(200));

    let json = serde_json::to_value(&preview).unwrap();
    assert_eq!(json["rule"], serde_json::Value::Null);
    assert_eq!(json["commission"]["total"], serde_json::json!(0.0));
}

//! Report builder tests against an in-memory data source.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use komisi_shared::types::RepresentativeId;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{ReportBuilder, ReportError, ReportPeriod, ReportService};
use crate::commission::RuleBook;
use crate::testing::{InMemorySource, StoreUnavailable, collection, rule, sale};

const MARCH: (i32, i32) = (2024, 3);
const APRIL: (i32, i32) = (2024, 4);

fn standard_rules() -> Vec<crate::commission::CommissionRule> {
    vec![rule("pharma", dec!(0.0025), dec!(0.003), dec!(0.004))]
}

#[tokio::test]
async fn test_representative_report_end_to_end() {
    let rina = RepresentativeId::new();
    let other = RepresentativeId::new();
    let source = InMemorySource {
        sales: vec![
            sale(rina, Some("Rina"), "pharma", dec!(150000), dec!(100000), MARCH),
            sale(rina, Some("Rina"), "pharma", dec!(600), dec!(1000), APRIL),
            sale(other, Some("Budi"), "pharma", dec!(5000), dec!(5000), MARCH),
        ],
        collections: vec![
            collection(rina, dec!(1200.50), MARCH),
            collection(rina, dec!(99), APRIL),
            collection(other, dec!(700), MARCH),
        ],
        rules: standard_rules(),
        ..Default::default()
    };

    let report = ReportBuilder::new(Arc::new(source))
        .representative_report(rina, Some(2024), Some(3))
        .await
        .unwrap();

    assert_eq!(report.representative_name.as_deref(), Some("Rina"));
    assert_eq!(report.period, ReportPeriod::new(Some(2024), Some(3)));
    assert_eq!(report.sales_details.len(), 1);
    assert_eq!(report.collection_records.len(), 1);
    assert_eq!(report.summary.total_sales, dec!(150000));
    assert_eq!(report.summary.total_target, dec!(100000));
    assert_eq!(report.summary.total_commission, dec!(465.00));
    assert_eq!(report.summary.total_collection, dec!(1200.50));
    assert_eq!(report.summary.achievement_percentage, dec!(150));
}

#[tokio::test]
async fn test_representative_without_sales_is_degraded_not_error() {
    let ghost = RepresentativeId::new();
    let source = InMemorySource {
        collections: vec![collection(ghost, dec!(300), MARCH)],
        rules: standard_rules(),
        ..Default::default()
    };

    let report = ReportBuilder::new(Arc::new(source))
        .representative_report(ghost, None, None)
        .await
        .unwrap();

    assert_eq!(report.representative_name, None);
    assert!(report.sales_details.is_empty());
    assert_eq!(report.summary.total_collection, dec!(300));
    assert_eq!(report.summary.achievement_percentage, Decimal::ZERO);
}

#[tokio::test]
async fn test_representative_name_comes_from_first_sale() {
    let rep = RepresentativeId::new();
    let source = InMemorySource {
        sales: vec![
            sale(rep, None, "pharma", dec!(10), dec!(10), MARCH),
            sale(rep, Some("Rina"), "pharma", dec!(10), dec!(10), MARCH),
        ],
        rules: standard_rules(),
        ..Default::default()
    };

    let report = ReportBuilder::new(Arc::new(source))
        .representative_report(rep, None, None)
        .await
        .unwrap();

    assert_eq!(report.representative_name, None);
}

#[tokio::test]
async fn test_full_report_groups_in_first_seen_order() {
    let rina = RepresentativeId::new();
    let budi = RepresentativeId::new();
    let sari = RepresentativeId::new();
    let source = InMemorySource {
        sales: vec![
            sale(budi, Some("Budi"), "pharma", dec!(1000), dec!(1000), MARCH),
            sale(rina, Some("Rina"), "pharma", dec!(800), dec!(1000), MARCH),
            sale(budi, Some("Budi S."), "devices", dec!(500), dec!(0), MARCH),
        ],
        collections: vec![
            collection(rina, dec!(400), MARCH),
            collection(budi, dec!(250.25), MARCH),
            collection(budi, dec!(100), MARCH),
            collection(sari, dec!(999), MARCH),
        ],
        rules: standard_rules(),
        ..Default::default()
    };

    let report = ReportBuilder::new(Arc::new(source))
        .full_report(Some(2024), None)
        .await
        .unwrap();

    assert_eq!(report.summary.representatives_count, 2);
    let ids: Vec<_> = report.representatives.iter().map(|g| g.representative_id).collect();
    assert_eq!(ids, vec![budi, rina]);

    let budi_group = &report.representatives[0];
    assert_eq!(budi_group.representative_name.as_deref(), Some("Budi"));
    assert_eq!(budi_group.sales.len(), 2);
    assert_eq!(budi_group.collection_records.len(), 2);
    assert_eq!(budi_group.totals.sales, dec!(1500));
    assert_eq!(budi_group.totals.target, dec!(1000));
    assert_eq!(budi_group.totals.collection, dec!(350.25));
    assert_eq!(budi_group.totals.achievement_percentage, dec!(150));
    // "devices" has no rule, so only the pharma record pays: 1.75 + 0.90
    assert_eq!(budi_group.totals.commission, dec!(2.65));

    let rina_group = &report.representatives[1];
    assert_eq!(rina_group.totals.collection, dec!(400));
    assert_eq!(rina_group.totals.achievement_percentage, dec!(80));

    // Sari has collections but no sales: no group, not in totals.
    assert_eq!(report.summary.totals.total_collection, dec!(750.25));
    assert_eq!(report.summary.totals.total_sales, dec!(2300));
    assert_eq!(report.summary.totals.total_target, dec!(2000));
    assert_eq!(report.summary.totals.achievement_percentage, dec!(115));
}

#[tokio::test]
async fn test_full_report_json_field_names() {
    let rep = RepresentativeId::new();
    let source = InMemorySource {
        sales: vec![sale(rep, Some("Rina"), "pharma", dec!(150000), dec!(100000), MARCH)],
        rules: standard_rules(),
        ..Default::default()
    };

    let report = ReportBuilder::new(Arc::new(source))
        .full_report(None, None)
        .await
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["period"], serde_json::json!({"year": null, "month": null}));
    assert_eq!(json["summary"]["total_commission"], serde_json::json!(465.0));
    assert_eq!(json["summary"]["representatives_count"], serde_json::json!(1));
    assert_eq!(json["summary"]["achievement_percentage"], serde_json::json!(150.0));
    let group = &json["representatives"][0];
    assert_eq!(group["representative_name"], "Rina");
    assert_eq!(group["totals"]["commission"], serde_json::json!(465.0));
    assert_eq!(group["sales"][0]["commission"]["total"], serde_json::json!(465.0));
}

#[tokio::test]
async fn test_empty_store_yields_empty_full_report() {
    let report = ReportBuilder::new(Arc::new(InMemorySource::default()))
        .full_report(Some(2030), Some(1))
        .await
        .unwrap();

    assert_eq!(report.summary.representatives_count, 0);
    assert!(report.representatives.is_empty());
    assert_eq!(report.summary.totals.achievement_percentage, Decimal::ZERO);
}

#[tokio::test]
async fn test_every_report_reads_the_store_afresh() {
    let rep = RepresentativeId::new();
    let source = Arc::new(InMemorySource {
        sales: vec![sale(rep, Some("Rina"), "pharma", dec!(100), dec!(80), MARCH)],
        collections: vec![collection(rep, dec!(50), MARCH)],
        rules: standard_rules(),
        ..Default::default()
    });
    let builder = ReportBuilder::new(Arc::clone(&source));

    let first = builder.full_report(Some(2024), Some(3)).await.unwrap();
    assert_eq!(source.fetches.load(Ordering::SeqCst), 3);

    let second = builder.full_report(Some(2024), Some(3)).await.unwrap();
    assert_eq!(source.fetches.load(Ordering::SeqCst), 6);
    assert_eq!(first.summary, second.summary);

    builder.representative_report(rep, None, None).await.unwrap();
    assert_eq!(source.fetches.load(Ordering::SeqCst), 9);
}

#[tokio::test]
async fn test_data_source_error_propagates() {
    let rep = RepresentativeId::new();
    let source = InMemorySource {
        sales: vec![sale(rep, Some("Rina"), "pharma", dec!(10), dec!(10), MARCH)],
        rules: standard_rules(),
        fail_collections: true,
        ..Default::default()
    };
    let source = Arc::new(source);
    let builder = ReportBuilder::new(Arc::clone(&source));

    let full = builder.full_report(None, None).await;
    assert!(matches!(full, Err(ReportError::DataSource(StoreUnavailable))));
    assert_eq!(source.fetches.load(Ordering::SeqCst), 3);

    let single = builder.representative_report(rep, None, None).await;
    assert_eq!(single.unwrap_err().into_source(), StoreUnavailable);
}

prop_compose! {
    fn arb_sale(reps: Vec<RepresentativeId>)(
        rep in proptest::sample::select(reps),
        category in prop_oneof![Just("pharma"), Just("devices"), Just("unruled")],
        sales_cents in 0i64..50_000_000,
        target_cents in 0i64..50_000_000,
    ) -> crate::commission::SalesRecord {
        sale(
            rep,
            Some("Rep"),
            category,
            Decimal::new(sales_cents, 2),
            Decimal::new(target_cents, 2),
            MARCH,
        )
    }
}

fn arb_records() -> impl Strategy<Value = Vec<crate::commission::SalesRecord>> {
    let reps: Vec<RepresentativeId> = (0..4).map(|_| RepresentativeId::new()).collect();
    proptest::collection::vec(arb_sale(reps), 0..40)
}

fn property_rules() -> RuleBook {
    RuleBook::from_rules(vec![
        rule("pharma", dec!(0.0025), dec!(0.003), dec!(0.004)),
        rule("devices", dec!(0.00333), dec!(0.0117), dec!(0.05)),
    ])
}

proptest! {
    /// The full report's commission equals the sum of every record's total.
    #[test]
    fn prop_full_report_commission_is_sum_of_records(records in arb_records()) {
        let rules = property_rules();
        let report = ReportService::generate_full_report(
            ReportPeriod::default(),
            records,
            Vec::new(),
            &rules,
        );

        let per_record: Decimal = report
            .representatives
            .iter()
            .flat_map(|g| g.sales.iter())
            .map(|s| s.commission.total_commission)
            .sum();
        let per_group: Decimal = report.representatives.iter().map(|g| g.totals.commission).sum();

        prop_assert_eq!(report.summary.totals.total_commission, per_record);
        prop_assert_eq!(per_group, per_record);
    }

    /// Grouping keeps every record exactly once.
    #[test]
    fn prop_full_report_keeps_every_record(records in arb_records()) {
        let expected = records.len();
        let report = ReportService::generate_full_report(
            ReportPeriod::default(),
            records,
            Vec::new(),
            &property_rules(),
        );

        let grouped: usize = report.representatives.iter().map(|g| g.sales.len()).sum();
        prop_assert_eq!(grouped, expected);
        prop_assert_eq!(report.summary.representatives_count, report.representatives.len());
    }

    /// With every target zero, every achievement percentage is zero.
    #[test]
    fn prop_zero_target_achievement_is_zero(
        sales in proptest::collection::vec(0i64..10_000_000, 0..20),
    ) {
        let rep = RepresentativeId::new();
        let records = sales
            .into_iter()
            .map(|cents| sale(rep, None, "pharma", Decimal::new(cents, 2), Decimal::ZERO, MARCH))
            .collect();

        let report = ReportService::generate_representative_report(
            rep,
            ReportPeriod::default(),
            records,
            Vec::new(),
            &property_rules(),
        );

        prop_assert_eq!(report.summary.achievement_percentage, Decimal::ZERO);
        for detail in &report.sales_details {
            prop_assert_eq!(detail.achievement_percentage, Decimal::ZERO);
        }
    }
}

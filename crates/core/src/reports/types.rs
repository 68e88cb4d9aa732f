//! Report payloads.
//!
//! Field names are consumed by external integrations and must not change.

use komisi_shared::types::RepresentativeId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::commission::{CollectionRecord, CommissionedSale};

/// Year and month a report was filtered on; `None` means unfiltered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    /// Year filter.
    pub year: Option<i32>,
    /// Month filter.
    pub month: Option<i32>,
}

impl ReportPeriod {
    /// Creates a period from optional filters.
    #[must_use]
    pub const fn new(year: Option<i32>, month: Option<i32>) -> Self {
        Self { year, month }
    }
}

/// Rounded totals for one representative report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Sum of sales.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sales: Decimal,
    /// Sum of targets.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_target: Decimal,
    /// Sum of collected amounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_collection: Decimal,
    /// Sum of per-record commission totals.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_commission: Decimal,
    /// `total_sales / total_target * 100`, zero when there is no target.
    #[serde(with = "rust_decimal::serde::float")]
    pub achievement_percentage: Decimal,
}

/// Commission report for one representative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentativeReport {
    /// Representative the report is for.
    pub representative_id: RepresentativeId,
    /// Name from the first sales record; `None` when there are no sales.
    pub representative_name: Option<String>,
    /// Filters applied.
    pub period: ReportPeriod,
    /// Totals.
    pub summary: ReportSummary,
    /// Commissioned sales in data source order.
    pub sales_details: Vec<CommissionedSale>,
    /// Collections for the same representative and period.
    pub collection_records: Vec<CollectionRecord>,
}

/// Organization-wide totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullReportSummary {
    /// Totals across every representative group.
    #[serde(flatten)]
    pub totals: ReportSummary,
    /// Number of representative groups.
    pub representatives_count: usize,
}

/// Rounded totals for one representative group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTotals {
    /// Sum of sales.
    #[serde(with = "rust_decimal::serde::float")]
    pub sales: Decimal,
    /// Sum of targets.
    #[serde(with = "rust_decimal::serde::float")]
    pub target: Decimal,
    /// Sum of collected amounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub collection: Decimal,
    /// Sum of commission totals.
    #[serde(with = "rust_decimal::serde::float")]
    pub commission: Decimal,
    /// Group achievement, zero when there is no target.
    #[serde(with = "rust_decimal::serde::float")]
    pub achievement_percentage: Decimal,
}

/// One representative's slice of the full report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentativeGroup {
    /// Representative ID.
    pub representative_id: RepresentativeId,
    /// Name from the first record seen for this representative.
    pub representative_name: Option<String>,
    /// Commissioned sales.
    pub sales: Vec<CommissionedSale>,
    /// Group totals.
    pub totals: GroupTotals,
    /// Collections credited to this representative.
    pub collection_records: Vec<CollectionRecord>,
}

/// Commission report across all representatives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullReport {
    /// Filters applied.
    pub period: ReportPeriod,
    /// Organization-wide totals.
    pub summary: FullReportSummary,
    /// Groups in first-seen order.
    pub representatives: Vec<RepresentativeGroup>,
}

//! Commission domain types.

use komisi_shared::types::{
    CollectionRecordId, CommissionRuleId, CompanyId, RepresentativeId, SalesRecordId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tier boundaries and rates for one sales category.
///
/// Rates are multipliers applied to amounts (0.0025 means 0.25%). Bounds are
/// percentages of target achievement. `tier1_from` and `tier1_to` are
/// descriptive only: the calculator pays tier 1 on a fixed 70% of target and
/// never consults them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRule {
    /// Rule ID.
    pub id: CommissionRuleId,
    /// Sales category this rule applies to; the join key against sales records.
    pub category: String,
    /// Lower achievement bound of tier 1 (descriptive).
    #[serde(with = "rust_decimal::serde::float")]
    pub tier1_from: Decimal,
    /// Upper achievement bound of tier 1 (descriptive).
    #[serde(with = "rust_decimal::serde::float")]
    pub tier1_to: Decimal,
    /// Tier 1 rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub tier1_rate: Decimal,
    /// Lower achievement bound of tier 2.
    #[serde(with = "rust_decimal::serde::float")]
    pub tier2_from: Decimal,
    /// Upper achievement bound of tier 2.
    #[serde(with = "rust_decimal::serde::float")]
    pub tier2_to: Decimal,
    /// Tier 2 rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub tier2_rate: Decimal,
    /// Lower achievement bound of tier 3.
    #[serde(with = "rust_decimal::serde::float")]
    pub tier3_from: Decimal,
    /// Tier 3 rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub tier3_rate: Decimal,
}

/// Monthly sales-vs-target figure for one representative at one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Record ID.
    pub id: SalesRecordId,
    /// Representative who made the sales.
    pub representative_id: RepresentativeId,
    /// Representative name from the join; `None` when the join found nothing.
    pub representative_name: Option<String>,
    /// Customer company.
    pub company_id: CompanyId,
    /// Company name from the join; `None` when the join found nothing.
    pub company_name: Option<String>,
    /// Sales category used to resolve the commission rule.
    pub category: String,
    /// Achieved sales amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub sales: Decimal,
    /// Target amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub target: Decimal,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: i32,
}

/// Cash collected from a company; summed in reports, never commissioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRecord {
    /// Record ID.
    pub id: CollectionRecordId,
    /// Representative credited with the collection.
    pub representative_id: RepresentativeId,
    /// Representative name from the join.
    pub representative_name: Option<String>,
    /// Paying company.
    pub company_id: CompanyId,
    /// Company name from the join.
    pub company_name: Option<String>,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: i32,
    /// Amount collected.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Three-tier commission breakdown for one sales figure.
///
/// Serialized with the field names downstream consumers parse:
/// `tier1`, `tier2`, `tier3`, `total` are commissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionResult {
    /// Portion of sales paid at the tier 1 rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub tier1_amount: Decimal,
    /// Tier 1 commission.
    #[serde(rename = "tier1", with = "rust_decimal::serde::float")]
    pub tier1_commission: Decimal,
    /// Portion of sales paid at the tier 2 rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub tier2_amount: Decimal,
    /// Tier 2 commission.
    #[serde(rename = "tier2", with = "rust_decimal::serde::float")]
    pub tier2_commission: Decimal,
    /// Sales above target, paid at the tier 3 rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub tier3_amount: Decimal,
    /// Tier 3 commission.
    #[serde(rename = "tier3", with = "rust_decimal::serde::float")]
    pub tier3_commission: Decimal,
    /// Sum of the three tier commissions.
    ///
    /// Rounded once from the unrounded tier commissions rather than summed
    /// from the rounded tier fields, so it can differ from
    /// `tier1 + tier2 + tier3` by up to 0.01.
    #[serde(rename = "total", with = "rust_decimal::serde::float")]
    pub total_commission: Decimal,
}

impl CommissionResult {
    /// Returns true when no commission is payable.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.total_commission.is_zero()
    }
}

/// A sales record with its computed achievement and commission.
///
/// This is what the aggregator produces per record and what reports list as
/// sales details: the record's own fields, then `achievement_percentage` and
/// the `commission` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionedSale {
    /// The source record.
    #[serde(flatten)]
    pub record: SalesRecord,
    /// `sales / target * 100`, zero when target is zero, rounded to 2 places.
    #[serde(with = "rust_decimal::serde::float")]
    pub achievement_percentage: Decimal,
    /// Commission breakdown.
    pub commission: CommissionResult,
}

/// Equality filters applied by the data store when fetching rows.
///
/// `None` means "do not filter on this column".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Only rows for this representative.
    pub representative_id: Option<RepresentativeId>,
    /// Only rows for this company.
    pub company_id: Option<CompanyId>,
    /// Only rows for this year.
    pub year: Option<i32>,
    /// Only rows for this month.
    pub month: Option<i32>,
}

impl RecordFilter {
    /// Filter on a period only.
    #[must_use]
    pub const fn for_period(year: Option<i32>, month: Option<i32>) -> Self {
        Self {
            representative_id: None,
            company_id: None,
            year,
            month,
        }
    }

    /// Filter on one representative within a period.
    #[must_use]
    pub const fn for_representative(
        representative_id: RepresentativeId,
        year: Option<i32>,
        month: Option<i32>,
    ) -> Self {
        Self {
            representative_id: Some(representative_id),
            company_id: None,
            year,
            month,
        }
    }
}

//! Report assembly.
//!
//! Everything here is pure: inputs are already-fetched rows, outputs are the
//! report payloads. Sums are kept at full precision and rounded once, when
//! the payload is built.

use std::collections::HashMap;

use komisi_shared::types::{RepresentativeId, percent_of, round_money};
use rust_decimal::Decimal;
use tracing::debug;

use super::types::{
    FullReport, FullReportSummary, GroupTotals, ReportPeriod, ReportSummary, RepresentativeGroup,
    RepresentativeReport,
};
use crate::commission::{
    CollectionRecord, CommissionedSale, RuleBook, SalesAggregator, SalesRecord,
};

/// Unrounded running totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Totals {
    sales: Decimal,
    target: Decimal,
    collection: Decimal,
    commission: Decimal,
}

impl Totals {
    fn add_sale(&mut self, sale: &CommissionedSale) {
        self.sales += sale.record.sales;
        self.target += sale.record.target;
        self.commission += sale.commission.total_commission;
    }

    fn add_collections(&mut self, records: &[CollectionRecord]) {
        self.collection += records.iter().map(|c| c.amount).sum::<Decimal>();
    }

    fn add(&mut self, other: &Self) {
        self.sales += other.sales;
        self.target += other.target;
        self.collection += other.collection;
        self.commission += other.commission;
    }

    fn achievement(&self) -> Decimal {
        round_money(percent_of(self.sales, self.target))
    }

    fn summary(&self) -> ReportSummary {
        ReportSummary {
            total_sales: round_money(self.sales),
            total_target: round_money(self.target),
            total_collection: round_money(self.collection),
            total_commission: round_money(self.commission),
            achievement_percentage: self.achievement(),
        }
    }

    fn group_totals(&self) -> GroupTotals {
        GroupTotals {
            sales: round_money(self.sales),
            target: round_money(self.target),
            collection: round_money(self.collection),
            commission: round_money(self.commission),
            achievement_percentage: self.achievement(),
        }
    }
}

struct GroupBuilder {
    representative_id: RepresentativeId,
    representative_name: Option<String>,
    sales: Vec<CommissionedSale>,
    totals: Totals,
}

/// Builds report payloads from fetched rows.
pub struct ReportService;

impl ReportService {
    /// Builds the report for one representative.
    ///
    /// `sales` and `collections` must already be filtered to the
    /// representative and period. With no sales the name is `None` and the
    /// report is otherwise well formed.
    #[must_use]
    pub fn generate_representative_report(
        representative_id: RepresentativeId,
        period: ReportPeriod,
        sales: Vec<SalesRecord>,
        collections: Vec<CollectionRecord>,
        rules: &RuleBook,
    ) -> RepresentativeReport {
        let sales_details = SalesAggregator::aggregate(sales, rules);

        let mut totals = Totals::default();
        for sale in &sales_details {
            totals.add_sale(sale);
        }
        totals.add_collections(&collections);

        let representative_name = sales_details
            .first()
            .and_then(|sale| sale.record.representative_name.clone());

        debug!(
            %representative_id,
            sales = sales_details.len(),
            collections = collections.len(),
            "Built representative report"
        );

        RepresentativeReport {
            representative_id,
            representative_name,
            period,
            summary: totals.summary(),
            sales_details,
            collection_records: collections,
        }
    }

    /// Builds the organization-wide report.
    ///
    /// Sales are grouped by representative in first-seen order; the first
    /// record of each group names it. Collections attach to the group of
    /// their representative. Collections of a representative with no sales
    /// in the period belong to no group and are left out of the totals.
    #[must_use]
    pub fn generate_full_report(
        period: ReportPeriod,
        sales: Vec<SalesRecord>,
        collections: Vec<CollectionRecord>,
        rules: &RuleBook,
    ) -> FullReport {
        let commissioned = SalesAggregator::aggregate(sales, rules);
        let sales_count = commissioned.len();

        let mut groups: Vec<GroupBuilder> = Vec::new();
        let mut index: HashMap<RepresentativeId, usize> = HashMap::new();

        for sale in commissioned {
            let representative_id = sale.record.representative_id;
            let slot = *index.entry(representative_id).or_insert_with(|| {
                groups.push(GroupBuilder {
                    representative_id,
                    representative_name: sale.record.representative_name.clone(),
                    sales: Vec::new(),
                    totals: Totals::default(),
                });
                groups.len() - 1
            });

            let group = &mut groups[slot];
            group.totals.add_sale(&sale);
            group.sales.push(sale);
        }

        let mut collections_by_rep: HashMap<RepresentativeId, Vec<CollectionRecord>> =
            HashMap::new();
        let collections_count = collections.len();
        for record in collections {
            collections_by_rep
                .entry(record.representative_id)
                .or_default()
                .push(record);
        }

        let mut overall = Totals::default();
        let representatives: Vec<RepresentativeGroup> = groups
            .into_iter()
            .map(|mut group| {
                let collection_records = collections_by_rep
                    .remove(&group.representative_id)
                    .unwrap_or_default();
                group.totals.add_collections(&collection_records);
                overall.add(&group.totals);

                RepresentativeGroup {
                    representative_id: group.representative_id,
                    representative_name: group.representative_name,
                    sales: group.sales,
                    totals: group.totals.group_totals(),
                    collection_records,
                }
            })
            .collect();

        debug!(
            sales = sales_count,
            collections = collections_count,
            representatives = representatives.len(),
            ungrouped_collection_reps = collections_by_rep.len(),
            "Built full report"
        );

        FullReport {
            period,
            summary: FullReportSummary {
                totals: overall.summary(),
                representatives_count: representatives.len(),
            },
            representatives,
        }
    }
}

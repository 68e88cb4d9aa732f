//! In-memory fixtures shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use komisi_shared::types::{
    CollectionRecordId, CommissionRuleId, CompanyId, RepresentativeId, SalesRecordId,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::commission::{CollectionRecord, CommissionRule, RecordFilter, SalesRecord};
use crate::reports::CommissionDataSource;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("store unavailable")]
pub struct StoreUnavailable;

/// Data source over vectors, applying equality filters like the real store.
#[derive(Default)]
pub struct InMemorySource {
    pub sales: Vec<SalesRecord>,
    pub collections: Vec<CollectionRecord>,
    pub rules: Vec<CommissionRule>,
    pub fail_collections: bool,
    pub fetches: AtomicUsize,
}

fn matches(
    filter: &RecordFilter,
    representative_id: RepresentativeId,
    company_id: CompanyId,
    year: i32,
    month: i32,
) -> bool {
    filter.representative_id.is_none_or(|id| id == representative_id)
        && filter.company_id.is_none_or(|id| id == company_id)
        && filter.year.is_none_or(|y| y == year)
        && filter.month.is_none_or(|m| m == month)
}

impl CommissionDataSource for InMemorySource {
    type Error = StoreUnavailable;

    async fn fetch_sales_records(
        &self,
        filter: &RecordFilter,
    ) -> Result<Vec<SalesRecord>, StoreUnavailable> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .sales
            .iter()
            .filter(|r| matches(filter, r.representative_id, r.company_id, r.year, r.month))
            .cloned()
            .collect())
    }

    async fn fetch_collection_records(
        &self,
        filter: &RecordFilter,
    ) -> Result<Vec<CollectionRecord>, StoreUnavailable> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_collections {
            return Err(StoreUnavailable);
        }
        Ok(self
            .collections
            .iter()
            .filter(|r| matches(filter, r.representative_id, r.company_id, r.year, r.month))
            .cloned()
            .collect())
    }

    async fn fetch_all_commission_rules(&self) -> Result<Vec<CommissionRule>, StoreUnavailable> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.rules.clone())
    }
}

pub fn rule(category: &str, tier1: Decimal, tier2: Decimal, tier3: Decimal) -> CommissionRule {
    CommissionRule {
        id: CommissionRuleId::new(),
        category: category.to_string(),
        tier1_from: dec!(0),
        tier1_to: dec!(70),
        tier1_rate: tier1,
        tier2_from: dec!(71),
        tier2_to: dec!(100),
        tier2_rate: tier2,
        tier3_from: dec!(101),
        tier3_rate: tier3,
    }
}

pub fn sale(
    representative_id: RepresentativeId,
    name: Option<&str>,
    category: &str,
    sales: Decimal,
    target: Decimal,
    (year, month): (i32, i32),
) -> SalesRecord {
    SalesRecord {
        id: SalesRecordId::new(),
        representative_id,
        representative_name: name.map(str::to_string),
        company_id: CompanyId::new(),
        company_name: Some("PT Sehat Sentosa".to_string()),
        category: category.to_string(),
        sales,
        target,
        year,
        month,
    }
}

pub fn collection(
    representative_id: RepresentativeId,
    amount: Decimal,
    (year, month): (i32, i32),
) -> CollectionRecord {
    CollectionRecord {
        id: CollectionRecordId::new(),
        representative_id,
        representative_name: None,
        company_id: CompanyId::new(),
        company_name: None,
        year,
        month,
        amount,
    }
}

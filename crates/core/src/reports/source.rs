//! Data access contract for commission reports.

use std::future::Future;

use crate::commission::{CollectionRecord, CommissionRule, RecordFilter, SalesRecord};

/// Supplies the rows reports are built from.
///
/// Implemented by the db crate. Rows come back in the order reports list
/// them; the report builder never re-sorts.
pub trait CommissionDataSource: Send + Sync {
    /// Failure reported by the store; reports pass it through unchanged.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sales records matching every set field of `filter`, with joined names.
    fn fetch_sales_records(
        &self,
        filter: &RecordFilter,
    ) -> impl Future<Output = Result<Vec<SalesRecord>, Self::Error>> + Send;

    /// Collection records matching every set field of `filter`, with joined names.
    fn fetch_collection_records(
        &self,
        filter: &RecordFilter,
    ) -> impl Future<Output = Result<Vec<CollectionRecord>, Self::Error>> + Send;

    /// Every commission rule, in a stable order.
    fn fetch_all_commission_rules(
        &self,
    ) -> impl Future<Output = Result<Vec<CommissionRule>, Self::Error>> + Send;
}

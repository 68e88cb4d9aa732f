//! Fetches rows from a data source and hands them to [`ReportService`].

use std::sync::Arc;

use komisi_shared::types::RepresentativeId;
use tracing::info;

use super::error::ReportError;
use super::service::ReportService;
use super::source::CommissionDataSource;
use super::types::{FullReport, ReportPeriod, RepresentativeReport};
use crate::commission::{RecordFilter, RuleBook};

/// Report builder bound to one data source.
///
/// Rows are fetched fresh on every call; nothing is cached between reports.
pub struct ReportBuilder<D> {
    source: Arc<D>,
}

impl<D> Clone for ReportBuilder<D> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<D: CommissionDataSource> ReportBuilder<D> {
    /// Creates a builder reading from `source`.
    pub fn new(source: Arc<D>) -> Self {
        Self { source }
    }

    /// Commission report for one representative.
    ///
    /// A representative with no matching rows yields an empty report, not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::DataSource` if any fetch fails.
    pub async fn representative_report(
        &self,
        representative_id: RepresentativeId,
        year: Option<i32>,
        month: Option<i32>,
    ) -> Result<RepresentativeReport, ReportError<D::Error>> {
        let filter = RecordFilter::for_representative(representative_id, year, month);

        let sales = self.source.fetch_sales_records(&filter).await?;
        let rules = RuleBook::from_rules(self.source.fetch_all_commission_rules().await?);
        let collections = self.source.fetch_collection_records(&filter).await?;

        info!(
            %representative_id,
            ?year,
            ?month,
            sales = sales.len(),
            rules = rules.len(),
            "Generating representative commission report"
        );

        Ok(ReportService::generate_representative_report(
            representative_id,
            ReportPeriod::new(year, month),
            sales,
            collections,
            &rules,
        ))
    }

    /// Commission report across every representative.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::DataSource` if any fetch fails.
    pub async fn full_report(
        &self,
        year: Option<i32>,
        month: Option<i32>,
    ) -> Result<FullReport, ReportError<D::Error>> {
        let filter = RecordFilter::for_period(year, month);

        let sales = self.source.fetch_sales_records(&filter).await?;
        let rules = RuleBook::from_rules(self.source.fetch_all_commission_rules().await?);
        let collections = self.source.fetch_collection_records(&filter).await?;

        info!(
            ?year,
            ?month,
            sales = sales.len(),
            rules = rules.len(),
            "Generating full commission report"
        );

        Ok(ReportService::generate_full_report(
            ReportPeriod::new(year, month),
            sales,
            collections,
            &rules,
        ))
    }
}

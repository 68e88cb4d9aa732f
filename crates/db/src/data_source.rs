//! `CommissionDataSource` backed by PostgreSQL.

use komisi_core::commission::{CollectionRecord, CommissionRule, RecordFilter, SalesRecord};
use komisi_core::reports::CommissionDataSource;
use sea_orm::{DatabaseConnection, DbErr};

use crate::repositories::{
    CollectionRecordRepository, CommissionRuleRepository, SalesRecordRepository,
};

/// Report data source reading through the repositories.
///
/// Sales and collections come back newest period first.
#[derive(Debug, Clone)]
pub struct SeaOrmDataSource {
    sales: SalesRecordRepository,
    collections: CollectionRecordRepository,
    rules: CommissionRuleRepository,
}

impl SeaOrmDataSource {
    /// Creates a data source over a connection pool.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            sales: SalesRecordRepository::new(db.clone()),
            collections: CollectionRecordRepository::new(db.clone()),
            rules: CommissionRuleRepository::new(db),
        }
    }
}

impl CommissionDataSource for SeaOrmDataSource {
    type Error = DbErr;

    async fn fetch_sales_records(&self, filter: &RecordFilter) -> Result<Vec<SalesRecord>, DbErr> {
        self.sales.find_all(filter).await
    }

    async fn fetch_collection_records(
        &self,
        filter: &RecordFilter,
    ) -> Result<Vec<CollectionRecord>, DbErr> {
        self.collections.find_all(filter).await
    }

    async fn fetch_all_commission_rules(&self) -> Result<Vec<CommissionRule>, DbErr> {
        self.rules.list_all().await
    }
}

//! Sales record repository.

use komisi_core::commission::{RecordFilter, SalesRecord};
use komisi_shared::types::{PageRequest, PageResponse};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Select, Set,
};
use tracing::debug;
use uuid::Uuid;

use super::error::RepositoryError;
use super::names::lookup_names;
use crate::entities::{companies, representatives, sales_records};

/// Input for creating or replacing a sales record. Must already be validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesRecordInput {
    /// Representative who made the sales.
    pub representative_id: Uuid,
    /// Customer company.
    pub company_id: Uuid,
    /// Sales category.
    pub category: String,
    /// Achieved sales.
    pub sales: Decimal,
    /// Target.
    pub target: Decimal,
    /// Year.
    pub year: i32,
    /// Month (1-12).
    pub month: i32,
}

impl From<&SalesRecord> for SalesRecordInput {
    fn from(record: &SalesRecord) -> Self {
        Self {
            representative_id: record.representative_id.into_inner(),
            company_id: record.company_id.into_inner(),
            category: record.category.clone(),
            sales: record.sales,
            target: record.target,
            year: record.year,
            month: record.month,
        }
    }
}

/// Applies equality filters and the newest-period-first order.
fn filtered(filter: &RecordFilter) -> Select<sales_records::Entity> {
    let mut query = sales_records::Entity::find();
    if let Some(id) = filter.representative_id {
        query = query.filter(sales_records::Column::RepresentativeId.eq(id.into_inner()));
    }
    if let Some(id) = filter.company_id {
        query = query.filter(sales_records::Column::CompanyId.eq(id.into_inner()));
    }
    if let Some(year) = filter.year {
        query = query.filter(sales_records::Column::Year.eq(year));
    }
    if let Some(month) = filter.month {
        query = query.filter(sales_records::Column::Month.eq(month));
    }
    query
        .order_by_desc(sales_records::Column::Year)
        .order_by_desc(sales_records::Column::Month)
        .order_by_asc(sales_records::Column::CreatedAt)
        .order_by_asc(sales_records::Column::Id)
}

/// Sales record repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct SalesRecordRepository {
    db: DatabaseConnection,
}

impl SalesRecordRepository {
    /// Creates a new sales record repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_names(
        &self,
        rows: Vec<sales_records::Model>,
    ) -> Result<Vec<SalesRecord>, DbErr> {
        let names = lookup_names(
            &self.db,
            rows.iter().map(|r| (r.representative_id, r.company_id)),
        )
        .await?;
        Ok(rows.into_iter().map(|r| names.sales_record(r)).collect())
    }

    /// Every record matching `filter`, newest period first, with joined names.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_all(&self, filter: &RecordFilter) -> Result<Vec<SalesRecord>, DbErr> {
        let rows = filtered(filter).all(&self.db).await?;
        debug!(count = rows.len(), ?filter, "Fetched sales records");
        self.with_names(rows).await
    }

    /// One page of records matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: &RecordFilter,
        page: PageRequest,
    ) -> Result<PageResponse<SalesRecord>, DbErr> {
        let paginator = filtered(filter).paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.page_index()).await?;

        Ok(PageResponse::new(self.with_names(rows).await?, page, total))
    }

    /// Finds a record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SalesRecord>, DbErr> {
        let Some(row) = sales_records::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.with_names(vec![row]).await?.pop())
    }

    async fn ensure_references(&self, input: &SalesRecordInput) -> Result<(), RepositoryError> {
        if representatives::Entity::find_by_id(input.representative_id)
            .count(&self.db)
            .await?
            == 0
        {
            return Err(RepositoryError::not_found(
                "representative",
                input.representative_id,
            ));
        }
        if companies::Entity::find_by_id(input.company_id)
            .count(&self.db)
            .await?
            == 0
        {
            return Err(RepositoryError::not_found("company", input.company_id));
        }
        Ok(())
    }

    /// Creates a record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the representative or company does not exist.
    pub async fn create(
        &self,
        input: SalesRecordInput,
        created_by: Option<Uuid>,
    ) -> Result<SalesRecord, RepositoryError> {
        self.ensure_references(&input).await?;

        let now = chrono::Utc::now().into();
        let model = sales_records::ActiveModel {
            id: Set(Uuid::now_v7()),
            representative_id: Set(input.representative_id),
            company_id: Set(input.company_id),
            category: Set(input.category),
            sales: Set(input.sales),
            target: Set(input.target),
            year: Set(input.year),
            month: Set(input.month),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let row = model.insert(&self.db).await?;
        let mut records = self.with_names(vec![row]).await?;
        records
            .pop()
            .ok_or_else(|| RepositoryError::Database(DbErr::RecordNotInserted))
    }

    /// Replaces a record's fields.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown record, representative or company.
    pub async fn update(
        &self,
        id: Uuid,
        input: SalesRecordInput,
    ) -> Result<SalesRecord, RepositoryError> {
        let existing = sales_records::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("sales record", id))?;
        self.ensure_references(&input).await?;

        let mut model = existing.into_active_model();
        model.representative_id = Set(input.representative_id);
        model.company_id = Set(input.company_id);
        model.category = Set(input.category);
        model.sales = Set(input.sales);
        model.target = Set(input.target);
        model.year = Set(input.year);
        model.month = Set(input.month);
        model.updated_at = Set(chrono::Utc::now().into());

        let row = model.update(&self.db).await?;
        let mut records = self.with_names(vec![row]).await?;
        records
            .pop()
            .ok_or_else(|| RepositoryError::not_found("sales record", id))
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown ID.
    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sales_records::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("sales record", id));
        }
        Ok(())
    }
}

//! Collection record repository.

use komisi_core::commission::{CollectionRecord, RecordFilter};
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
use crate::entities::{collection_records, companies, representatives};

/// Input for creating or replacing a collection record. Must already be validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRecordInput {
    /// Representative credited.
    pub representative_id: Uuid,
    /// Paying company.
    pub company_id: Uuid,
    /// Amount collected.
    pub amount: Decimal,
    /// Year.
    pub year: i32,
    /// Month (1-12).
    pub month: i32,
}

impl From<&CollectionRecord> for CollectionRecordInput {
    fn from(record: &CollectionRecord) -> Self {
        Self {
            representative_id: record.representative_id.into_inner(),
            company_id: record.company_id.into_inner(),
            amount: record.amount,
            year: record.year,
            month: record.month,
        }
    }
}

fn filtered(filter: &RecordFilter) -> Select<collection_records::Entity> {
    let mut query = collection_records::Entity::find();
    if let Some(id) = filter.representative_id {
        query = query.filter(collection_records::Column::RepresentativeId.eq(id.into_inner()));
    }
    if let Some(id) = filter.company_id {
        query = query.filter(collection_records::Column::CompanyId.eq(id.into_inner()));
    }
    if let Some(year) = filter.year {
        query = query.filter(collection_records::Column::Year.eq(year));
    }
    if let Some(month) = filter.month {
        query = query.filter(collection_records::Column::Month.eq(month));
    }
    query
        .order_by_desc(collection_records::Column::Year)
        .order_by_desc(collection_records::Column::Month)
        .order_by_asc(collection_records::Column::CreatedAt)
        .order_by_asc(collection_records::Column::Id)
}

/// Collection record repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CollectionRecordRepository {
    db: DatabaseConnection,
}

impl CollectionRecordRepository {
    /// Creates a new collection record repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_names(
        &self,
        rows: Vec<collection_records::Model>,
    ) -> Result<Vec<CollectionRecord>, DbErr> {
        let names = lookup_names(
            &self.db,
            rows.iter().map(|r| (r.representative_id, r.company_id)),
        )
        .await?;
        Ok(rows.into_iter().map(|r| names.collection_record(r)).collect())
    }

    /// Every record matching `filter`, newest period first, with joined names.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_all(&self, filter: &RecordFilter) -> Result<Vec<CollectionRecord>, DbErr> {
        let rows = filtered(filter).all(&self.db).await?;
        debug!(count = rows.len(), ?filter, "Fetched collection records");
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
    ) -> Result<PageResponse<CollectionRecord>, DbErr> {
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
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CollectionRecord>, DbErr> {
        let Some(row) = collection_records::Entity::find_by_id(id)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        Ok(self.with_names(vec![row]).await?.pop())
    }

    async fn ensure_references(&self, input: &CollectionRecordInput) -> Result<(), RepositoryError> {
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
        input: CollectionRecordInput,
        created_by: Option<Uuid>,
    ) -> Result<CollectionRecord, RepositoryError> {
        self.ensure_references(&input).await?;

        let now = chrono::Utc::now().into();
        let model = collection_records::ActiveModel {
            id: Set(Uuid::now_v7()),
            representative_id: Set(input.representative_id),
            company_id: Set(input.company_id),
            amount: Set(input.amount),
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
        input: CollectionRecordInput,
    ) -> Result<CollectionRecord, RepositoryError> {
        let existing = collection_records::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("collection record", id))?;
        self.ensure_references(&input).await?;

        let mut model = existing.into_active_model();
        model.representative_id = Set(input.representative_id);
        model.company_id = Set(input.company_id);
        model.amount = Set(input.amount);
        model.year = Set(input.year);
        model.month = Set(input.month);
        model.updated_at = Set(chrono::Utc::now().into());

        let row = model.update(&self.db).await?;
        let mut records = self.with_names(vec![row]).await?;
        records
            .pop()
            .ok_or_else(|| RepositoryError::not_found("collection record", id))
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown ID.
    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = collection_records::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("collection record", id));
        }
        Ok(())
    }
}

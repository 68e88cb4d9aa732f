//! Company repository.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::error::RepositoryError;
use crate::entities::companies;

/// Input for creating a company.
#[derive(Debug, Clone)]
pub struct CreateCompanyInput {
    /// Company name.
    pub name: String,
    /// Short unique code.
    pub code: String,
}

/// Input for updating a company. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCompanyInput {
    /// Company name.
    pub name: Option<String>,
    /// Short unique code.
    pub code: Option<String>,
    /// Active flag.
    pub is_active: Option<bool>,
}

/// Company repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    db: DatabaseConnection,
}

impl CompanyRepository {
    /// Creates a new company repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists companies by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, include_inactive: bool) -> Result<Vec<companies::Model>, DbErr> {
        let mut query = companies::Entity::find();
        if !include_inactive {
            query = query.filter(companies::Column::IsActive.eq(true));
        }
        query
            .order_by_asc(companies::Column::Name)
            .all(&self.db)
            .await
    }

    /// Finds a company by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<companies::Model>, DbErr> {
        companies::Entity::find_by_id(id).one(&self.db).await
    }

    /// Returns names for the given IDs. Unknown IDs are absent from the map.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn names_by_ids(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = companies::Entity::find()
            .filter(companies::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|c| (c.id, c.name)).collect())
    }

    async fn code_taken(&self, code: &str, except: Option<Uuid>) -> Result<bool, DbErr> {
        let mut query = companies::Entity::find().filter(companies::Column::Code.eq(code));
        if let Some(id) = except {
            query = query.filter(companies::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    /// Creates a company.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` if the code is taken.
    pub async fn create(
        &self,
        input: CreateCompanyInput,
    ) -> Result<companies::Model, RepositoryError> {
        if self.code_taken(&input.code, None).await? {
            return Err(RepositoryError::Duplicate(format!("company code '{}'", input.code)));
        }

        let now = chrono::Utc::now().into();
        let code = input.code.clone();
        let model = companies::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            code: Set(input.code),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| RepositoryError::from_write(e, || format!("company code '{code}'")))
    }

    /// Updates a company.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown ID and `Duplicate` if the new code is taken.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateCompanyInput,
    ) -> Result<companies::Model, RepositoryError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("company", id))?;

        if let Some(code) = &input.code
            && self.code_taken(code, Some(id)).await?
        {
            return Err(RepositoryError::Duplicate(format!("company code '{code}'")));
        }

        let mut model = existing.into_active_model();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(code) = input.code {
            model.code = Set(code);
        }
        if let Some(is_active) = input.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_at = Set(chrono::Utc::now().into());

        Ok(model.update(&self.db).await?)
    }

    /// Marks a company inactive.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no company has this ID.
    pub async fn deactivate(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.update(
            id,
            UpdateCompanyInput {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await?;
        Ok(())
    }
}

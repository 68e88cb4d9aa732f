//! Representative repository.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::error::RepositoryError;
use crate::entities::representatives;

/// Input for creating a representative.
#[derive(Debug, Clone)]
pub struct CreateRepresentativeInput {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
}

/// Input for updating a representative. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateRepresentativeInput {
    /// Full name.
    pub name: Option<String>,
    /// Contact email; `Some(None)` clears it.
    pub email: Option<Option<String>>,
    /// Contact phone; `Some(None)` clears it.
    pub phone: Option<Option<String>>,
    /// Active flag.
    pub is_active: Option<bool>,
}

/// Representative repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct RepresentativeRepository {
    db: DatabaseConnection,
}

impl RepresentativeRepository {
    /// Creates a new representative repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists representatives by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<representatives::Model>, DbErr> {
        let mut query = representatives::Entity::find();
        if !include_inactive {
            query = query.filter(representatives::Column::IsActive.eq(true));
        }
        query
            .order_by_asc(representatives::Column::Name)
            .all(&self.db)
            .await
    }

    /// Finds a representative by ID, active or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<representatives::Model>, DbErr> {
        representatives::Entity::find_by_id(id).one(&self.db).await
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

        let rows = representatives::Entity::find()
            .filter(representatives::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|r| (r.id, r.name)).collect())
    }

    /// Creates a representative.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        input: CreateRepresentativeInput,
    ) -> Result<representatives::Model, RepositoryError> {
        let now = chrono::Utc::now().into();
        let model = representatives::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(model.insert(&self.db).await?)
    }

    /// Updates a representative.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no representative has this ID.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateRepresentativeInput,
    ) -> Result<representatives::Model, RepositoryError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("representative", id))?;

        let mut model = existing.into_active_model();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(email) = input.email {
            model.email = Set(email);
        }
        if let Some(phone) = input.phone {
            model.phone = Set(phone);
        }
        if let Some(is_active) = input.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_at = Set(chrono::Utc::now().into());

        Ok(model.update(&self.db).await?)
    }

    /// Marks a representative inactive. Their records stay in reports.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no representative has this ID.
    pub async fn deactivate(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.update(
            id,
            UpdateRepresentativeInput {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await?;
        Ok(())
    }
}

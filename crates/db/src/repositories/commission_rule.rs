//! Commission rule repository.

use komisi_core::commission::{CommissionRule, CommissionRuleInput};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::error::RepositoryError;
use crate::entities::commission_rules;

/// Commission rule repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CommissionRuleRepository {
    db: DatabaseConnection,
}

impl CommissionRuleRepository {
    /// Creates a new commission rule repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Every rule, oldest first. This is the fetch order the rule book's
    /// first-match lookup depends on.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<CommissionRule>, DbErr> {
        let rows = commission_rules::Entity::find()
            .order_by_asc(commission_rules::Column::CreatedAt)
            .order_by_asc(commission_rules::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(CommissionRule::from).collect())
    }

    /// Finds a rule by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CommissionRule>, DbErr> {
        Ok(commission_rules::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(CommissionRule::from))
    }

    async fn category_taken(&self, category: &str, except: Option<Uuid>) -> Result<bool, DbErr> {
        let mut query = commission_rules::Entity::find()
            .filter(commission_rules::Column::Category.eq(category));
        if let Some(id) = except {
            query = query.filter(commission_rules::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    /// Creates a rule. The input must already be validated.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` if a rule exists for the category.
    pub async fn create(&self, input: CommissionRuleInput) -> Result<CommissionRule, RepositoryError> {
        if self.category_taken(&input.category, None).await? {
            return Err(duplicate_category(&input.category));
        }

        let now = chrono::Utc::now().into();
        let category = input.category.clone();
        let mut model = commission_rules::ActiveModel {
            id: Set(Uuid::now_v7()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply_input(&mut model, input);

        model
            .insert(&self.db)
            .await
            .map(CommissionRule::from)
            .map_err(|e| RepositoryError::from_write(e, || format!("category '{category}'")))
    }

    /// Replaces a rule's fields. The input must already be validated.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown ID and `Duplicate` if another rule
    /// owns the category.
    pub async fn update(
        &self,
        id: Uuid,
        input: CommissionRuleInput,
    ) -> Result<CommissionRule, RepositoryError> {
        let existing = commission_rules::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("commission rule", id))?;

        if self.category_taken(&input.category, Some(id)).await? {
            return Err(duplicate_category(&input.category));
        }

        let mut model = existing.into_active_model();
        apply_input(&mut model, input);
        model.updated_at = Set(chrono::Utc::now().into());

        Ok(model.update(&self.db).await.map(CommissionRule::from)?)
    }

    /// Deletes a rule. Sales in its category then earn no commission.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown ID.
    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = commission_rules::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("commission rule", id));
        }
        Ok(())
    }
}

fn duplicate_category(category: &str) -> RepositoryError {
    RepositoryError::Duplicate(format!("commission rule for category '{category}'"))
}

fn apply_input(model: &mut commission_rules::ActiveModel, input: CommissionRuleInput) {
    model.category = Set(input.category);
    model.tier1_from = Set(input.tier1_from);
    model.tier1_to = Set(input.tier1_to);
    model.tier1_rate = Set(input.tier1_rate);
    model.tier2_from = Set(input.tier2_from);
    model.tier2_to = Set(input.tier2_to);
    model.tier2_rate = Set(input.tier2_rate);
    model.tier3_from = Set(input.tier3_from);
    model.tier3_rate = Set(input.tier3_rate);
}

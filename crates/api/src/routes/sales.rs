//! Monthly sales record routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use komisi_core::auth::UserRole;
use komisi_core::commission::{SalesRecord, validate_non_negative, validate_period};
use komisi_db::repositories::{SalesRecordInput, SalesRecordRepository};
use komisi_shared::AppError;
use komisi_shared::types::PageResponse;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::RecordQuery;
use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;

/// Creates the sales routes (auth applied by the caller).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(list_sales).post(create_sale))
        .route(
            "/sales/{id}",
            get(get_sale).patch(update_sale).delete(delete_sale),
        )
}

/// Body of `POST /sales`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSaleRequest {
    /// Representative credited.
    pub representative_id: Uuid,
    /// Buying company.
    pub company_id: Uuid,
    /// Sales category; matched to a commission rule by exact name.
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    /// Sales amount.
    pub sales: Decimal,
    /// Target amount.
    pub target: Decimal,
    /// Year.
    pub year: i32,
    /// Month (1-12).
    pub month: i32,
}

/// Body of `PATCH /sales/{id}`. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSaleRequest {
    /// Representative credited.
    pub representative_id: Option<Uuid>,
    /// Buying company.
    pub company_id: Option<Uuid>,
    /// Sales category.
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    /// Sales amount.
    pub sales: Option<Decimal>,
    /// Target amount.
    pub target: Option<Decimal>,
    /// Year.
    pub year: Option<i32>,
    /// Month (1-12).
    pub month: Option<i32>,
}

impl From<CreateSaleRequest> for SalesRecordInput {
    fn from(req: CreateSaleRequest) -> Self {
        Self {
            representative_id: req.representative_id,
            company_id: req.company_id,
            category: req.category,
            sales: req.sales,
            target: req.target,
            year: req.year,
            month: req.month,
        }
    }
}

impl UpdateSaleRequest {
    fn merge_into(self, mut input: SalesRecordInput) -> SalesRecordInput {
        if let Some(v) = self.representative_id {
            input.representative_id = v;
        }
        if let Some(v) = self.company_id {
            input.company_id = v;
        }
        if let Some(v) = self.category {
            input.category = v;
        }
        if let Some(v) = self.sales {
            input.sales = v;
        }
        if let Some(v) = self.target {
            input.target = v;
        }
        if let Some(v) = self.year {
            input.year = v;
        }
        if let Some(v) = self.month {
            input.month = v;
        }
        input
    }
}

fn check(input: &SalesRecordInput) -> Result<(), ApiError> {
    validate_period(input.year, input.month)?;
    validate_non_negative("sales", input.sales)?;
    validate_non_negative("target", input.target)?;
    Ok(())
}

fn repo(state: &AppState) -> SalesRecordRepository {
    SalesRecordRepository::new((*state.db).clone())
}

/// GET /sales - Newest period first.
async fn list_sales(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<RecordQuery>,
) -> ApiResult<Json<PageResponse<SalesRecord>>> {
    Ok(Json(repo(&state).list(&query.filter(), query.page()).await?))
}

/// GET /sales/{id}
async fn get_sale(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SalesRecord>> {
    repo(&state)
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("sales record {id}")).into())
}

/// POST /sales
async fn create_sale(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateSaleRequest>,
) -> ApiResult<(StatusCode, Json<SalesRecord>)> {
    auth.require(UserRole::can_enter_data, "enter sales records")?;
    payload.validate()?;
    let input = SalesRecordInput::from(payload);
    check(&input)?;

    let record = repo(&state).create(input, Some(auth.user_id())).await?;

    info!(
        sales_record_id = %record.id,
        representative_id = %record.representative_id,
        category = %record.category,
        year = record.year,
        month = record.month,
        "Sales record created"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// PATCH /sales/{id}
async fn update_sale(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSaleRequest>,
) -> ApiResult<Json<SalesRecord>> {
    auth.require(UserRole::can_enter_data, "update sales records")?;
    payload.validate()?;

    let repo = repo(&state);
    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("sales record {id}")))?;
    let input = payload.merge_into(SalesRecordInput::from(&existing));
    check(&input)?;

    let record = repo.update(id, input).await?;

    info!(sales_record_id = %id, updated_by = %auth.user_id(), "Sales record updated");
    Ok(Json(record))
}

/// DELETE /sales/{id}
async fn delete_sale(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    auth.require(UserRole::can_enter_data, "delete sales records")?;
    repo(&state).delete(id).await?;

    info!(sales_record_id = %id, deleted_by = %auth.user_id(), "Sales record deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn stored() -> SalesRecordInput {
        SalesRecordInput {
            representative_id: Uuid::nil(),
            company_id: Uuid::nil(),
            category: "Widgets".to_string(),
            sales: dec!(1000),
            target: dec!(800),
            year: 2025,
            month: 3,
        }
    }

    #[test]
    fn test_patch_keeps_absent_fields() {
        let patch = UpdateSaleRequest {
            sales: Some(dec!(1200)),
            month: Some(4),
            ..Default::default()
        };

        let merged = patch.merge_into(stored());
        assert_eq!(merged.sales, dec!(1200));
        assert_eq!(merged.month, 4);
        assert_eq!(merged.target, dec!(800));
        assert_eq!(merged.category, "Widgets");
    }

    #[test]
    fn test_check_rejects_bad_period_and_negatives() {
        assert!(check(&stored()).is_ok());

        let bad_month = UpdateSaleRequest {
            month: Some(13),
            ..Default::default()
        }
        .merge_into(stored());
        assert_eq!(check(&bad_month).unwrap_err().0.status_code(), 400);

        let negative = UpdateSaleRequest {
            target: Some(dec!(-1)),
            ..Default::default()
        }
        .merge_into(stored());
        assert!(check(&negative).is_err());
    }
}

//! Collection (payments received) routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use komisi_core::auth::UserRole;
use komisi_core::commission::{CollectionRecord, validate_non_negative, validate_period};
use komisi_db::repositories::{CollectionRecordInput, CollectionRecordRepository};
use komisi_shared::AppError;
use komisi_shared::types::PageResponse;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::RecordQuery;
use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;

/// Creates the collection routes (auth applied by the caller).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/collections", get(list_collections).post(create_collection))
        .route(
            "/collections/{id}",
            get(get_collection)
                .patch(update_collection)
                .delete(delete_collection),
        )
}

/// Body of `POST /collections`.
#[derive(Debug, Deserialize)]
pub struct CreateCollectionRequest {
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

/// Body of `PATCH /collections/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCollectionRequest {
    /// Representative credited.
    pub representative_id: Option<Uuid>,
    /// Paying company.
    pub company_id: Option<Uuid>,
    /// Amount collected.
    pub amount: Option<Decimal>,
    /// Year.
    pub year: Option<i32>,
    /// Month (1-12).
    pub month: Option<i32>,
}

impl From<CreateCollectionRequest> for CollectionRecordInput {
    fn from(req: CreateCollectionRequest) -> Self {
        Self {
            representative_id: req.representative_id,
            company_id: req.company_id,
            amount: req.amount,
            year: req.year,
            month: req.month,
        }
    }
}

impl UpdateCollectionRequest {
    fn merge_into(self, input: CollectionRecordInput) -> CollectionRecordInput {
        CollectionRecordInput {
            representative_id: self.representative_id.unwrap_or(input.representative_id),
            company_id: self.company_id.unwrap_or(input.company_id),
            amount: self.amount.unwrap_or(input.amount),
            year: self.year.unwrap_or(input.year),
            month: self.month.unwrap_or(input.month),
        }
    }
}

fn check(input: &CollectionRecordInput) -> Result<(), ApiError> {
    validate_period(input.year, input.month)?;
    validate_non_negative("amount", input.amount)?;
    Ok(())
}

fn repo(state: &AppState) -> CollectionRecordRepository {
    CollectionRecordRepository::new((*state.db).clone())
}

async fn list_collections(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<RecordQuery>,
) -> ApiResult<Json<PageResponse<CollectionRecord>>> {
    Ok(Json(repo(&state).list(&query.filter(), query.page()).await?))
}

async fn get_collection(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CollectionRecord>> {
    repo(&state)
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("collection record {id}")).into())
}

async fn create_collection(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateCollectionRequest>,
) -> ApiResult<(StatusCode, Json<CollectionRecord>)> {
    auth.require(UserRole::can_enter_data, "enter collection records")?;
    let input = CollectionRecordInput::from(payload);
    check(&input)?;

    let record = repo(&state).create(input, Some(auth.user_id())).await?;

    info!(
        collection_record_id = %record.id,
        representative_id = %record.representative_id,
        amount = %record.amount,
        "Collection record created"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_collection(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCollectionRequest>,
) -> ApiResult<Json<CollectionRecord>> {
    auth.require(UserRole::can_enter_data, "update collection records")?;

    let repo = repo(&state);
    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("collection record {id}")))?;
    let input = payload.merge_into(CollectionRecordInput::from(&existing));
    check(&input)?;

    let record = repo.update(id, input).await?;

    info!(collection_record_id = %id, updated_by = %auth.user_id(), "Collection record updated");
    Ok(Json(record))
}

async fn delete_collection(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    auth.require(UserRole::can_enter_data, "delete collection records")?;
    repo(&state).delete(id).await?;

    info!(collection_record_id = %id, deleted_by = %auth.user_id(), "Collection record deleted");
    Ok(StatusCode::NO_CONTENT)
}

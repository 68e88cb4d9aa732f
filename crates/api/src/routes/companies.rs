//! Customer company directory routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use komisi_core::auth::UserRole;
use komisi_db::entities::companies;
use komisi_db::repositories::{CompanyRepository, CreateCompanyInput, UpdateCompanyInput};
use komisi_shared::AppError;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::ListQuery;
use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::AuthUser;

/// Creates the company routes (auth applied by the caller).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route(
            "/companies/{id}",
            get(get_company).patch(update_company).delete(delete_company),
        )
}

/// Body of `POST /companies`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Unique short code.
    #[validate(length(min = 1, max = 50))]
    pub code: String,
}

/// Body of `PATCH /companies/{id}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    /// Unique short code.
    #[validate(length(min = 1, max = 50))]
    pub code: Option<String>,
    /// Reactivate or deactivate.
    pub is_active: Option<bool>,
}

fn repo(state: &AppState) -> CompanyRepository {
    CompanyRepository::new((*state.db).clone())
}

async fn list_companies(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<companies::Model>>> {
    Ok(Json(repo(&state).list(query.include_inactive).await?))
}

async fn get_company(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<companies::Model>> {
    repo(&state)
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("company {id}")).into())
}

async fn create_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateCompanyRequest>,
) -> ApiResult<(StatusCode, Json<companies::Model>)> {
    auth.require(UserRole::can_enter_data, "create companies")?;
    payload.validate()?;

    let created = repo(&state)
        .create(CreateCompanyInput {
            name: payload.name,
            code: payload.code,
        })
        .await?;

    info!(company_id = %created.id, code = %created.code, "Company created");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCompanyRequest>,
) -> ApiResult<Json<companies::Model>> {
    auth.require(UserRole::can_enter_data, "update companies")?;
    payload.validate()?;

    let updated = repo(&state)
        .update(
            id,
            UpdateCompanyInput {
                name: payload.name,
                code: payload.code,
                is_active: payload.is_active,
            },
        )
        .await?;

    info!(company_id = %id, "Company updated");
    Ok(Json(updated))
}

/// Soft delete.
async fn delete_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    auth.require(UserRole::can_enter_data, "delete companies")?;
    repo(&state).deactivate(id).await?;

    info!(company_id = %id, deleted_by = %auth.user_id(), "Company deactivated");
    Ok(StatusCode::NO_CONTENT)
}

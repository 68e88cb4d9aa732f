//! Sales representative directory routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use komisi_core::auth::UserRole;
use komisi_db::entities::representatives;
use komisi_db::repositories::{
    CreateRepresentativeInput, RepresentativeRepository, UpdateRepresentativeInput,
};
use komisi_shared::AppError;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::{ListQuery, double_option};
use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::AuthUser;

/// Creates the representative routes (auth applied by the caller).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/representatives",
            get(list_representatives).post(create_representative),
        )
        .route(
            "/representatives/{id}",
            get(get_representative)
                .patch(update_representative)
                .delete(delete_representative),
        )
}

/// Body of `POST /representatives`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRepresentativeRequest {
    /// Full name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Contact email.
    #[validate(email)]
    pub email: Option<String>,
    /// Contact phone.
    #[validate(length(max = 50))]
    pub phone: Option<String>,
}

/// Body of `PATCH /representatives/{id}`. `null` clears email or phone.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateRepresentativeRequest {
    /// Full name.
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    /// Contact email.
    #[serde(default, deserialize_with = "double_option")]
    #[validate(email)]
    pub email: Option<Option<String>>,
    /// Contact phone.
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 50))]
    pub phone: Option<Option<String>>,
    /// Reactivate or deactivate.
    pub is_active: Option<bool>,
}

fn repo(state: &AppState) -> RepresentativeRepository {
    RepresentativeRepository::new((*state.db).clone())
}

/// GET /representatives
async fn list_representatives(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<representatives::Model>>> {
    Ok(Json(repo(&state).list(query.include_inactive).await?))
}

/// GET /representatives/{id}
async fn get_representative(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<representatives::Model>> {
    repo(&state)
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("representative {id}")).into())
}

/// POST /representatives
async fn create_representative(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateRepresentativeRequest>,
) -> ApiResult<(StatusCode, Json<representatives::Model>)> {
    auth.require(UserRole::can_enter_data, "create representatives")?;
    payload.validate()?;

    let created = repo(&state)
        .create(CreateRepresentativeInput {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
        })
        .await?;

    info!(representative_id = %created.id, created_by = %auth.user_id(), "Representative created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /representatives/{id}
async fn update_representative(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRepresentativeRequest>,
) -> ApiResult<Json<representatives::Model>> {
    auth.require(UserRole::can_enter_data, "update representatives")?;
    payload.validate()?;

    let updated = repo(&state)
        .update(
            id,
            UpdateRepresentativeInput {
                name: payload.name,
                email: payload.email,
                phone: payload.phone,
                is_active: payload.is_active,
            },
        )
        .await?;

    info!(representative_id = %id, updated_by = %auth.user_id(), "Representative updated");
    Ok(Json(updated))
}

/// DELETE /representatives/{id} - Deactivates; history stays in reports.
async fn delete_representative(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    auth.require(UserRole::can_enter_data, "delete representatives")?;
    repo(&state).deactivate(id).await?;

    info!(representative_id = %id, deleted_by = %auth.user_id(), "Representative deactivated");
    Ok(StatusCode::NO_CONTENT)
}

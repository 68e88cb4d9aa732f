//! Commission preview route.

use axum::{Json, Router, extract::State, routing::post};
use komisi_core::commission::{CommissionPreview, CommissionService, validate_non_negative};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::AuthUser;

/// Creates the commission routes (auth applied by the caller).
pub fn routes() -> Router<AppState> {
    Router::new().route("/commission/calculate", post(calculate))
}

/// Body of `POST /commission/calculate`.
#[derive(Debug, Deserialize, Validate)]
pub struct CalculateRequest {
    /// Category whose rule applies.
    #[validate(length(min = 1))]
    pub category: String,
    /// Sales amount.
    pub sales: Decimal,
    /// Target amount.
    pub target: Decimal,
}

/// POST /commission/calculate - What a sale would earn under the current rules.
///
/// Nothing is stored. A category without a rule previews as zero.
async fn calculate(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<CalculateRequest>,
) -> ApiResult<Json<CommissionPreview>> {
    payload.validate()?;
    validate_non_negative("sales", payload.sales)?;
    validate_non_negative("target", payload.target)?;

    let preview = CommissionService::new(state.data_source.clone())
        .preview(&payload.category, payload.sales, payload.target)
        .await?;

    Ok(Json(preview))
}

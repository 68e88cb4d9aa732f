//! Commission rule routes.
//!
//! Reads are open to every authenticated role; writes need
//! [`UserRole::can_manage_rules`]. Every write is checked with
//! [`validate_rule`] before it reaches the store.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use komisi_core::auth::UserRole;
use komisi_core::commission::{CommissionRule, CommissionRuleInput, validate_rule};
use komisi_db::repositories::CommissionRuleRepository;
use komisi_shared::AppError;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::AuthUser;

/// Creates the commission rule routes (auth applied by the caller).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/commission-rules", get(list_rules).post(create_rule))
        .route(
            "/commission-rules/{id}",
            get(get_rule).patch(update_rule).delete(delete_rule),
        )
}

/// Body of `PATCH /commission-rules/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRuleRequest {
    /// Sales category.
    pub category: Option<String>,
    /// Lower achievement bound of tier 1.
    pub tier1_from: Option<Decimal>,
    /// Upper achievement bound of tier 1.
    pub tier1_to: Option<Decimal>,
    /// Tier 1 rate.
    pub tier1_rate: Option<Decimal>,
    /// Lower achievement bound of tier 2.
    pub tier2_from: Option<Decimal>,
    /// Upper achievement bound of tier 2.
    pub tier2_to: Option<Decimal>,
    /// Tier 2 rate.
    pub tier2_rate: Option<Decimal>,
    /// Lower achievement bound of tier 3.
    pub tier3_from: Option<Decimal>,
    /// Tier 3 rate.
    pub tier3_rate: Option<Decimal>,
}

impl UpdateRuleRequest {
    fn merge_into(self, input: CommissionRuleInput) -> CommissionRuleInput {
        CommissionRuleInput {
            category: self.category.unwrap_or(input.category),
            tier1_from: self.tier1_from.unwrap_or(input.tier1_from),
            tier1_to: self.tier1_to.unwrap_or(input.tier1_to),
            tier1_rate: self.tier1_rate.unwrap_or(input.tier1_rate),
            tier2_from: self.tier2_from.unwrap_or(input.tier2_from),
            tier2_to: self.tier2_to.unwrap_or(input.tier2_to),
            tier2_rate: self.tier2_rate.unwrap_or(input.tier2_rate),
            tier3_from: self.tier3_from.unwrap_or(input.tier3_from),
            tier3_rate: self.tier3_rate.unwrap_or(input.tier3_rate),
        }
    }
}

fn repo(state: &AppState) -> CommissionRuleRepository {
    CommissionRuleRepository::new((*state.db).clone())
}

async fn list_rules(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<CommissionRule>>> {
    Ok(Json(repo(&state).list_all().await?))
}

async fn get_rule(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CommissionRule>> {
    repo(&state)
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("commission rule {id}")).into())
}

async fn create_rule(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut payload): Json<CommissionRuleInput>,
) -> ApiResult<(StatusCode, Json<CommissionRule>)> {
    auth.require(UserRole::can_manage_rules, "manage commission rules")?;
    payload.category = payload.category.trim().to_string();
    validate_rule(&payload)?;

    let rule = repo(&state).create(payload).await?;

    info!(rule_id = %rule.id, category = %rule.category, created_by = %auth.user_id(), "Commission rule created");
    Ok((StatusCode::CREATED, Json(rule)))
}

async fn update_rule(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRuleRequest>,
) -> ApiResult<Json<CommissionRule>> {
    auth.require(UserRole::can_manage_rules, "manage commission rules")?;

    let repo = repo(&state);
    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("commission rule {id}")))?;
    let mut input = payload.merge_into(CommissionRuleInput::from(&existing));
    input.category = input.category.trim().to_string();
    validate_rule(&input)?;

    let rule = repo.update(id, input).await?;

    info!(rule_id = %id, category = %rule.category, updated_by = %auth.user_id(), "Commission rule updated");
    Ok(Json(rule))
}

/// Sales in the category earn nothing until a new rule is added.
async fn delete_rule(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    auth.require(UserRole::can_manage_rules, "manage commission rules")?;
    repo(&state).delete(id).await?;

    info!(rule_id = %id, deleted_by = %auth.user_id(), "Commission rule deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_patch_overrides_only_given_fields() {
        let existing = CommissionRuleInput {
            category: "Widgets".to_string(),
            tier1_from: dec!(0),
            tier1_to: dec!(70),
            tier1_rate: dec!(0.0025),
            tier2_from: dec!(71),
            tier2_to: dec!(100),
            tier2_rate: dec!(0.003),
            tier3_from: dec!(101),
            tier3_rate: dec!(0.004),
        };
        let patch: UpdateRuleRequest =
            serde_json::from_str(r#"{"tier3_rate": 0.005}"#).unwrap();

        let merged = patch.merge_into(existing.clone());
        assert_eq!(merged.tier3_rate, dec!(0.005));
        assert_eq!(
            CommissionRuleInput {
                tier3_rate: existing.tier3_rate,
                ..merged
            },
            existing
        );
    }
}

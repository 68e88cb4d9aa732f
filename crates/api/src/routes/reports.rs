//! Commission report routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use komisi_core::auth::UserRole;
use komisi_core::commission::validate_period;
use komisi_core::commission::validation::MIN_YEAR;
use komisi_core::reports::{FullReport, ReportBuilder, RepresentativeReport};
use komisi_shared::types::RepresentativeId;

use super::PeriodQuery;
use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;

/// Creates the report routes (auth applied by the caller).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reports/representatives/{id}",
            get(get_representative_report),
        )
        .route("/reports/full", get(get_full_report))
}

/// Rejects a month outside 1-12 or a year outside the accepted range.
///
/// Either filter may be omitted.
fn check_period(query: &PeriodQuery) -> Result<(), ApiError> {
    match (query.year, query.month) {
        (Some(year), Some(month)) => validate_period(year, month)?,
        (Some(year), None) => validate_period(year, 1)?,
        (None, Some(month)) => validate_period(MIN_YEAR, month)?,
        (None, None) => {}
    }
    Ok(())
}

/// GET /reports/representatives/{id}?year&month
///
/// An unknown representative yields an empty report.
async fn get_representative_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<RepresentativeId>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<RepresentativeReport>> {
    auth.require(UserRole::can_view_reports, "view reports")?;
    check_period(&query)?;

    let report = ReportBuilder::new(state.data_source.clone())
        .representative_report(id, query.year, query.month)
        .await?;

    Ok(Json(report))
}

/// GET /reports/full?year&month
async fn get_full_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<FullReport>> {
    auth.require(UserRole::can_view_reports, "view reports")?;
    check_period(&query)?;

    let report = ReportBuilder::new(state.data_source.clone())
        .full_report(query.year, query.month)
        .await?;

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, true)]
    #[case(Some(2025), None, true)]
    #[case(None, Some(12), true)]
    #[case(Some(2025), Some(6), true)]
    #[case(None, Some(0), false)]
    #[case(Some(1999), None, false)]
    #[case(Some(2025), Some(13), false)]
    fn test_check_period(#[case] year: Option<i32>, #[case] month: Option<i32>, #[case] ok: bool) {
        assert_eq!(check_period(&PeriodQuery { year, month }).is_ok(), ok);
    }
}

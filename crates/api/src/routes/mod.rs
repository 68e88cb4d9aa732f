//! API route definitions.

use axum::{Router, middleware};
use komisi_core::commission::RecordFilter;
use komisi_shared::types::{CompanyId, PageRequest, RepresentativeId};
use serde::{Deserialize, Deserializer};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod auth;
pub mod collections;
pub mod commission;
pub mod commission_rules;
pub mod companies;
pub mod health;
pub mod reports;
pub mod representatives;
pub mod sales;

/// Creates the API router, guarding everything but health and login.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(representatives::routes())
        .merge(companies::routes())
        .merge(sales::routes())
        .merge(collections::routes())
        .merge(commission_rules::routes())
        .merge(commission::routes())
        .merge(reports::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

/// `?include_inactive=true` on directory listings.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Include deactivated entries.
    #[serde(default)]
    pub include_inactive: bool,
}

/// `?year&month` on report routes.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    /// Year filter.
    pub year: Option<i32>,
    /// Month filter (1-12).
    pub month: Option<i32>,
}

/// List filters shared by `/sales` and `/collections`.
#[derive(Debug, Default, Deserialize)]
pub struct RecordQuery {
    /// Only this representative.
    pub representative_id: Option<RepresentativeId>,
    /// Only this company.
    pub company_id: Option<CompanyId>,
    /// Only this year.
    pub year: Option<i32>,
    /// Only this month.
    pub month: Option<i32>,
    /// Page number, from 1.
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

impl RecordQuery {
    /// Splits the query into the store filter and the page.
    #[must_use]
    pub const fn filter(&self) -> RecordFilter {
        RecordFilter {
            representative_id: self.representative_id,
            company_id: self.company_id,
            year: self.year,
            month: self.month,
        }
    }

    /// Requested page, clamped.
    #[must_use]
    pub fn page(&self) -> PageRequest {
        PageRequest::from_query(self.page, self.per_page)
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

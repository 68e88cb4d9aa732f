//! Error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use komisi_core::commission::{RecordValidationError, RuleValidationError};
use komisi_core::reports::ReportError;
use komisi_db::RepositoryError;
use komisi_shared::AppError;
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;
use validator::ValidationErrors;

/// Handler error rendered as `{"error": code, "message": text}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.public_message(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        Self(err.into())
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::DataStore(err.to_string()))
    }
}

impl From<ReportError<DbErr>> for ApiError {
    fn from(err: ReportError<DbErr>) -> Self {
        err.into_source().into()
    }
}

impl From<RuleValidationError> for ApiError {
    fn from(err: RuleValidationError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<RecordValidationError> for ApiError {
    fn from(err: RecordValidationError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

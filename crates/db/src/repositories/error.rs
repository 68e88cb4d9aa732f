//! Repository error type shared by every repository in this crate.

use komisi_shared::AppError;
use sea_orm::{DbErr, SqlErr};
use uuid::Uuid;

/// Error types for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// No row with this ID.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity name, e.g. `representative`.
        entity: &'static str,
        /// Requested ID.
        id: Uuid,
    },

    /// A unique column already holds this value.
    #[error("{0} already exists")]
    Duplicate(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl RepositoryError {
    /// Shorthand for [`RepositoryError::NotFound`].
    #[must_use]
    pub const fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Maps a unique-constraint violation to `Duplicate`, anything else to `Database`.
    ///
    /// Covers the race where a concurrent insert wins after the existence check.
    pub(crate) fn from_write(err: DbErr, what: impl FnOnce() -> String) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Duplicate(what()),
            _ => Self::Database(err),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => Self::NotFound(err.to_string()),
            RepositoryError::Duplicate(_) => Self::Conflict(err.to_string()),
            RepositoryError::Database(e) => Self::DataStore(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_to_app_error() {
        let id = Uuid::nil();

        let not_found: AppError = RepositoryError::not_found("company", id).into();
        assert_eq!(not_found.status_code(), 404);
        assert!(not_found.to_string().contains("company not found"));

        let duplicate: AppError = RepositoryError::Duplicate("category 'pharma'".into()).into();
        assert_eq!(duplicate.status_code(), 409);

        let db: AppError = RepositoryError::Database(DbErr::Custom("down".into())).into();
        assert_eq!(db.status_code(), 500);
        assert_eq!(db.error_code(), "data_store_error");
    }

    #[test]
    fn test_non_unique_write_error_stays_database() {
        let err = RepositoryError::from_write(DbErr::Custom("boom".into()), || "x".into());
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}

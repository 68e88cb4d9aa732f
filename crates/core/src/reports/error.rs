//! Report error types.

use thiserror::Error;

/// Errors that can occur during report generation.
///
/// The only failure is the data source's own; it is carried unchanged so the
/// caller can map it. There are no partial reports.
#[derive(Debug, Error)]
pub enum ReportError<E> {
    /// Fetching sales, collections or rules failed.
    #[error(transparent)]
    DataSource(#[from] E),
}

impl<E> ReportError<E> {
    /// Returns the underlying data source error.
    #[must_use]
    pub fn into_source(self) -> E {
        match self {
            Self::DataSource(e) => e,
        }
    }
}

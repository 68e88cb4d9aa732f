//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repositories for users, representatives, companies, rules and records
//! - [`SeaOrmDataSource`], the report data source
//! - Database migrations

pub mod data_source;
pub mod entities;
pub mod mapping;
pub mod migration;
pub mod repositories;

pub use data_source::SeaOrmDataSource;
pub use repositories::{RepositoryError, UserRepository};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection pool.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    min_connections: u32,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options
        .max_connections(max_connections)
        .min_connections(min_connections)
        .sqlx_logging(false);
    Database::connect(options).await
}

//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST routes for representatives, companies, records and rules
//! - Commission preview and report routes
//! - JWT authentication middleware and role checks
//! - JSON error responses

pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use komisi_db::SeaOrmDataSource;
use komisi_shared::JwtService;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Report and preview data source over the same pool.
    pub data_source: Arc<SeaOrmDataSource>,
}

impl AppState {
    /// Builds the state around a connection pool.
    #[must_use]
    pub fn new(db: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self {
            data_source: Arc::new(SeaOrmDataSource::new(db.clone())),
            db: Arc::new(db),
            jwt_service: Arc::new(jwt_service),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub mod commission;
pub mod health;
pub mod rates;

use crate::domain::RateTable;
use crate::error::AppError;
use axum::http::Uri;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RateTable>,
}

impl AppState {
    pub fn new(table: Arc<RateTable>) -> Self {
        Self { table }
    }

    /// State serving the built-in rate schedule.
    pub fn with_standard_rates() -> Self {
        Self::new(Arc::new(RateTable::standard().clone()))
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/rates", get(rates::get_rates))
        .route("/v1/commission", get(commission::get_commission))
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::outreach::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/company-info", post(handlers::handle_company_info))
        .route("/api/v1/contacts/resolve", post(handlers::handle_resolve))
        .with_state(state)
}

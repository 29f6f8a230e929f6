//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::routes::{conversion, dashboard, prediction, product, user_insight};

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Read-only API consumed by a browser dashboard on another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::service_info))
        .route("/health", get(handlers::health_check))
        .route(dashboard::GET_DASHBOARD_DATA, get(handlers::get_dashboard))
        .route(conversion::GET_CONVERSION_DATA, get(handlers::get_conversion))
        .route(product::GET_PRODUCT_DATA, get(handlers::get_product))
        .route(user_insight::GET_USER_INSIGHT_DATA, get(handlers::get_user_insight))
        .route(prediction::GET_PREDICTION_DATA, get(handlers::get_prediction))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

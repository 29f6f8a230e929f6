//! HTTP handlers for the REST API.
//!
//! Each data handler seeds a fresh random source from the state, runs the
//! matching route function on the blocking pool and wraps the result in the
//! response envelope.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use super::dto::{
    ApiResponse, ConversionData, DashboardData, DashboardQuery, HealthResponse, PredictionData,
    ProductData, ServiceInfo, UserInsightData,
};
use super::error::AppError;
use super::state::AppState;
use crate::error::AnalyticsError;
use crate::routes;

/// Result type for data handlers.
pub type HandlerResult<T> = Result<Json<ApiResponse<T>>, AppError>;

// =============================================================================
// Service info
// =============================================================================

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
    })
}

/// GET /
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Report bundles
// =============================================================================

/// GET /api/data/dashboard
///
/// Optional `start_date` / `end_date` (`YYYY-MM-DD`, inclusive). Both or
/// neither must be supplied. A query string that does not decode (for
/// example a repeated date key) is reported as an invalid range.
pub async fn get_dashboard(
    State(state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> HandlerResult<DashboardData> {
    let Query(query) =
        query.map_err(|rejection| AnalyticsError::invalid_range(rejection.body_text()))?;
    let facade = state.facade.clone();
    let random = state.random;

    let data = tokio::task::spawn_blocking(move || {
        let mut rng = random.rng();
        routes::dashboard::get_dashboard_data(
            &facade,
            query.start_date.as_deref(),
            query.end_date.as_deref(),
            &mut rng,
        )
    })
    .await??;

    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/data/conversion
pub async fn get_conversion(State(state): State<AppState>) -> HandlerResult<ConversionData> {
    let facade = state.facade.clone();

    let data =
        tokio::task::spawn_blocking(move || routes::conversion::get_conversion_data(&facade))
            .await??;

    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/data/product
pub async fn get_product(State(state): State<AppState>) -> HandlerResult<ProductData> {
    let facade = state.facade.clone();
    let random = state.random;

    let data = tokio::task::spawn_blocking(move || {
        let mut rng = random.rng();
        routes::product::get_product_data(&facade, &mut rng)
    })
    .await?;

    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/data/user-insight
pub async fn get_user_insight(State(state): State<AppState>) -> HandlerResult<UserInsightData> {
    let facade = state.facade.clone();

    let data =
        tokio::task::spawn_blocking(move || routes::user_insight::get_user_insight_data(&facade))
            .await??;

    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/data/prediction
pub async fn get_prediction(State(state): State<AppState>) -> HandlerResult<PredictionData> {
    let facade = state.facade.clone();
    let random = state.random;

    let data = tokio::task::spawn_blocking(move || {
        let mut rng = random.rng();
        routes::prediction::get_prediction_data(&facade, &mut rng)
    })
    .await??;

    Ok(Json(ApiResponse::success(data)))
}

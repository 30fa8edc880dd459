use axum::extract::Query;
use axum::Json;
use serde::Deserialize;

use contracts::dashboards::d400_performance::{
    CompanySummaryResponse, PerformanceRequest, PerformanceResponse,
};

use crate::dashboards::d400_performance;

/// GET /api/d400/performance?year=2025&month=6&kind=store
pub async fn get_performance(
    Query(request): Query<PerformanceRequest>,
) -> Result<Json<PerformanceResponse>, axum::http::StatusCode> {
    if request.month < 1 || request.month > 12 {
        return Err(axum::http::StatusCode::BAD_REQUEST);
    }
    match d400_performance::service::get_performance(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to build performance dashboard: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub year: i32,
    pub month: u32,
}

/// GET /api/d400/company-summary?year=2025&month=6
pub async fn get_company_summary(
    Query(query): Query<SummaryQuery>,
) -> Result<Json<CompanySummaryResponse>, axum::http::StatusCode> {
    if query.month < 1 || query.month > 12 {
        return Err(axum::http::StatusCode::BAD_REQUEST);
    }
    match d400_performance::service::get_company_summary(query.year, query.month).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to build company summary: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

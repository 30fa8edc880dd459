use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use contracts::domain::a004_monthly_goal::aggregate::{MonthlyGoal, MonthlyGoalDto};
use contracts::enums::EntityKind;

use crate::domain::a004_monthly_goal;

/// POST /api/goals
pub async fn upsert(
    Json(dto): Json<MonthlyGoalDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match a004_monthly_goal::service::upsert(dto).await {
        Ok(id) => Ok(Json(json!({"id": id.to_string()}))),
        Err(e) => {
            tracing::error!("Failed to save goal: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GoalQuery {
    pub month: String,
    pub kind: Option<EntityKind>,
}

/// GET /api/goals?month=YYYY-MM&kind=store
pub async fn list(
    Query(query): Query<GoalQuery>,
) -> Result<Json<Vec<MonthlyGoal>>, axum::http::StatusCode> {
    match a004_monthly_goal::service::list_for_month(&query.month, query.kind).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list goals: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/goals/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a004_monthly_goal::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

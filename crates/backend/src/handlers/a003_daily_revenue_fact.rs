use axum::extract::Query;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use contracts::domain::a003_daily_revenue_fact::aggregate::{
    CorrectionResult, DailyRevenueFact, DailyRevenueFactDto, MtdCorrectionDto,
};
use contracts::enums::EntityKind;

use crate::domain::a003_daily_revenue_fact;

/// POST /api/revenue-facts
pub async fn upsert(
    Json(dto): Json<DailyRevenueFactDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match a003_daily_revenue_fact::service::upsert(dto).await {
        Ok(inserted) => Ok(Json(json!({"inserted": inserted}))),
        Err(e) => {
            tracing::error!("Failed to save revenue fact: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/revenue-facts/batch
pub async fn upsert_batch(
    Json(dtos): Json<Vec<DailyRevenueFactDto>>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match a003_daily_revenue_fact::service::upsert_batch(dtos).await {
        Ok((inserted, updated)) => Ok(Json(json!({"inserted": inserted, "updated": updated}))),
        Err(e) => {
            tracing::error!("Failed to save revenue fact batch: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FactRangeQuery {
    #[serde(rename = "entityId")]
    pub entity_id: Option<String>,
    pub kind: Option<EntityKind>,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// GET /api/revenue-facts?from=..&to=..&entityId=.. (or &kind=..)
pub async fn list(
    Query(query): Query<FactRangeQuery>,
) -> Result<Json<Vec<DailyRevenueFact>>, axum::http::StatusCode> {
    let result = match (&query.entity_id, query.kind) {
        (Some(entity_id), _) => {
            a003_daily_revenue_fact::service::list_for_entity(entity_id, query.from, query.to)
                .await
        }
        (None, Some(kind)) => {
            a003_daily_revenue_fact::service::list_for_kind(kind, query.from, query.to).await
        }
        (None, None) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match result {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list revenue facts: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/revenue-facts/corrections
pub async fn apply_correction(
    Json(dto): Json<MtdCorrectionDto>,
) -> Result<Json<CorrectionResult>, axum::http::StatusCode> {
    match a003_daily_revenue_fact::service::apply_correction(dto).await {
        Ok(result) => {
            tracing::info!(
                "MTD correction applied for {} on {}: {} -> {}",
                result.entity_id,
                result.date,
                result.previous_mtd,
                result.corrected_mtd
            );
            Ok(Json(result))
        }
        Err(e) => {
            tracing::error!("Failed to apply MTD correction: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

use axum::extract::Query;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use contracts::dashboards::d401_trends::{CumulativePoint, DayOfWeekRow, TrendPoint};
use contracts::enums::EntityKind;

use crate::dashboards::d401_trends;

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    #[serde(rename = "entityId")]
    pub entity_id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// GET /api/d401/trends/daily?entityId=..&from=..&to=..
pub async fn get_daily_trend(
    Query(query): Query<TrendQuery>,
) -> Result<Json<Vec<TrendPoint>>, axum::http::StatusCode> {
    match d401_trends::service::get_daily_trend(&query.entity_id, query.from, query.to).await {
        Ok(points) => Ok(Json(points)),
        Err(e) => {
            tracing::error!("Failed to build daily trend: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DayOfWeekQuery {
    pub kind: EntityKind,
    #[serde(rename = "entityId")]
    pub entity_id: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// GET /api/d401/trends/day-of-week?kind=store[&from=..&to=..][&entityId=..]
///
/// An omitted range defaults to the month of the latest fact on file.
pub async fn get_day_of_week(
    Query(query): Query<DayOfWeekQuery>,
) -> Result<Json<Vec<DayOfWeekRow>>, axum::http::StatusCode> {
    let (from, to) = match (query.from, query.to) {
        (Some(from), Some(to)) => (from, to),
        _ => match d401_trends::service::default_range(query.kind).await {
            Ok(Some((first, last))) => (query.from.unwrap_or(first), query.to.unwrap_or(last)),
            Ok(None) => return Ok(Json(Vec::new())),
            Err(e) => {
                tracing::error!("Failed to resolve default trend range: {}", e);
                return Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
            }
        },
    };
    match d401_trends::service::get_day_of_week_rollup(
        query.kind,
        query.entity_id.as_deref(),
        from,
        to,
    )
    .await
    {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            tracing::error!("Failed to build day-of-week rollup: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CumulativeQuery {
    pub kind: EntityKind,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// GET /api/d401/trends/cumulative?kind=store&from=..&to=..
pub async fn get_cumulative(
    Query(query): Query<CumulativeQuery>,
) -> Result<Json<Vec<CumulativePoint>>, axum::http::StatusCode> {
    match d401_trends::service::get_cumulative_points(query.kind, query.from, query.to).await {
        Ok(points) => Ok(Json(points)),
        Err(e) => {
            tracing::error!("Failed to build cumulative chart: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

use axum::extract::Query;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use contracts::domain::a005_rep_activity_fact::aggregate::RepActivityFact;

use crate::domain::a005_rep_activity_fact;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    #[serde(rename = "repId")]
    pub rep_id: Option<String>,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// GET /api/rep-activity?from=..&to=..[&repId=..]
///
/// Read-only: rows are written exclusively by the activity sync.
pub async fn list(
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<RepActivityFact>>, axum::http::StatusCode> {
    let result = match &query.rep_id {
        Some(rep_id) => {
            a005_rep_activity_fact::service::list_for_rep(rep_id, query.from, query.to).await
        }
        None => a005_rep_activity_fact::service::list_for_range(query.from, query.to).await,
    };
    match result {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list rep activity: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

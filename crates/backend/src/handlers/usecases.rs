use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;

use contracts::usecases::u501_sync_crm_activity::{
    SyncErrorResponse, SyncReport, SyncRequest, SyncStatusResponse,
};
use contracts::usecases::u502_map_owners::MapOwnersReport;

use crate::shared::state::SharedState;
use crate::usecases::u501_sync_crm_activity::{self, HubSpotApiClient, SyncError};
use crate::usecases::u502_map_owners;

type SyncFailure = (StatusCode, Json<SyncErrorResponse>);

/// A configured secret gates the trigger endpoints. No secret means an
/// open trigger, the local/dev case.
fn check_secret(state: &SharedState, headers: &HeaderMap) -> Result<(), SyncFailure> {
    let Some(secret) = state.sync_secret.as_deref().filter(|s| !s.is_empty()) else {
        return Ok(());
    };
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let expected = format!("Bearer {}", secret);
    if presented == Some(expected.as_str()) {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(SyncErrorResponse::new("Unauthorized")),
        ))
    }
}

fn build_client(state: &SharedState) -> Result<HubSpotApiClient, SyncFailure> {
    let Some(api_key) = state.crm_api_key.as_deref().filter(|k| !k.is_empty()) else {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SyncErrorResponse::new("CRM integration is not configured")),
        ));
    };
    Ok(HubSpotApiClient::new(
        state.crm_base_url.clone(),
        api_key.to_string(),
    ))
}

/// POST /api/u501/sync
///
/// Synchronous trigger: responds only after the run finished, with the
/// full report. An omitted date range means yesterday.
pub async fn sync_activity(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Option<Json<SyncRequest>>,
) -> Result<Json<SyncReport>, SyncFailure> {
    check_secret(&state, &headers)?;
    let client = build_client(&state)?;

    let request = body.map(|Json(r)| r).unwrap_or_default();
    let yesterday = Utc::now()
        .date_naive()
        .pred_opt()
        .unwrap_or_else(|| Utc::now().date_naive());
    let start = request.start_date.unwrap_or(yesterday);
    let end = request.end_date.unwrap_or(start);

    match u501_sync_crm_activity::executor::execute(&client, start, end).await {
        Ok(report) => Ok(Json(report)),
        Err(e @ SyncError::InvalidRange { .. }) => Err((
            StatusCode::BAD_REQUEST,
            Json(SyncErrorResponse::new(e.to_string())),
        )),
        Err(e) => {
            tracing::error!("Activity sync failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SyncErrorResponse::new(e.to_string())),
            ))
        }
    }
}

/// GET /api/u501/status
pub async fn sync_status(State(state): State<SharedState>) -> Json<SyncStatusResponse> {
    let crm_configured = state.crm_configured();
    Json(SyncStatusResponse {
        status: if crm_configured { "ready" } else { "unconfigured" }.to_string(),
        crm_configured,
        secret_configured: state.secret_configured(),
        timestamp: Utc::now(),
    })
}

/// POST /api/u502/map-owners
pub async fn map_owners(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<MapOwnersReport>, SyncFailure> {
    check_secret(&state, &headers)?;
    let client = build_client(&state)?;

    match u502_map_owners::executor::execute(&client).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            tracing::error!("Owner mapping failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SyncErrorResponse::new(e.to_string())),
            ))
        }
    }
}

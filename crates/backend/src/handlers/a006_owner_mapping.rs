use axum::extract::Path;
use axum::Json;
use serde_json::json;

use contracts::domain::a006_owner_mapping::aggregate::{OwnerMapping, OwnerMappingDto};

use crate::domain::a006_owner_mapping;

/// GET /api/owner-mappings
pub async fn list_all() -> Result<Json<Vec<OwnerMapping>>, axum::http::StatusCode> {
    match a006_owner_mapping::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/owner-mappings
pub async fn upsert(
    Json(dto): Json<OwnerMappingDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match a006_owner_mapping::service::upsert(dto).await {
        Ok(id) => Ok(Json(json!({"id": id.to_string()}))),
        Err(e) => {
            tracing::error!("Failed to save owner mapping: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/owner-mappings/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a006_owner_mapping::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

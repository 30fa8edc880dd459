use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use contracts::domain::a007_entity_group::aggregate::{EntityGroup, EntityGroupDto};

use crate::domain::a007_entity_group;

#[derive(Debug, Deserialize)]
pub struct GroupQuery {
    pub tag: Option<String>,
}

/// GET /api/entity-groups[?tag=..]
pub async fn list(
    Query(query): Query<GroupQuery>,
) -> Result<Json<Vec<EntityGroup>>, axum::http::StatusCode> {
    let result = match &query.tag {
        Some(tag) => a007_entity_group::service::list_for_tag(tag).await,
        None => a007_entity_group::service::list_all().await,
    };
    match result {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/entity-groups
pub async fn upsert(
    Json(dto): Json<EntityGroupDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match a007_entity_group::service::upsert(dto).await {
        Ok(id) => Ok(Json(json!({"id": id.to_string()}))),
        Err(e) => {
            tracing::error!("Failed to save entity group: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/entity-groups/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a007_entity_group::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

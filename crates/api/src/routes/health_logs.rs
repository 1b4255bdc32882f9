//! Health Log Routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use storage::{HealthLog, HealthLogUpdate, NewHealthLog, Page};
use uuid::Uuid;

use super::page_request;
use crate::error::ApiResult;
use crate::extract::{ApiJson, OwnerId};
use crate::{validation, workflow, SharedState};

const DEFAULT_LIMIT: usize = 10;

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/health-logs", get(list_health_logs).post(create_health_log))
        .route(
            "/health-logs/:id",
            get(get_health_log).put(update_health_log).delete(delete_health_log),
        )
}

/// Query parameters for listing health logs
#[derive(Debug, Deserialize)]
pub struct HealthLogQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    /// Only logs of this fish
    pub fish: Option<Uuid>,
}

pub async fn list_health_logs(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Query(params): Query<HealthLogQuery>,
) -> ApiResult<Json<Page<HealthLog>>> {
    let state = state.read().await;
    let request = page_request(params.page, params.limit, DEFAULT_LIMIT);
    Ok(Json(state.repository.list_health_logs(owner, params.fish, request)?))
}

pub async fn get_health_log(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<HealthLog>> {
    let state = state.read().await;
    Ok(Json(state.repository.get_health_log(owner, id)?))
}

/// Store a health log and run triage on it
pub async fn create_health_log(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    ApiJson(new): ApiJson<NewHealthLog>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let state = state.read().await;
    validation::new_health_log(&state.validator, &new)?;

    let outcome = workflow::record_health_check(&state, owner, new)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Health log created successfully",
            "healthLog": outcome.health_log,
            "alert": outcome.alert,
        })),
    ))
}

pub async fn update_health_log(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<Uuid>,
    ApiJson(update): ApiJson<HealthLogUpdate>,
) -> ApiResult<Json<Value>> {
    let state = state.read().await;
    validation::health_log_update(&state.validator, &update)?;

    let log = state.repository.update_health_log(owner, id, update)?;
    Ok(Json(json!({ "message": "Health log updated successfully", "healthLog": log })))
}

pub async fn delete_health_log(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    let state = state.read().await;
    state.repository.delete_health_log(owner, id)?;
    Ok(Json(json!({ "message": "Health log deleted successfully" })))
}

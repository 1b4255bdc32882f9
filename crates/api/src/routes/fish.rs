//! Fish Routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use storage::{Fish, FishUpdate, HealthLog, NewFish};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract::{ApiJson, OwnerId};
use crate::{validation, SharedState};

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/fish", get(list_fish).post(create_fish))
        .route("/fish/:id", get(get_fish).put(update_fish).delete(delete_fish))
        .route("/fish/:id/health", get(health_history))
}

/// Active fish, newest first
pub async fn list_fish(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
) -> ApiResult<Json<Vec<Fish>>> {
    let state = state.read().await;
    Ok(Json(state.repository.list_fish(owner)?))
}

pub async fn create_fish(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    ApiJson(new): ApiJson<NewFish>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let state = state.read().await;
    validation::new_fish(&state.validator, &new)?;

    let fish = state.repository.create_fish(owner, new)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Fish created successfully", "fish": fish })),
    ))
}

pub async fn get_fish(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Fish>> {
    let state = state.read().await;
    Ok(Json(state.repository.get_fish(owner, id)?))
}

pub async fn update_fish(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<Uuid>,
    ApiJson(update): ApiJson<FishUpdate>,
) -> ApiResult<Json<Value>> {
    let state = state.read().await;
    validation::fish_update(&state.validator, &update)?;

    let fish = state.repository.update_fish(owner, id, update)?;
    Ok(Json(json!({ "message": "Fish updated successfully", "fish": fish })))
}

/// Soft delete: the fish stays stored but leaves lists and tank counts
pub async fn delete_fish(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    let state = state.read().await;
    state.repository.deactivate_fish(owner, id)?;
    Ok(Json(json!({ "message": "Fish deleted successfully" })))
}

pub async fn health_history(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<HealthLog>>> {
    let state = state.read().await;
    state.repository.get_fish(owner, id)?;
    Ok(Json(state.repository.health_logs(owner, Some(id))?))
}

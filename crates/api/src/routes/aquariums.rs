//! Aquarium Routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use storage::{Aquarium, NewAquarium};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract::{ApiJson, OwnerId};
use crate::{validation, SharedState};

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/aquariums", get(list_aquariums).post(create_aquarium))
        .route("/aquariums/:id", get(get_aquarium))
        .route("/aquariums/:id/water-change", post(record_water_change))
        .route("/preferences/notifications", put(set_notifications))
}

pub async fn list_aquariums(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
) -> ApiResult<Json<Vec<Aquarium>>> {
    let state = state.read().await;
    Ok(Json(state.repository.list_aquariums(owner)?))
}

pub async fn create_aquarium(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    ApiJson(new): ApiJson<NewAquarium>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let state = state.read().await;
    validation::new_aquarium(&state.validator, &new)?;

    let aquarium = state.repository.create_aquarium(owner, new)?;
    info!("Aquarium {} created", aquarium.id);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Aquarium created successfully", "aquarium": aquarium })),
    ))
}

pub async fn get_aquarium(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Aquarium>> {
    let state = state.read().await;
    Ok(Json(state.repository.get_aquarium(owner, id)?))
}

/// Record a water change now, restarting the reminder schedule
pub async fn record_water_change(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    let state = state.read().await;
    let aquarium = state.repository.record_water_change(owner, id, Utc::now())?;
    Ok(Json(json!({ "message": "Water change recorded", "aquarium": aquarium })))
}

#[derive(Debug, Deserialize)]
pub struct NotificationPreference {
    pub enabled: bool,
}

pub async fn set_notifications(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    ApiJson(pref): ApiJson<NotificationPreference>,
) -> ApiResult<Json<Value>> {
    let state = state.read().await;
    state.repository.set_notifications_enabled(owner, pref.enabled)?;
    Ok(Json(json!({ "message": "Preferences updated", "enabled": pref.enabled })))
}

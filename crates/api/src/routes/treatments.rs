//! Treatment Routes

use alerting::TreatmentSubject;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use storage::{NewTreatment, Page, Treatment, TreatmentStatus, TreatmentUpdate};
use tracing::warn;
use uuid::Uuid;

use super::page_request;
use crate::error::ApiResult;
use crate::extract::{ApiJson, OwnerId};
use crate::{validation, SharedState};

const DEFAULT_LIMIT: usize = 10;

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/treatments", get(list_treatments).post(create_treatment))
        .route(
            "/treatments/:id",
            get(get_treatment).put(update_treatment).delete(delete_treatment),
        )
        .route("/treatments/:id/remind", post(remind))
}

fn subject(treatment: &Treatment) -> TreatmentSubject<'_> {
    TreatmentSubject {
        id: treatment.id,
        name: &treatment.name,
        frequency: treatment.frequency.as_deref(),
        fish: &treatment.fish,
        aquarium: treatment.aquarium,
        end_date: treatment.end_date,
    }
}

/// Query parameters for listing treatments
#[derive(Debug, Deserialize)]
pub struct TreatmentQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub status: Option<TreatmentStatus>,
}

pub async fn list_treatments(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Query(params): Query<TreatmentQuery>,
) -> ApiResult<Json<Page<Treatment>>> {
    let state = state.read().await;
    let request = page_request(params.page, params.limit, DEFAULT_LIMIT);
    Ok(Json(state.repository.list_treatments(owner, params.status, request)?))
}

pub async fn get_treatment(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Treatment>> {
    let state = state.read().await;
    Ok(Json(state.repository.get_treatment(owner, id)?))
}

/// Store a treatment and announce it with a reminder alert
pub async fn create_treatment(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    ApiJson(new): ApiJson<NewTreatment>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let state = state.read().await;
    validation::new_treatment(&state.validator, &new)?;

    let treatment = state.repository.create_treatment(owner, new)?;
    let alert = state
        .alerts
        .treatment_started(owner, &subject(&treatment), Utc::now());
    if let Err(e) = state.repository.insert_alert(alert) {
        warn!("Start alert for treatment {} not stored: {}", treatment.id, e);
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Treatment created successfully", "treatment": treatment })),
    ))
}

pub async fn update_treatment(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<Uuid>,
    ApiJson(update): ApiJson<TreatmentUpdate>,
) -> ApiResult<Json<Value>> {
    let state = state.read().await;
    validation::treatment_update(&state.validator, &update)?;

    let treatment = state.repository.update_treatment(owner, id, update)?;
    Ok(Json(json!({ "message": "Treatment updated successfully", "treatment": treatment })))
}

pub async fn delete_treatment(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    let state = state.read().await;
    state.repository.delete_treatment(owner, id)?;
    Ok(Json(json!({ "message": "Treatment deleted successfully" })))
}

/// Raise a dose reminder for a treatment
pub async fn remind(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let state = state.read().await;
    let treatment = state.repository.get_treatment(owner, id)?;
    let reminder = state
        .alerts
        .treatment_reminder(owner, &subject(&treatment), Utc::now());
    let alert = state.repository.insert_alert(reminder)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Reminder created", "alert": alert })),
    ))
}

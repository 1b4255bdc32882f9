//! Alert Routes

use alerting::AlertKind;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use storage::{AlertFilter, AlertPage};
use uuid::Uuid;

use super::page_request;
use crate::error::ApiResult;
use crate::extract::OwnerId;
use crate::SharedState;

const DEFAULT_LIMIT: usize = 20;

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/alerts", get(list_alerts))
        .route("/alerts/read-all", put(mark_all_read))
        .route("/alerts/:id/read", put(mark_read))
        .route("/alerts/:id", delete(delete_alert))
}

/// Query parameters for the alerts endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    /// Filter by read status
    pub is_read: Option<bool>,
    /// Filter by alert type
    #[serde(rename = "type")]
    pub kind: Option<AlertKind>,
}

/// Alerts, latest trigger first, with the unread count
pub async fn list_alerts(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Query(params): Query<AlertQuery>,
) -> ApiResult<Json<AlertPage>> {
    let state = state.read().await;
    let filter = AlertFilter {
        is_read: params.is_read,
        kind: params.kind,
    };
    let request = page_request(params.page, params.limit, DEFAULT_LIMIT);
    Ok(Json(state.repository.list_alerts(owner, filter, request)?))
}

pub async fn mark_read(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    let state = state.read().await;
    let alert = state.repository.mark_alert_read(owner, id)?;
    Ok(Json(json!({ "message": "Alert marked as read", "alert": alert })))
}

pub async fn mark_all_read(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
) -> ApiResult<Json<Value>> {
    let state = state.read().await;
    let changed = state.repository.mark_all_alerts_read(owner)?;
    Ok(Json(json!({ "message": "All alerts marked as read", "updated": changed })))
}

pub async fn delete_alert(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    let state = state.read().await;
    state.repository.delete_alert(owner, id)?;
    Ok(Json(json!({ "message": "Alert deleted successfully" })))
}

//! Analytics Routes

use analytics::{AquariumHealth, DailyHealth, Effectiveness};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::ApiResult;
use crate::extract::OwnerId;
use crate::SharedState;

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/analytics/health-trends", get(health_trends))
        .route("/analytics/treatment-effectiveness", get(treatment_effectiveness))
        .route("/analytics/symptoms", get(symptom_frequency))
        .route("/analytics/aquarium-summary", get(aquarium_summary))
}

/// Look-back window in days
#[derive(Debug, Deserialize)]
pub struct DaysQuery {
    pub days: Option<u32>,
}

impl DaysQuery {
    /// Start of the window; windows reaching past the calendar start at its beginning
    fn since(&self, default_days: u32) -> DateTime<Utc> {
        let days = Duration::days(i64::from(self.days.unwrap_or(default_days)));
        Utc::now()
            .checked_sub_signed(days)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

pub async fn health_trends(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Query(params): Query<DaysQuery>,
) -> ApiResult<Json<Vec<DailyHealth>>> {
    let state = state.read().await;
    let logs = state.repository.health_logs(owner, None)?;
    Ok(Json(analytics::health_trends(&logs, params.since(30))))
}

pub async fn treatment_effectiveness(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
) -> ApiResult<Json<BTreeMap<String, Effectiveness>>> {
    let state = state.read().await;
    let treatments = state.repository.treatments(owner, None)?;
    Ok(Json(analytics::treatment_effectiveness(&treatments)))
}

pub async fn symptom_frequency(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
    Query(params): Query<DaysQuery>,
) -> ApiResult<Json<BTreeMap<String, usize>>> {
    let state = state.read().await;
    let logs = state.repository.health_logs(owner, None)?;
    Ok(Json(analytics::symptom_frequency(&logs, params.since(90))))
}

pub async fn aquarium_summary(
    State(state): State<SharedState>,
    OwnerId(owner): OwnerId,
) -> ApiResult<Json<Vec<AquariumHealth>>> {
    let state = state.read().await;
    let mut summary = Vec::new();
    for aquarium in state.repository.list_aquariums(owner)? {
        let fish = state.repository.fish_in_aquarium(aquarium.id)?;
        summary.push(analytics::aquarium_health(&aquarium, &fish));
    }
    Ok(Json(summary))
}

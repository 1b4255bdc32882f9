//! Triage Routes

use axum::{routing::post, Json, Router};
use triage::{Assessment, SymptomObservation};

use crate::extract::ApiJson;
use crate::SharedState;

pub fn router() -> Router<SharedState> {
    Router::new().route("/triage", post(assess))
}

/// Stateless assessment of a posted observation; nothing is stored
pub async fn assess(ApiJson(observation): ApiJson<SymptomObservation>) -> Json<Assessment> {
    metrics::counter!("triage_predictions_total").increment(1);
    Json(triage::assess(&observation))
}

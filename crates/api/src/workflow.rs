//! Health Check Workflow
//!
//! Stores a health log, runs triage when symptoms are present, raises a
//! health alert for confident predictions and updates the fish.

use crate::error::ApiResult;
use crate::AppState;
use alerting::FishSubject;
use chrono::Utc;
use serde::Serialize;
use storage::{AlertRecord, Fish, HealthLog, NewHealthLog};
use tracing::{info, warn};
use uuid::Uuid;

/// What recording one health check produced
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckOutcome {
    pub health_log: HealthLog,
    pub fish: Fish,
    pub alert: Option<AlertRecord>,
}

/// Record a health check for one of the owner's fish
pub fn record_health_check(
    state: &AppState,
    owner: Uuid,
    new: NewHealthLog,
) -> ApiResult<HealthCheckOutcome> {
    let fish = state.repository.get_fish(owner, new.fish)?;
    let symptomatic = new.symptoms.has_any();

    let mut prediction = None;
    let mut emergency = false;
    let mut alert = None;

    if symptomatic {
        let assessment = triage::assess(&new.symptoms);
        metrics::counter!("triage_predictions_total").increment(1);
        metrics::histogram!("triage_confidence").record(assessment.prediction.confidence);
        emergency = assessment.emergency;

        let subject = FishSubject {
            id: fish.id,
            name: &fish.name,
            aquarium: Some(fish.aquarium),
        };
        if let Some(new_alert) =
            state
                .alerts
                .health_alert(owner, subject, &assessment.prediction, Utc::now())
        {
            // a failed alert must not lose the health log
            match state.repository.insert_alert(new_alert) {
                Ok(record) => {
                    metrics::counter!("health_alerts_total").increment(1);
                    alert = Some(record);
                }
                Err(e) => warn!("Health alert for fish {} not stored: {}", fish.id, e),
            }
        }
        prediction = Some(assessment.prediction);
    }

    let health_log = state
        .repository
        .create_health_log(owner, new, prediction, emergency)?;
    let fish = state.repository.record_health_check(
        owner,
        fish.id,
        health_log.observation_date,
        symptomatic,
    )?;
    metrics::counter!("health_logs_total").increment(1);

    info!(
        fish = %fish.id,
        symptomatic,
        emergency,
        alerted = alert.is_some(),
        "Recorded health check {}",
        health_log.id
    );

    Ok(HealthCheckOutcome {
        health_log,
        fish,
        alert,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{seed_fish, test_state};
    use alerting::{AlertKind, AlertPriority};
    use storage::{AlertFilter, FishStatus, PageRequest};
    use triage::{Symptom, SymptomObservation};

    fn log_for(fish: Uuid, symptoms: &[Symptom]) -> NewHealthLog {
        NewHealthLog {
            fish,
            observation_date: None,
            symptoms: SymptomObservation::with_symptoms(symptoms.iter().copied()),
            behavior: Default::default(),
            physical: Default::default(),
            water_parameters: Default::default(),
            notes: None,
            images: Vec::new(),
        }
    }

    fn alert_count(state: &AppState, owner: Uuid) -> usize {
        state
            .repository
            .list_alerts(owner, AlertFilter::default(), PageRequest::default())
            .unwrap()
            .page
            .total
    }

    #[test]
    fn test_no_symptoms_no_prediction() {
        let state = test_state();
        let (owner, fish) = seed_fish(&state);

        let outcome = record_health_check(&state, owner, log_for(fish.id, &[])).unwrap();
        assert!(outcome.health_log.ai_prediction.is_none());
        assert!(outcome.alert.is_none());
        assert_eq!(outcome.fish.status, FishStatus::Healthy);
        assert_eq!(outcome.fish.last_health_check, outcome.health_log.observation_date);
    }

    #[test]
    fn test_confident_prediction_raises_alert() {
        let state = test_state();
        let (owner, fish) = seed_fish(&state);

        let outcome = record_health_check(
            &state,
            owner,
            log_for(fish.id, &[Symptom::WhiteSpots, Symptom::LossOfAppetite]),
        )
        .unwrap();

        let prediction = outcome.health_log.ai_prediction.unwrap();
        assert_eq!(prediction.confidence, 0.85);
        let alert = outcome.alert.unwrap();
        assert_eq!(alert.kind, AlertKind::Health);
        assert_eq!(alert.priority, AlertPriority::High);
        assert_eq!(alert.related_fish, vec![fish.id]);
        assert_eq!(outcome.fish.status, FishStatus::Sick);
        assert_eq!(alert_count(&state, owner), 1);
    }

    #[test]
    fn test_boundary_prediction_stays_quiet() {
        let state = test_state();
        let (owner, fish) = seed_fish(&state);

        let outcome = record_health_check(
            &state,
            owner,
            log_for(fish.id, &[Symptom::Bloating, Symptom::Lethargy]),
        )
        .unwrap();

        assert_eq!(outcome.health_log.ai_prediction.unwrap().confidence, 0.70);
        assert!(outcome.health_log.emergency);
        assert!(outcome.alert.is_none());
        assert_eq!(outcome.fish.status, FishStatus::Sick);
        assert_eq!(alert_count(&state, owner), 0);
    }

    #[test]
    fn test_unknown_condition_still_marks_sick() {
        let state = test_state();
        let (owner, fish) = seed_fish(&state);

        let outcome =
            record_health_check(&state, owner, log_for(fish.id, &[Symptom::CloudyEyes])).unwrap();
        assert_eq!(
            outcome.health_log.ai_prediction.unwrap().condition,
            "Unknown Condition"
        );
        assert!(!outcome.health_log.emergency);
        assert_eq!(outcome.fish.status, FishStatus::Sick);
    }

    #[test]
    fn test_foreign_fish_is_not_found() {
        let state = test_state();
        let (_, fish) = seed_fish(&state);

        let result = record_health_check(&state, Uuid::new_v4(), log_for(fish.id, &[]));
        assert!(matches!(result, Err(crate::ApiError::NotFound("Fish"))));
        assert_eq!(state.repository.health_log_count(), 0);
    }
}

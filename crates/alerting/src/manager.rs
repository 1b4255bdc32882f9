//! Alert Manager Implementation

use crate::alert::{AlertData, AlertKind, AlertPriority, NewAlert};
use crate::AlertError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use triage::{Prediction, ALERT_CONFIDENCE_THRESHOLD};
use tracing::{debug, info};
use uuid::Uuid;

/// Alert configuration.
///
/// The health alert threshold and priority are fixed and not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Days a water change reminder stays valid after it triggers
    pub maintenance_expiry_days: i64,
    /// Days a treatment-started alert stays valid when the treatment has no end date
    pub treatment_expiry_days: i64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            maintenance_expiry_days: 2,
            treatment_expiry_days: 7,
        }
    }
}

impl AlertConfig {
    /// Reject expiry windows that cannot be meant
    pub fn validate(&self) -> Result<(), AlertError> {
        if self.maintenance_expiry_days < 0 || self.treatment_expiry_days < 0 {
            return Err(AlertError::InvalidConfig(
                "expiry windows must not be negative".to_string(),
            ));
        }
        if Duration::try_days(self.maintenance_expiry_days.max(self.treatment_expiry_days)).is_none() {
            return Err(AlertError::InvalidConfig(
                "expiry windows are too large".to_string(),
            ));
        }
        Ok(())
    }
}

/// The fish a health alert is about
#[derive(Debug, Clone, Copy)]
pub struct FishSubject<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub aquarium: Option<Uuid>,
}

/// Decides when predictions become alerts and builds them
#[derive(Debug, Clone)]
pub struct AlertManager {
    config: AlertConfig,
}

impl AlertManager {
    /// Create a new alert manager
    pub fn new(config: AlertConfig) -> Self {
        info!("Creating alert manager with config: {:?}", config);
        Self { config }
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Whether a prediction should raise a health alert
    pub fn should_raise(&self, prediction: &Prediction) -> bool {
        if prediction.warrants_alert() {
            return true;
        }
        debug!(
            "Alert suppressed: confidence {} <= threshold {}",
            prediction.confidence, ALERT_CONFIDENCE_THRESHOLD
        );
        false
    }

    /// Build the health alert for a prediction, if it clears the threshold
    pub fn health_alert(
        &self,
        owner: Uuid,
        fish: FishSubject<'_>,
        prediction: &Prediction,
        now: DateTime<Utc>,
    ) -> Option<NewAlert> {
        if !self.should_raise(prediction) {
            return None;
        }

        let title = format!("Health Alert: {} detected", prediction.condition);
        let message = format!(
            "Your fish {} is showing symptoms of {}. {}",
            fish.name,
            prediction.condition,
            prediction.recommendation_text()
        );

        let mut alert = NewAlert::new(owner, AlertKind::Health, title, message, now);
        alert.priority = AlertPriority::High;
        alert.related_fish = vec![fish.id];
        alert.related_aquarium = fish.aquarium;
        alert.action_required = true;
        alert.data = Some(AlertData::Prediction(prediction.clone()));

        info!("Health alert raised for fish {}: {}", fish.id, prediction.condition);
        Some(alert)
    }
}

impl Default for AlertManager {
    fn default() -> Self {
        Self::new(AlertConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage::{predict, Symptom, SymptomObservation};

    fn prediction(symptoms: &[Symptom]) -> Prediction {
        predict(&SymptomObservation::with_symptoms(symptoms.iter().copied()))
    }

    fn subject(name: &str) -> FishSubject<'_> {
        FishSubject {
            id: Uuid::new_v4(),
            name,
            aquarium: Some(Uuid::new_v4()),
        }
    }

    #[test]
    fn test_confidence_threshold() {
        let manager = AlertManager::default();

        // 0.70 sits on the threshold and must not fire
        assert!(!manager.should_raise(&prediction(&[Symptom::Bloating, Symptom::Lethargy])));
        assert!(manager.should_raise(&prediction(&[Symptom::FinRot, Symptom::Lesions])));
        assert!(!manager.should_raise(&prediction(&[])));
    }

    #[test]
    fn test_health_alert_contents() {
        let manager = AlertManager::default();
        let owner = Uuid::new_v4();
        let fish = subject("Nemo");
        let p = prediction(&[Symptom::WhiteSpots, Symptom::LossOfAppetite]);

        let alert = manager.health_alert(owner, fish, &p, Utc::now()).unwrap();
        assert_eq!(alert.title, "Health Alert: Ich (White Spot Disease) detected");
        assert!(alert
            .message
            .starts_with("Your fish Nemo is showing symptoms of Ich (White Spot Disease). Gradually"));
        assert!(alert.message.ends_with("Perform partial water changes before each treatment"));
        assert_eq!(alert.kind, AlertKind::Health);
        assert_eq!(alert.priority, AlertPriority::High);
        assert_eq!(alert.related_fish, vec![fish.id]);
        assert_eq!(alert.related_aquarium, fish.aquarium);
        assert!(alert.action_required);
        assert_eq!(alert.data, Some(AlertData::Prediction(p)));
    }

    #[test]
    fn test_no_alert_below_threshold() {
        let manager = AlertManager::default();
        let p = prediction(&[Symptom::Bloating, Symptom::Lethargy]);
        assert!(manager
            .health_alert(Uuid::new_v4(), subject("Dory"), &p, Utc::now())
            .is_none());
    }

    #[test]
    fn test_config_validation() {
        assert!(AlertConfig::default().validate().is_ok());
        let negative = AlertConfig {
            maintenance_expiry_days: -1,
            ..Default::default()
        };
        assert!(negative.validate().is_err());
        let huge = AlertConfig {
            treatment_expiry_days: i64::MAX,
            ..Default::default()
        };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_threshold_matches_triage() {
        let manager = AlertManager::default();
        for symptoms in [
            &[Symptom::WhiteSpots, Symptom::LossOfAppetite][..],
            &[Symptom::FinRot, Symptom::Lesions],
            &[Symptom::Bloating, Symptom::Lethargy],
            &[Symptom::RapidBreathing, Symptom::ClampedFins],
            &[Symptom::CloudyEyes],
        ] {
            let observation = SymptomObservation::with_symptoms(symptoms.iter().copied());
            let p = predict(&observation);
            assert_eq!(manager.should_raise(&p), triage::assess(&observation).raise_alert);
        }
    }
}

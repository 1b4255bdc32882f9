//! Triage Engine Implementation

use crate::rules::{first_match, Rule, EMERGENCY_SYMPTOMS};
use crate::symptoms::SymptomObservation;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Confidence a prediction must strictly exceed to raise a health alert
pub const ALERT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Most likely condition for an observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Condition label
    #[serde(alias = "disease")]
    pub condition: String,
    /// Fixed confidence of the matching rule (0.0 to 1.0)
    pub confidence: f64,
    /// Recommended actions, in order
    pub recommendations: Vec<String>,
}

impl Prediction {
    fn from_rule(rule: &Rule) -> Self {
        Self {
            condition: rule.condition.label().to_string(),
            confidence: rule.confidence,
            recommendations: rule.recommendations.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Whether this prediction clears the health alert threshold
    pub fn warrants_alert(&self) -> bool {
        self.confidence > ALERT_CONFIDENCE_THRESHOLD
    }

    /// Recommendations joined by single spaces
    pub fn recommendation_text(&self) -> String {
        self.recommendations.join(" ")
    }
}

/// Everything the engine says about one observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub prediction: Prediction,
    pub emergency: bool,
    pub raise_alert: bool,
}

/// Predict the most likely condition. First matching rule wins.
pub fn predict(observation: &SymptomObservation) -> Prediction {
    Prediction::from_rule(first_match(observation))
}

/// True when any emergency symptom is present
pub fn is_emergency(observation: &SymptomObservation) -> bool {
    EMERGENCY_SYMPTOMS.iter().any(|&s| observation.has(s))
}

/// Run prediction, emergency check and alert decision together
pub fn assess(observation: &SymptomObservation) -> Assessment {
    let prediction = predict(observation);
    let emergency = is_emergency(observation);
    let raise_alert = prediction.warrants_alert();

    debug!(
        condition = %prediction.condition,
        confidence = prediction.confidence,
        emergency,
        raise_alert,
        "Assessed observation with {} symptom(s)",
        observation.count()
    );

    Assessment {
        prediction,
        emergency,
        raise_alert,
    }
}

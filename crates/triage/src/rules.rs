//! Triage Rule Table
//!
//! Rules are evaluated top to bottom and the first match wins. Order is the
//! only tie-break between rules whose predicates overlap.

use crate::symptoms::{Symptom, SymptomObservation};

/// A condition the rule table can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Ich,
    FinRot,
    Dropsy,
    WaterQuality,
    Unknown,
}

impl Condition {
    /// Human-readable label attached to predictions
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Ich => "Ich (White Spot Disease)",
            Condition::FinRot => "Fin Rot or Bacterial Infection",
            Condition::Dropsy => "Dropsy or Internal Infection",
            Condition::WaterQuality => "Water Quality Issues or Gill Disease",
            Condition::Unknown => "Unknown Condition",
        }
    }
}

/// One entry of the rule table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Condition named when the rule matches
    pub condition: Condition,
    /// Symptoms that must all be present
    pub requires: &'static [Symptom],
    /// Fixed confidence attached to the prediction
    pub confidence: f64,
    /// Recommended actions, in display order
    pub recommendations: &'static [&'static str],
}

impl Rule {
    /// Whether the observation satisfies this rule
    pub fn matches(&self, observation: &SymptomObservation) -> bool {
        observation.has_all(self.requires)
    }
}

/// Ordered rule table. Evaluation stops at the first match.
pub static RULES: [Rule; 4] = [
    Rule {
        condition: Condition::Ich,
        requires: &[Symptom::WhiteSpots, Symptom::LossOfAppetite],
        confidence: 0.85,
        recommendations: &[
            "Gradually increase water temperature to 80-82°F (27-28°C) if suitable for your fish",
            "Use ich medication according to package instructions",
            "Increase aeration as medication can reduce oxygen levels",
            "Perform partial water changes before each treatment",
        ],
    },
    Rule {
        condition: Condition::FinRot,
        requires: &[Symptom::FinRot, Symptom::Lesions],
        confidence: 0.75,
        recommendations: &[
            "Improve water quality with immediate partial water change",
            "Use antibacterial medication specifically for fin rot",
            "Ensure proper filtration and maintain stable water parameters",
            "Isolate affected fish if possible to prevent spread",
        ],
    },
    Rule {
        condition: Condition::Dropsy,
        requires: &[Symptom::Bloating, Symptom::Lethargy],
        confidence: 0.70,
        recommendations: &[
            "Isolate the affected fish immediately",
            "Try antibacterial food or medication",
            "Add aquarium salt if suitable for your fish species",
            "This condition has a low survival rate, focus on preventing spread",
        ],
    },
    Rule {
        condition: Condition::WaterQuality,
        requires: &[Symptom::RapidBreathing, Symptom::ClampedFins],
        confidence: 0.80,
        recommendations: &[
            "Test water parameters immediately (ammonia, nitrite, nitrate, pH)",
            "Perform 25-50% water change",
            "Check filtration system and ensure it's functioning properly",
            "Reduce feeding until parameters stabilize",
        ],
    },
];

/// Returned when no rule in [`RULES`] matches
pub static DEFAULT_RULE: Rule = Rule {
    condition: Condition::Unknown,
    requires: &[],
    confidence: 0.30,
    recommendations: &[
        "Monitor fish closely for any changes",
        "Improve water quality with partial water change",
        "Consider isolating the fish if symptoms worsen",
        "Consult with experienced aquarists or veterinarians",
    ],
};

/// Symptoms that make an observation an emergency on their own
pub const EMERGENCY_SYMPTOMS: [Symptom; 3] =
    [Symptom::RapidBreathing, Symptom::Bloating, Symptom::Lesions];

/// First matching rule, or [`DEFAULT_RULE`]
pub fn first_match(observation: &SymptomObservation) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| rule.matches(observation))
        .unwrap_or(&DEFAULT_RULE)
}

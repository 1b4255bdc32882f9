//! Symptom Observation Types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when a string does not name a recognized symptom
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown symptom: {0}")]
pub struct UnknownSymptom(pub String);

/// A recognized symptom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Symptom {
    WhiteSpots,
    FinRot,
    ClampedFins,
    LossOfAppetite,
    Lethargy,
    RapidBreathing,
    Bloating,
    Lesions,
    CloudyEyes,
    AbnormalSwimming,
}

impl Symptom {
    /// Every recognized symptom, in record field order
    pub const ALL: [Symptom; 10] = [
        Symptom::WhiteSpots,
        Symptom::FinRot,
        Symptom::ClampedFins,
        Symptom::LossOfAppetite,
        Symptom::Lethargy,
        Symptom::RapidBreathing,
        Symptom::Bloating,
        Symptom::Lesions,
        Symptom::CloudyEyes,
        Symptom::AbnormalSwimming,
    ];

    /// Wire key of the symptom
    pub fn key(&self) -> &'static str {
        match self {
            Symptom::WhiteSpots => "whiteSpots",
            Symptom::FinRot => "finRot",
            Symptom::ClampedFins => "clampedFins",
            Symptom::LossOfAppetite => "lossOfAppetite",
            Symptom::Lethargy => "lethargy",
            Symptom::RapidBreathing => "rapidBreathing",
            Symptom::Bloating => "bloating",
            Symptom::Lesions => "lesions",
            Symptom::CloudyEyes => "cloudyEyes",
            Symptom::AbnormalSwimming => "abnormalSwimming",
        }
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Symptom {
    type Err = UnknownSymptom;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symptom::ALL
            .iter()
            .copied()
            .find(|symptom| symptom.key() == s)
            .ok_or_else(|| UnknownSymptom(s.to_string()))
    }
}

/// Which symptoms were seen during a single health check.
///
/// Missing keys deserialize as absent and unknown keys are dropped, so any
/// JSON object is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SymptomObservation {
    pub white_spots: bool,
    pub fin_rot: bool,
    pub clamped_fins: bool,
    pub loss_of_appetite: bool,
    pub lethargy: bool,
    pub rapid_breathing: bool,
    pub bloating: bool,
    pub lesions: bool,
    pub cloudy_eyes: bool,
    pub abnormal_swimming: bool,
}

impl SymptomObservation {
    /// Observation with no symptoms present
    pub fn none() -> Self {
        Self::default()
    }

    /// Build an observation from the symptoms that were seen
    pub fn with_symptoms<I>(symptoms: I) -> Self
    where
        I: IntoIterator<Item = Symptom>,
    {
        let mut observation = Self::default();
        for symptom in symptoms {
            *observation.slot_mut(symptom) = true;
        }
        observation
    }

    /// Build an observation from `(key, present)` pairs, ignoring unknown keys
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut observation = Self::default();
        for (key, present) in pairs {
            if let Ok(symptom) = key.parse::<Symptom>() {
                *observation.slot_mut(symptom) = present;
            }
        }
        observation
    }

    /// Whether the given symptom is present
    pub fn has(&self, symptom: Symptom) -> bool {
        match symptom {
            Symptom::WhiteSpots => self.white_spots,
            Symptom::FinRot => self.fin_rot,
            Symptom::ClampedFins => self.clamped_fins,
            Symptom::LossOfAppetite => self.loss_of_appetite,
            Symptom::Lethargy => self.lethargy,
            Symptom::RapidBreathing => self.rapid_breathing,
            Symptom::Bloating => self.bloating,
            Symptom::Lesions => self.lesions,
            Symptom::CloudyEyes => self.cloudy_eyes,
            Symptom::AbnormalSwimming => self.abnormal_swimming,
        }
    }

    /// Whether every listed symptom is present
    pub fn has_all(&self, symptoms: &[Symptom]) -> bool {
        symptoms.iter().all(|&s| self.has(s))
    }

    /// Whether at least one symptom is present
    pub fn has_any(&self) -> bool {
        Symptom::ALL.iter().any(|&s| self.has(s))
    }

    /// Present symptoms, in record field order
    pub fn present(&self) -> impl Iterator<Item = Symptom> + '_ {
        Symptom::ALL.into_iter().filter(move |&s| self.has(s))
    }

    /// Number of present symptoms
    pub fn count(&self) -> usize {
        self.present().count()
    }

    fn slot_mut(&mut self, symptom: Symptom) -> &mut bool {
        match symptom {
            Symptom::WhiteSpots => &mut self.white_spots,
            Symptom::FinRot => &mut self.fin_rot,
            Symptom::ClampedFins => &mut self.clamped_fins,
            Symptom::LossOfAppetite => &mut self.loss_of_appetite,
            Symptom::Lethargy => &mut self.lethargy,
            Symptom::RapidBreathing => &mut self.rapid_breathing,
            Symptom::Bloating => &mut self.bloating,
            Symptom::Lesions => &mut self.lesions,
            Symptom::CloudyEyes => &mut self.cloudy_eyes,
            Symptom::AbnormalSwimming => &mut self.abnormal_swimming,
        }
    }
}

impl FromIterator<Symptom> for SymptomObservation {
    fn from_iter<I: IntoIterator<Item = Symptom>>(iter: I) -> Self {
        Self::with_symptoms(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        for symptom in Symptom::ALL {
            assert_eq!(symptom.key().parse::<Symptom>(), Ok(symptom));
        }
        assert!("gillFlukes".parse::<Symptom>().is_err());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let obs = SymptomObservation::from_pairs([
            ("whiteSpots", true),
            ("gillFlukes", true),
            ("lesions", false),
        ]);
        assert!(obs.white_spots);
        assert_eq!(obs.count(), 1);
    }

    #[test]
    fn test_deserialize_partial_object() {
        let obs: SymptomObservation =
            serde_json::from_str(r#"{"finRot": true, "swimBladder": true}"#).unwrap();
        assert!(obs.fin_rot);
        assert_eq!(obs.count(), 1);

        let empty: SymptomObservation = serde_json::from_str("{}").unwrap();
        assert!(!empty.has_any());
    }

    #[test]
    fn test_serialize_uses_wire_keys() {
        let obs = SymptomObservation::with_symptoms([Symptom::LossOfAppetite]);
        let json = serde_json::to_value(obs).unwrap();
        assert_eq!(json["lossOfAppetite"], true);
        assert_eq!(json["abnormalSwimming"], false);
    }

    #[test]
    fn test_present_order() {
        let obs: SymptomObservation = [Symptom::Lesions, Symptom::WhiteSpots].into_iter().collect();
        let present: Vec<_> = obs.present().collect();
        assert_eq!(present, vec![Symptom::WhiteSpots, Symptom::Lesions]);
    }
}

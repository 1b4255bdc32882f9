//! Symptom Triage Engine
//!
//! Maps a symptom observation to a condition, an emergency flag and an alert
//! decision using a fixed, ordered rule table. Every function here is pure.

mod engine;
mod rules;
mod symptoms;

pub use engine::{assess, is_emergency, predict, Assessment, Prediction, ALERT_CONFIDENCE_THRESHOLD};
pub use rules::{first_match, Condition, Rule, DEFAULT_RULE, EMERGENCY_SYMPTOMS, RULES};
pub use symptoms::{Symptom, SymptomObservation, UnknownSymptom};

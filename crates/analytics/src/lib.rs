//! Analytics
//!
//! Aggregations over stored health logs, treatments and fish.

mod summary;
mod trends;

pub use summary::{aquarium_health, treatment_effectiveness, AquariumHealth, Effectiveness};
pub use trends::{health_trends, symptom_frequency, DailyHealth};

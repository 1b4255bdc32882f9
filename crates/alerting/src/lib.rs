//! Alerting System
//!
//! Turns triage predictions into health alerts and builds maintenance and
//! treatment reminders.

mod alert;
mod manager;
mod reminders;

pub use alert::{format_date, AlertData, AlertKind, AlertPriority, NewAlert};
pub use manager::{AlertConfig, AlertManager, FishSubject};
pub use reminders::{TreatmentSubject, WaterChangeSchedule};

use thiserror::Error;

/// Alerting errors
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("Invalid alert configuration: {0}")]
    InvalidConfig(String),
}

//! Alert Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use triage::Prediction;
use uuid::Uuid;

/// What an alert is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Health,
    Maintenance,
    System,
    Reminder,
}

/// Alert priority, lowest first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Extra payload attached to an alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertData {
    /// Prediction that triggered a health alert
    Prediction(Prediction),
    /// Treatment a reminder refers to
    Treatment {
        #[serde(rename = "treatmentId")]
        treatment_id: Uuid,
    },
}

/// An alert ready to be stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlert {
    pub owner: Uuid,
    pub title: String,
    pub message: String,
    pub kind: AlertKind,
    pub priority: AlertPriority,
    pub related_fish: Vec<Uuid>,
    pub related_aquarium: Option<Uuid>,
    pub action_required: bool,
    pub trigger_date: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub data: Option<AlertData>,
}

impl NewAlert {
    /// Alert with medium priority and nothing related, triggering `now`
    pub fn new(owner: Uuid, kind: AlertKind, title: String, message: String, now: DateTime<Utc>) -> Self {
        Self {
            owner,
            title,
            message,
            kind,
            priority: AlertPriority::default(),
            related_fish: Vec::new(),
            related_aquarium: None,
            action_required: false,
            trigger_date: now,
            expiry_date: None,
            data: None,
        }
    }
}

/// Format a date the way alert messages show it, e.g. `Mar 4, 2025`
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2025, 3, 4, 18, 30, 0).unwrap();
        assert_eq!(format_date(date), "Mar 4, 2025");
    }

    #[test]
    fn test_priority_ordering() {
        assert!(AlertPriority::Critical > AlertPriority::High);
        assert!(AlertPriority::High > AlertPriority::Medium);
        assert_eq!(AlertPriority::default(), AlertPriority::Medium);
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(serde_json::to_string(&AlertKind::Maintenance).unwrap(), "\"maintenance\"");
        assert_eq!(
            serde_json::from_str::<AlertPriority>("\"high\"").unwrap(),
            AlertPriority::High
        );
    }
}

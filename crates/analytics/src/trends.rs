//! Health Log Aggregations

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use storage::HealthLog;

/// Healthy and sick observations on one UTC day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHealth {
    pub date: NaiveDate,
    pub healthy: usize,
    pub sick: usize,
    pub total: usize,
}

/// Per-day healthy/sick counts for logs observed at or after `since`, oldest day first.
///
/// A log counts as sick when any symptom was present.
pub fn health_trends(logs: &[HealthLog], since: DateTime<Utc>) -> Vec<DailyHealth> {
    let mut days: BTreeMap<NaiveDate, DailyHealth> = BTreeMap::new();

    for log in logs.iter().filter(|l| l.observation_date >= since) {
        let date = log.observation_date.date_naive();
        let day = days.entry(date).or_insert(DailyHealth {
            date,
            healthy: 0,
            sick: 0,
            total: 0,
        });
        if log.has_symptoms() {
            day.sick += 1;
        } else {
            day.healthy += 1;
        }
        day.total += 1;
    }

    days.into_values().collect()
}

/// How often each symptom was seen in logs observed at or after `since`.
///
/// Keys are symptom wire names; symptoms never seen are absent.
pub fn symptom_frequency(logs: &[HealthLog], since: DateTime<Utc>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for log in logs.iter().filter(|l| l.observation_date >= since) {
        for symptom in log.symptoms.present() {
            *counts.entry(symptom.key().to_string()).or_insert(0) += 1;
        }
    }
    counts
}

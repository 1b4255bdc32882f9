//! Treatment and Aquarium Summaries

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use storage::{Aquarium, Fish, FishStatus, Treatment, TreatmentResult, TreatmentStatus};

/// Outcome counts for one treatment name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effectiveness {
    pub effective: usize,
    pub ineffective: usize,
    pub partial: usize,
    pub total: usize,
}

/// Outcome counts of completed treatments with a known result, keyed by treatment name
pub fn treatment_effectiveness(treatments: &[Treatment]) -> BTreeMap<String, Effectiveness> {
    let mut by_name: BTreeMap<String, Effectiveness> = BTreeMap::new();

    for treatment in treatments
        .iter()
        .filter(|t| t.status == TreatmentStatus::Completed && t.results != TreatmentResult::Unknown)
    {
        let tally = by_name.entry(treatment.name.clone()).or_default();
        match treatment.results {
            TreatmentResult::Effective => tally.effective += 1,
            TreatmentResult::Ineffective => tally.ineffective += 1,
            TreatmentResult::Partial => tally.partial += 1,
            TreatmentResult::Unknown => continue,
        }
        tally.total += 1;
    }

    by_name
}

/// Health of the active fish in one aquarium
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AquariumHealth {
    pub aquarium: String,
    pub total_fish: usize,
    pub healthy_fish: usize,
    pub sick_fish: usize,
    pub recovering_fish: usize,
    /// Rounded share of healthy fish, 0 for an empty tank
    pub health_percentage: u32,
}

/// Summarize one aquarium; inactive fish and fish from other tanks are skipped
pub fn aquarium_health(aquarium: &Aquarium, fish: &[Fish]) -> AquariumHealth {
    let resident: Vec<_> = fish
        .iter()
        .filter(|f| f.aquarium == aquarium.id && f.is_active)
        .collect();
    let count = |status: FishStatus| resident.iter().filter(|f| f.status == status).count();

    let total_fish = resident.len();
    let healthy_fish = count(FishStatus::Healthy);
    let health_percentage = if total_fish > 0 {
        ((healthy_fish as f64 / total_fish as f64) * 100.0).round() as u32
    } else {
        0
    };

    AquariumHealth {
        aquarium: aquarium.name.clone(),
        total_fish,
        healthy_fish,
        sick_fish: count(FishStatus::Sick),
        recovering_fish: count(FishStatus::Recovering),
        health_percentage,
    }
}

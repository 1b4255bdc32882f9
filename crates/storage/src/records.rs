//! Stored Record Types

use alerting::{AlertData, AlertKind, AlertPriority, NewAlert};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use triage::{Prediction, SymptomObservation};
use uuid::Uuid;

/// Water chemistry readings; any reading may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaterParameters {
    /// °C
    pub temperature: Option<f64>,
    #[serde(rename = "pH")]
    pub ph: Option<f64>,
    pub ammonia: Option<f64>,
    pub nitrite: Option<f64>,
    pub nitrate: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterType {
    Freshwater,
    Saltwater,
    Brackish,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeUnit {
    #[default]
    Gallons,
    Liters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aquarium {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub water_type: WaterType,
    pub size: f64,
    pub unit: VolumeUnit,
    /// Number of active fish
    pub fish_count: usize,
    pub water_parameters: WaterParameters,
    pub last_water_change: DateTime<Utc>,
    /// Days between water changes
    pub water_change_frequency: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_water_change_frequency() -> u32 {
    7
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAquarium {
    pub name: String,
    #[serde(rename = "type")]
    pub water_type: WaterType,
    pub size: f64,
    #[serde(default)]
    pub unit: VolumeUnit,
    #[serde(default)]
    pub water_parameters: WaterParameters,
    pub last_water_change: Option<DateTime<Utc>>,
    #[serde(default = "default_water_change_frequency")]
    pub water_change_frequency: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeUnit {
    Days,
    Weeks,
    #[default]
    Months,
    Years,
}

impl AgeUnit {
    /// Days per unit
    pub fn days(&self) -> f64 {
        match self {
            AgeUnit::Days => 1.0,
            AgeUnit::Weeks => 7.0,
            AgeUnit::Months => 30.0,
            AgeUnit::Years => 365.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FishOrigin {
    WildCaught,
    CaptiveBred,
    StoreBought,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FishStatus {
    #[default]
    Healthy,
    Sick,
    Recovering,
    Deceased,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fish {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: f64,
    pub age_unit: AgeUnit,
    pub date_added: DateTime<Utc>,
    pub origin: FishOrigin,
    pub aquarium: Uuid,
    pub status: FishStatus,
    /// False once the fish is removed
    pub is_active: bool,
    pub last_health_check: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Fish {
    /// Age converted to days
    pub fn age_in_days(&self) -> f64 {
        self.age * self.age_unit.days()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFish {
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub age: f64,
    #[serde(default)]
    pub age_unit: AgeUnit,
    #[serde(default)]
    pub origin: FishOrigin,
    pub aquarium: Uuid,
}

/// Fields of a fish that may be changed after creation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FishUpdate {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<f64>,
    pub age_unit: Option<AgeUnit>,
    pub status: Option<FishStatus>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appetite {
    #[default]
    Normal,
    Reduced,
    None,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    #[default]
    Normal,
    Lethargic,
    Hyperactive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Social {
    #[default]
    Normal,
    Aggressive,
    Withdrawn,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Behavior {
    pub appetite: Appetite,
    pub activity: Activity,
    pub social: Social,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Physical {
    pub body_color: String,
    pub fin_condition: String,
    pub eye_clarity: String,
    pub body_shape: String,
}

impl Default for Physical {
    fn default() -> Self {
        Self {
            body_color: "normal".to_string(),
            fin_condition: "normal".to_string(),
            eye_clarity: "clear".to_string(),
            body_shape: "normal".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthLog {
    pub id: Uuid,
    pub owner: Uuid,
    pub fish: Uuid,
    pub observation_date: DateTime<Utc>,
    pub symptoms: SymptomObservation,
    pub behavior: Behavior,
    pub physical: Physical,
    pub water_parameters: WaterParameters,
    pub notes: Option<String>,
    pub ai_prediction: Option<Prediction>,
    /// An emergency symptom was present
    pub emergency: bool,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HealthLog {
    pub fn has_symptoms(&self) -> bool {
        self.symptoms.has_any()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHealthLog {
    pub fish: Uuid,
    pub observation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub symptoms: SymptomObservation,
    #[serde(default)]
    pub behavior: Behavior,
    #[serde(default)]
    pub physical: Physical,
    #[serde(default)]
    pub water_parameters: WaterParameters,
    pub notes: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Fields of a health log that may be changed after creation.
///
/// The stored prediction is left as it was.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthLogUpdate {
    pub observation_date: Option<DateTime<Utc>>,
    pub symptoms: Option<SymptomObservation>,
    pub behavior: Option<Behavior>,
    pub physical: Option<Physical>,
    pub water_parameters: Option<WaterParameters>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TreatmentStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TreatmentKind {
    #[default]
    Medication,
    WaterChange,
    SaltBath,
    Quarantine,
    DietChange,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreatmentResult {
    Effective,
    Ineffective,
    Partial,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub fish: Vec<Uuid>,
    pub aquarium: Option<Uuid>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub status: TreatmentStatus,
    #[serde(rename = "type")]
    pub kind: TreatmentKind,
    pub notes: Option<String>,
    pub results: TreatmentResult,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTreatment {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub fish: Vec<Uuid>,
    pub aquarium: Option<Uuid>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: TreatmentKind,
    pub notes: Option<String>,
}

/// Fields of a treatment that may be changed after creation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreatmentUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<TreatmentStatus>,
    pub results: Option<TreatmentResult>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub id: Uuid,
    pub owner: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub priority: AlertPriority,
    pub related_fish: Vec<Uuid>,
    pub related_aquarium: Option<Uuid>,
    pub is_read: bool,
    pub action_required: bool,
    pub action_taken: bool,
    pub trigger_date: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub data: Option<AlertData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AlertRecord {
    pub(crate) fn from_new(alert: NewAlert, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: alert.owner,
            title: alert.title.trim().to_string(),
            message: alert.message,
            kind: alert.kind,
            priority: alert.priority,
            related_fish: alert.related_fish,
            related_aquarium: alert.related_aquarium,
            is_read: false,
            action_required: alert.action_required,
            action_taken: false,
            trigger_date: alert.trigger_date,
            expiry_date: alert.expiry_date,
            data: alert.data,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Filters for listing alerts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertFilter {
    pub is_read: Option<bool>,
    #[serde(rename = "type")]
    pub kind: Option<AlertKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_in_days() {
        let now = Utc::now();
        let fish = Fish {
            id: Uuid::new_v4(),
            owner: Uuid::new_v4(),
            name: "Goldie".to_string(),
            species: "Goldfish".to_string(),
            breed: String::new(),
            age: 2.0,
            age_unit: AgeUnit::Weeks,
            date_added: now,
            origin: FishOrigin::default(),
            aquarium: Uuid::new_v4(),
            status: FishStatus::default(),
            is_active: true,
            last_health_check: now,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(fish.age_in_days(), 14.0);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&FishOrigin::WildCaught).unwrap(), "\"wild-caught\"");
        assert_eq!(serde_json::to_string(&TreatmentStatus::InProgress).unwrap(), "\"in-progress\"");
        assert_eq!(serde_json::to_string(&TreatmentKind::SaltBath).unwrap(), "\"salt-bath\"");
    }

    #[test]
    fn test_new_fish_defaults() {
        let aquarium = Uuid::new_v4();
        let json = format!(r#"{{"name": "Nemo", "species": "Clownfish", "aquarium": "{}"}}"#, aquarium);
        let fish: NewFish = serde_json::from_str(&json).unwrap();
        assert_eq!(fish.age_unit, AgeUnit::Months);
        assert_eq!(fish.origin, FishOrigin::Unknown);
        assert_eq!(fish.age, 0.0);
    }

    #[test]
    fn test_physical_defaults() {
        let physical: Physical = serde_json::from_str(r#"{"bodyColor": "pale"}"#).unwrap();
        assert_eq!(physical.body_color, "pale");
        assert_eq!(physical.eye_clarity, "clear");
    }
}

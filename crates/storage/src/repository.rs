//! Repository Implementation

use crate::page::{paginate, Page, PageRequest};
use crate::records::{
    AlertFilter, AlertRecord, Aquarium, Fish, FishStatus, FishUpdate, HealthLog, HealthLogUpdate,
    NewAquarium, NewFish, NewHealthLog, NewTreatment, Treatment, TreatmentStatus, TreatmentUpdate,
};
use crate::StorageError;
use alerting::{AlertKind, NewAlert};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};
use triage::Prediction;
use uuid::Uuid;

/// Everything the repository holds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Store {
    pub(crate) aquariums: HashMap<Uuid, Aquarium>,
    pub(crate) fish: HashMap<Uuid, Fish>,
    pub(crate) health_logs: HashMap<Uuid, HealthLog>,
    pub(crate) treatments: HashMap<Uuid, Treatment>,
    pub(crate) alerts: HashMap<Uuid, AlertRecord>,
    /// Owners who switched notifications off
    pub(crate) notifications_disabled: HashSet<Uuid>,
}

impl Store {
    fn refresh_fish_count(&mut self, aquarium_id: Uuid) {
        let count = self
            .fish
            .values()
            .filter(|f| f.aquarium == aquarium_id && f.is_active)
            .count();
        if let Some(aquarium) = self.aquariums.get_mut(&aquarium_id) {
            aquarium.fish_count = count;
        }
    }

    fn owns_aquarium(&self, owner: Uuid, id: Uuid) -> bool {
        self.aquariums.get(&id).is_some_and(|a| a.owner == owner)
    }

    fn owns_fish(&self, owner: Uuid, id: Uuid) -> bool {
        self.fish.get(&id).is_some_and(|f| f.owner == owner)
    }
}

/// Unread alert count alongside one page of alerts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPage {
    #[serde(flatten)]
    pub page: Page<AlertRecord>,
    pub unread_count: usize,
}

/// Owner-scoped repository (in-memory implementation)
///
/// Every lookup by id also matches the owner, so one owner's records are
/// invisible to another.
pub struct Repository {
    store: Mutex<Store>,
    /// Largest page size handed out
    max_page_size: usize,
}

impl Repository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        info!("Creating in-memory repository");
        Self::from_store(Store::default())
    }

    pub(crate) fn from_store(store: Store) -> Self {
        Self {
            store: Mutex::new(store),
            max_page_size: 100,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, StorageError> {
        self.store
            .lock()
            .map_err(|e| StorageError::DatabaseError(format!("Lock error: {}", e)))
    }

    pub(crate) fn clone_store(&self) -> Result<Store, StorageError> {
        Ok(self.lock()?.clone())
    }

    // ---- aquariums ----

    pub fn create_aquarium(&self, owner: Uuid, new: NewAquarium) -> Result<Aquarium, StorageError> {
        let now = Utc::now();
        let aquarium = Aquarium {
            id: Uuid::new_v4(),
            owner,
            name: new.name.trim().to_string(),
            water_type: new.water_type,
            size: new.size,
            unit: new.unit,
            fish_count: 0,
            water_parameters: new.water_parameters,
            last_water_change: new.last_water_change.unwrap_or(now),
            water_change_frequency: new.water_change_frequency,
            created_at: now,
            updated_at: now,
        };

        self.lock()?.aquariums.insert(aquarium.id, aquarium.clone());
        debug!("Created aquarium {}", aquarium.id);
        Ok(aquarium)
    }

    pub fn get_aquarium(&self, owner: Uuid, id: Uuid) -> Result<Aquarium, StorageError> {
        self.lock()?
            .aquariums
            .get(&id)
            .filter(|a| a.owner == owner)
            .cloned()
            .ok_or(StorageError::NotFound("Aquarium"))
    }

    /// Aquariums of one owner, newest first
    pub fn list_aquariums(&self, owner: Uuid) -> Result<Vec<Aquarium>, StorageError> {
        let store = self.lock()?;
        let mut aquariums: Vec<_> = store
            .aquariums
            .values()
            .filter(|a| a.owner == owner)
            .cloned()
            .collect();
        aquariums.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(aquariums)
    }

    /// Every aquarium of every owner, for the alert scheduler
    pub fn all_aquariums(&self) -> Result<Vec<Aquarium>, StorageError> {
        Ok(self.lock()?.aquariums.values().cloned().collect())
    }

    pub fn record_water_change(
        &self,
        owner: Uuid,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Aquarium, StorageError> {
        let mut store = self.lock()?;
        let aquarium = store
            .aquariums
            .get_mut(&id)
            .filter(|a| a.owner == owner)
            .ok_or(StorageError::NotFound("Aquarium"))?;
        aquarium.last_water_change = at;
        aquarium.updated_at = Utc::now();
        Ok(aquarium.clone())
    }

    // ---- fish ----

    /// Add a fish to one of the owner's aquariums
    pub fn create_fish(&self, owner: Uuid, new: NewFish) -> Result<Fish, StorageError> {
        let mut store = self.lock()?;
        if !store.owns_aquarium(owner, new.aquarium) {
            return Err(StorageError::NotFound("Aquarium"));
        }

        let now = Utc::now();
        let fish = Fish {
            id: Uuid::new_v4(),
            owner,
            name: new.name.trim().to_string(),
            species: new.species.trim().to_string(),
            breed: new.breed,
            age: new.age,
            age_unit: new.age_unit,
            date_added: now,
            origin: new.origin,
            aquarium: new.aquarium,
            status: FishStatus::Healthy,
            is_active: true,
            last_health_check: now,
            created_at: now,
            updated_at: now,
        };

        store.fish.insert(fish.id, fish.clone());
        store.refresh_fish_count(fish.aquarium);
        debug!("Created fish {} in aquarium {}", fish.id, fish.aquarium);
        Ok(fish)
    }

    pub fn get_fish(&self, owner: Uuid, id: Uuid) -> Result<Fish, StorageError> {
        self.lock()?
            .fish
            .get(&id)
            .filter(|f| f.owner == owner)
            .cloned()
            .ok_or(StorageError::NotFound("Fish"))
    }

    /// Active fish of one owner, newest first
    pub fn list_fish(&self, owner: Uuid) -> Result<Vec<Fish>, StorageError> {
        let store = self.lock()?;
        let mut fish: Vec<_> = store
            .fish
            .values()
            .filter(|f| f.owner == owner && f.is_active)
            .cloned()
            .collect();
        fish.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(fish)
    }

    /// Active fish in one aquarium
    pub fn fish_in_aquarium(&self, aquarium_id: Uuid) -> Result<Vec<Fish>, StorageError> {
        let store = self.lock()?;
        Ok(store
            .fish
            .values()
            .filter(|f| f.aquarium == aquarium_id && f.is_active)
            .cloned()
            .collect())
    }

    pub fn update_fish(&self, owner: Uuid, id: Uuid, update: FishUpdate) -> Result<Fish, StorageError> {
        let mut store = self.lock()?;
        let fish = store
            .fish
            .get_mut(&id)
            .filter(|f| f.owner == owner)
            .ok_or(StorageError::NotFound("Fish"))?;

        if let Some(name) = update.name {
            fish.name = name.trim().to_string();
        }
        if let Some(species) = update.species {
            fish.species = species.trim().to_string();
        }
        if let Some(breed) = update.breed {
            fish.breed = breed;
        }
        if let Some(age) = update.age {
            fish.age = age;
        }
        if let Some(age_unit) = update.age_unit {
            fish.age_unit = age_unit;
        }
        if let Some(status) = update.status {
            fish.status = status;
        }
        fish.updated_at = Utc::now();
        Ok(fish.clone())
    }

    /// Soft delete: the fish stays stored but is no longer listed
    pub fn deactivate_fish(&self, owner: Uuid, id: Uuid) -> Result<Fish, StorageError> {
        let mut store = self.lock()?;
        let fish = store
            .fish
            .get_mut(&id)
            .filter(|f| f.owner == owner)
            .ok_or(StorageError::NotFound("Fish"))?;
        fish.is_active = false;
        fish.updated_at = Utc::now();
        let fish = fish.clone();
        store.refresh_fish_count(fish.aquarium);
        info!("Deactivated fish {}", fish.id);
        Ok(fish)
    }

    /// Stamp a health check on a fish, marking it sick when symptoms were seen
    pub fn record_health_check(
        &self,
        owner: Uuid,
        id: Uuid,
        checked_at: DateTime<Utc>,
        symptomatic: bool,
    ) -> Result<Fish, StorageError> {
        let mut store = self.lock()?;
        let fish = store
            .fish
            .get_mut(&id)
            .filter(|f| f.owner == owner)
            .ok_or(StorageError::NotFound("Fish"))?;
        if symptomatic {
            fish.status = FishStatus::Sick;
        }
        fish.last_health_check = checked_at;
        fish.updated_at = Utc::now();
        Ok(fish.clone())
    }

    // ---- health logs ----

    /// Store a health log for one of the owner's fish
    pub fn create_health_log(
        &self,
        owner: Uuid,
        new: NewHealthLog,
        prediction: Option<Prediction>,
        emergency: bool,
    ) -> Result<HealthLog, StorageError> {
        let mut store = self.lock()?;
        if !store.owns_fish(owner, new.fish) {
            return Err(StorageError::NotFound("Fish"));
        }

        let now = Utc::now();
        let log = HealthLog {
            id: Uuid::new_v4(),
            owner,
            fish: new.fish,
            observation_date: new.observation_date.unwrap_or(now),
            symptoms: new.symptoms,
            behavior: new.behavior,
            physical: new.physical,
            water_parameters: new.water_parameters,
            notes: new.notes,
            ai_prediction: prediction,
            emergency,
            images: new.images,
            created_at: now,
            updated_at: now,
        };

        store.health_logs.insert(log.id, log.clone());
        debug!("Created health log {} for fish {}", log.id, log.fish);
        Ok(log)
    }

    pub fn get_health_log(&self, owner: Uuid, id: Uuid) -> Result<HealthLog, StorageError> {
        self.lock()?
            .health_logs
            .get(&id)
            .filter(|l| l.owner == owner)
            .cloned()
            .ok_or(StorageError::NotFound("Health log"))
    }

    /// Health logs of one owner, newest observation first
    pub fn health_logs(&self, owner: Uuid, fish: Option<Uuid>) -> Result<Vec<HealthLog>, StorageError> {
        let store = self.lock()?;
        let mut logs: Vec<_> = store
            .health_logs
            .values()
            .filter(|l| l.owner == owner && fish.map_or(true, |f| l.fish == f))
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.observation_date.cmp(&a.observation_date));
        Ok(logs)
    }

    pub fn list_health_logs(
        &self,
        owner: Uuid,
        fish: Option<Uuid>,
        request: PageRequest,
    ) -> Result<Page<HealthLog>, StorageError> {
        let logs = self.health_logs(owner, fish)?;
        Ok(paginate(logs, request.normalized(self.max_page_size)))
    }

    pub fn update_health_log(
        &self,
        owner: Uuid,
        id: Uuid,
        update: HealthLogUpdate,
    ) -> Result<HealthLog, StorageError> {
        let mut store = self.lock()?;
        let log = store
            .health_logs
            .get_mut(&id)
            .filter(|l| l.owner == owner)
            .ok_or(StorageError::NotFound("Health log"))?;

        if let Some(date) = update.observation_date {
            log.observation_date = date;
        }
        if let Some(symptoms) = update.symptoms {
            log.symptoms = symptoms;
        }
        if let Some(behavior) = update.behavior {
            log.behavior = behavior;
        }
        if let Some(physical) = update.physical {
            log.physical = physical;
        }
        if let Some(water) = update.water_parameters {
            log.water_parameters = water;
        }
        if let Some(notes) = update.notes {
            log.notes = Some(notes);
        }
        log.updated_at = Utc::now();
        Ok(log.clone())
    }

    pub fn delete_health_log(&self, owner: Uuid, id: Uuid) -> Result<HealthLog, StorageError> {
        let mut store = self.lock()?;
        if !store.health_logs.get(&id).is_some_and(|l| l.owner == owner) {
            return Err(StorageError::NotFound("Health log"));
        }
        store
            .health_logs
            .remove(&id)
            .ok_or(StorageError::NotFound("Health log"))
    }

    // ---- treatments ----

    /// Store a treatment; every referenced fish and aquarium must belong to the owner
    pub fn create_treatment(&self, owner: Uuid, new: NewTreatment) -> Result<Treatment, StorageError> {
        let mut store = self.lock()?;
        if new.fish.iter().any(|&f| !store.owns_fish(owner, f)) {
            return Err(StorageError::NotFound("Fish"));
        }
        if let Some(aquarium) = new.aquarium {
            if !store.owns_aquarium(owner, aquarium) {
                return Err(StorageError::NotFound("Aquarium"));
            }
        }

        let now = Utc::now();
        let treatment = Treatment {
            id: Uuid::new_v4(),
            owner,
            name: new.name.trim().to_string(),
            description: new.description,
            fish: new.fish,
            aquarium: new.aquarium,
            start_date: new.start_date.unwrap_or(now),
            end_date: new.end_date,
            dosage: new.dosage,
            frequency: new.frequency,
            status: TreatmentStatus::Planned,
            kind: new.kind,
            notes: new.notes,
            results: Default::default(),
            created_at: now,
            updated_at: now,
        };

        store.treatments.insert(treatment.id, treatment.clone());
        debug!("Created treatment {}", treatment.id);
        Ok(treatment)
    }

    pub fn get_treatment(&self, owner: Uuid, id: Uuid) -> Result<Treatment, StorageError> {
        self.lock()?
            .treatments
            .get(&id)
            .filter(|t| t.owner == owner)
            .cloned()
            .ok_or(StorageError::NotFound("Treatment"))
    }

    /// Treatments of one owner, latest start first
    pub fn treatments(
        &self,
        owner: Uuid,
        status: Option<TreatmentStatus>,
    ) -> Result<Vec<Treatment>, StorageError> {
        let store = self.lock()?;
        let mut treatments: Vec<_> = store
            .treatments
            .values()
            .filter(|t| t.owner == owner && status.map_or(true, |s| t.status == s))
            .cloned()
            .collect();
        treatments.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(treatments)
    }

    pub fn list_treatments(
        &self,
        owner: Uuid,
        status: Option<TreatmentStatus>,
        request: PageRequest,
    ) -> Result<Page<Treatment>, StorageError> {
        let treatments = self.treatments(owner, status)?;
        Ok(paginate(treatments, request.normalized(self.max_page_size)))
    }

    pub fn update_treatment(
        &self,
        owner: Uuid,
        id: Uuid,
        update: TreatmentUpdate,
    ) -> Result<Treatment, StorageError> {
        let mut store = self.lock()?;
        let treatment = store
            .treatments
            .get_mut(&id)
            .filter(|t| t.owner == owner)
            .ok_or(StorageError::NotFound("Treatment"))?;

        if let Some(name) = update.name {
            treatment.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            treatment.description = Some(description);
        }
        if let Some(status) = update.status {
            treatment.status = status;
        }
        if let Some(results) = update.results {
            treatment.results = results;
        }
        if let Some(notes) = update.notes {
            treatment.notes = Some(notes);
        }
        treatment.updated_at = Utc::now();
        Ok(treatment.clone())
    }

    pub fn delete_treatment(&self, owner: Uuid, id: Uuid) -> Result<Treatment, StorageError> {
        let mut store = self.lock()?;
        if !store.treatments.get(&id).is_some_and(|t| t.owner == owner) {
            return Err(StorageError::NotFound("Treatment"));
        }
        store
            .treatments
            .remove(&id)
            .ok_or(StorageError::NotFound("Treatment"))
    }

    // ---- alerts ----

    pub fn insert_alert(&self, alert: NewAlert) -> Result<AlertRecord, StorageError> {
        let record = AlertRecord::from_new(alert, Utc::now());
        self.lock()?.alerts.insert(record.id, record.clone());
        debug!("Inserted {:?} alert {}", record.kind, record.id);
        Ok(record)
    }

    /// Alerts of one owner, latest trigger first, with the owner's unread count
    pub fn list_alerts(
        &self,
        owner: Uuid,
        filter: AlertFilter,
        request: PageRequest,
    ) -> Result<AlertPage, StorageError> {
        let store = self.lock()?;
        let mut alerts: Vec<_> = store
            .alerts
            .values()
            .filter(|a| a.owner == owner)
            .filter(|a| filter.is_read.map_or(true, |r| a.is_read == r))
            .filter(|a| filter.kind.map_or(true, |k| a.kind == k))
            .cloned()
            .collect();
        alerts.sort_by(|a, b| b.trigger_date.cmp(&a.trigger_date));

        let unread_count = store
            .alerts
            .values()
            .filter(|a| a.owner == owner && !a.is_read)
            .count();

        Ok(AlertPage {
            page: paginate(alerts, request.normalized(self.max_page_size)),
            unread_count,
        })
    }

    pub fn mark_alert_read(&self, owner: Uuid, id: Uuid) -> Result<AlertRecord, StorageError> {
        let mut store = self.lock()?;
        let alert = store
            .alerts
            .get_mut(&id)
            .filter(|a| a.owner == owner)
            .ok_or(StorageError::NotFound("Alert"))?;
        alert.is_read = true;
        alert.updated_at = Utc::now();
        Ok(alert.clone())
    }

    /// Mark every unread alert of the owner as read; returns how many changed
    pub fn mark_all_alerts_read(&self, owner: Uuid) -> Result<usize, StorageError> {
        let mut store = self.lock()?;
        let now = Utc::now();
        let mut changed = 0;
        for alert in store.alerts.values_mut().filter(|a| a.owner == owner && !a.is_read) {
            alert.is_read = true;
            alert.updated_at = now;
            changed += 1;
        }
        Ok(changed)
    }

    pub fn delete_alert(&self, owner: Uuid, id: Uuid) -> Result<AlertRecord, StorageError> {
        let mut store = self.lock()?;
        if !store.alerts.get(&id).is_some_and(|a| a.owner == owner) {
            return Err(StorageError::NotFound("Alert"));
        }
        store.alerts.remove(&id).ok_or(StorageError::NotFound("Alert"))
    }

    /// Whether an unread alert of `kind` exists for an aquarium
    pub fn has_unread_alert(&self, aquarium_id: Uuid, kind: AlertKind) -> Result<bool, StorageError> {
        Ok(self
            .lock()?
            .alerts
            .values()
            .any(|a| a.related_aquarium == Some(aquarium_id) && a.kind == kind && !a.is_read))
    }

    // ---- preferences ----

    pub fn notifications_enabled(&self, owner: Uuid) -> Result<bool, StorageError> {
        Ok(!self.lock()?.notifications_disabled.contains(&owner))
    }

    pub fn set_notifications_enabled(&self, owner: Uuid, enabled: bool) -> Result<(), StorageError> {
        let mut store = self.lock()?;
        if enabled {
            store.notifications_disabled.remove(&owner);
        } else {
            store.notifications_disabled.insert(owner);
        }
        info!("Notifications for owner {} set to {}", owner, enabled);
        Ok(())
    }

    // ---- counts ----

    pub fn fish_count(&self) -> usize {
        self.lock().map(|s| s.fish.len()).unwrap_or(0)
    }

    pub fn health_log_count(&self) -> usize {
        self.lock().map(|s| s.health_logs.len()).unwrap_or(0)
    }

    pub fn alert_count(&self) -> usize {
        self.lock().map(|s| s.alerts.len()).unwrap_or(0)
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{TreatmentResult, VolumeUnit, WaterParameters, WaterType};
    use alerting::{AlertManager, FishSubject};
    use triage::{predict, Symptom, SymptomObservation};

    fn new_aquarium(name: &str) -> NewAquarium {
        NewAquarium {
            name: name.to_string(),
            water_type: WaterType::Freshwater,
            size: 20.0,
            unit: VolumeUnit::Gallons,
            water_parameters: WaterParameters::default(),
            last_water_change: None,
            water_change_frequency: 7,
        }
    }

    fn new_fish(aquarium: Uuid, name: &str) -> NewFish {
        NewFish {
            name: name.to_string(),
            species: "Betta".to_string(),
            breed: String::new(),
            age: 3.0,
            age_unit: Default::default(),
            origin: Default::default(),
            aquarium,
        }
    }

    fn new_log(fish: Uuid) -> NewHealthLog {
        NewHealthLog {
            fish,
            observation_date: None,
            symptoms: SymptomObservation::none(),
            behavior: Default::default(),
            physical: Default::default(),
            water_parameters: Default::default(),
            notes: None,
            images: Vec::new(),
        }
    }

    fn setup() -> (Repository, Uuid, Aquarium, Fish) {
        let repo = Repository::new();
        let owner = Uuid::new_v4();
        let aquarium = repo.create_aquarium(owner, new_aquarium("Main")).unwrap();
        let fish = repo.create_fish(owner, new_fish(aquarium.id, "  Blue  ")).unwrap();
        (repo, owner, aquarium, fish)
    }

    #[test]
    fn test_fish_insert_and_count() {
        let (repo, owner, aquarium, fish) = setup();
        assert_eq!(fish.name, "Blue");
        assert_eq!(repo.get_aquarium(owner, aquarium.id).unwrap().fish_count, 1);

        repo.deactivate_fish(owner, fish.id).unwrap();
        assert_eq!(repo.get_aquarium(owner, aquarium.id).unwrap().fish_count, 0);
        assert!(repo.list_fish(owner).unwrap().is_empty());
        // soft delete keeps the record
        assert!(!repo.get_fish(owner, fish.id).unwrap().is_active);
    }

    #[test]
    fn test_fish_requires_owned_aquarium() {
        let (repo, _, aquarium, _) = setup();
        let stranger = Uuid::new_v4();
        let err = repo.create_fish(stranger, new_fish(aquarium.id, "Intruder")).unwrap_err();
        assert!(matches!(err, StorageError::NotFound("Aquarium")));
    }

    #[test]
    fn test_owner_isolation() {
        let (repo, _, _, fish) = setup();
        let stranger = Uuid::new_v4();
        assert!(repo.get_fish(stranger, fish.id).is_err());
        assert!(repo.list_fish(stranger).unwrap().is_empty());
        assert!(repo.create_health_log(stranger, new_log(fish.id), None, false).is_err());
    }

    #[test]
    fn test_health_check_marks_sick() {
        let (repo, owner, _, fish) = setup();
        let at = Utc::now();

        let unchanged = repo.record_health_check(owner, fish.id, at, false).unwrap();
        assert_eq!(unchanged.status, FishStatus::Healthy);
        assert_eq!(unchanged.last_health_check, at);

        let sick = repo.record_health_check(owner, fish.id, at, true).unwrap();
        assert_eq!(sick.status, FishStatus::Sick);
    }

    #[test]
    fn test_health_log_pagination_and_filter() {
        let (repo, owner, aquarium, fish) = setup();
        let other = repo.create_fish(owner, new_fish(aquarium.id, "Red")).unwrap();
        let base = Utc::now();

        for i in 0..15 {
            let mut log = new_log(fish.id);
            log.observation_date = Some(base - chrono::Duration::days(i));
            repo.create_health_log(owner, log, None, false).unwrap();
        }
        repo.create_health_log(owner, new_log(other.id), None, false).unwrap();

        let page = repo
            .list_health_logs(owner, Some(fish.id), PageRequest::new(1, 10))
            .unwrap();
        assert_eq!(page.total, 15);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.data.len(), 10);
        assert_eq!(page.data[0].observation_date, base);

        let all = repo.list_health_logs(owner, None, PageRequest::new(2, 10)).unwrap();
        assert_eq!(all.total, 16);
        assert_eq!(all.data.len(), 6);
    }

    #[test]
    fn test_health_log_update_keeps_prediction() {
        let (repo, owner, _, fish) = setup();
        let obs = SymptomObservation::with_symptoms([Symptom::FinRot, Symptom::Lesions]);
        let p = predict(&obs);
        let mut log = new_log(fish.id);
        log.symptoms = obs;
        let log = repo.create_health_log(owner, log, Some(p.clone()), true).unwrap();

        let updated = repo
            .update_health_log(
                owner,
                log.id,
                HealthLogUpdate {
                    symptoms: Some(SymptomObservation::none()),
                    notes: Some("recovering".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(!updated.has_symptoms());
        assert_eq!(updated.ai_prediction, Some(p));
        assert_eq!(updated.notes.as_deref(), Some("recovering"));

        repo.delete_health_log(owner, log.id).unwrap();
        assert!(repo.get_health_log(owner, log.id).is_err());
    }

    #[test]
    fn test_treatment_lifecycle() {
        let (repo, owner, aquarium, fish) = setup();
        let treatment = repo
            .create_treatment(
                owner,
                NewTreatment {
                    name: "Ich-X".to_string(),
                    description: None,
                    fish: vec![fish.id],
                    aquarium: Some(aquarium.id),
                    start_date: None,
                    end_date: None,
                    dosage: Some("5ml".to_string()),
                    frequency: Some("daily".to_string()),
                    kind: Default::default(),
                    notes: None,
                },
            )
            .unwrap();
        assert_eq!(treatment.status, TreatmentStatus::Planned);

        let done = repo
            .update_treatment(
                owner,
                treatment.id,
                TreatmentUpdate {
                    status: Some(TreatmentStatus::Completed),
                    results: Some(TreatmentResult::Effective),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(done.results, TreatmentResult::Effective);

        let completed = repo
            .list_treatments(owner, Some(TreatmentStatus::Completed), PageRequest::default())
            .unwrap();
        assert_eq!(completed.total, 1);
        let planned = repo
            .list_treatments(owner, Some(TreatmentStatus::Planned), PageRequest::default())
            .unwrap();
        assert_eq!(planned.total, 0);
    }

    #[test]
    fn test_treatment_rejects_foreign_fish() {
        let (repo, _, _, fish) = setup();
        let stranger = Uuid::new_v4();
        let new = NewTreatment {
            name: "Salt".to_string(),
            description: None,
            fish: vec![fish.id],
            aquarium: None,
            start_date: None,
            end_date: None,
            dosage: None,
            frequency: None,
            kind: Default::default(),
            notes: None,
        };
        assert!(matches!(
            repo.create_treatment(stranger, new),
            Err(StorageError::NotFound("Fish"))
        ));
    }

    #[test]
    fn test_alerts_read_state() {
        let (repo, owner, aquarium, fish) = setup();
        let manager = AlertManager::default();
        let p = predict(&SymptomObservation::with_symptoms([
            Symptom::WhiteSpots,
            Symptom::LossOfAppetite,
        ]));
        let subject = FishSubject {
            id: fish.id,
            name: &fish.name,
            aquarium: Some(aquarium.id),
        };
        let alert = manager.health_alert(owner, subject, &p, Utc::now()).unwrap();
        let first = repo.insert_alert(alert.clone()).unwrap();
        repo.insert_alert(alert).unwrap();

        let page = repo
            .list_alerts(owner, AlertFilter::default(), PageRequest::default())
            .unwrap();
        assert_eq!(page.unread_count, 2);
        assert!(repo.has_unread_alert(aquarium.id, AlertKind::Health).unwrap());

        repo.mark_alert_read(owner, first.id).unwrap();
        let unread = repo
            .list_alerts(
                owner,
                AlertFilter {
                    is_read: Some(false),
                    kind: None,
                },
                PageRequest::default(),
            )
            .unwrap();
        assert_eq!(unread.page.total, 1);
        assert_eq!(unread.unread_count, 1);

        assert_eq!(repo.mark_all_alerts_read(owner).unwrap(), 1);
        assert!(!repo.has_unread_alert(aquarium.id, AlertKind::Health).unwrap());
        assert_eq!(repo.mark_all_alerts_read(owner).unwrap(), 0);
    }

    #[test]
    fn test_notification_preference() {
        let repo = Repository::new();
        let owner = Uuid::new_v4();
        assert!(repo.notifications_enabled(owner).unwrap());
        repo.set_notifications_enabled(owner, false).unwrap();
        assert!(!repo.notifications_enabled(owner).unwrap());
    }
}

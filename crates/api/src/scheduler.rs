//! Scheduled Alert Checks

use crate::SharedState;
use alerting::{AlertKind, AlertManager, WaterChangeSchedule};
use chrono::{DateTime, Utc};
use std::time::Duration;
use storage::{Repository, StorageError};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// Create water change reminders that are due at `now`.
///
/// Skips owners with notifications off and aquariums that already have an
/// unread maintenance alert. Returns the number of reminders created.
pub fn check_scheduled_alerts(
    repository: &Repository,
    alerts: &AlertManager,
    now: DateTime<Utc>,
) -> Result<usize, StorageError> {
    let mut created = 0;

    for aquarium in repository.all_aquariums()? {
        if !repository.notifications_enabled(aquarium.owner)? {
            continue;
        }

        let schedule = WaterChangeSchedule {
            aquarium_id: aquarium.id,
            aquarium_name: &aquarium.name,
            last_water_change: aquarium.last_water_change,
            frequency_days: aquarium.water_change_frequency,
        };
        if !schedule.is_due(now) {
            continue;
        }
        if repository.has_unread_alert(aquarium.id, AlertKind::Maintenance)? {
            debug!("Aquarium {} already has an unread maintenance alert", aquarium.id);
            continue;
        }

        if let Some(reminder) = alerts.water_change_reminder(aquarium.owner, &schedule) {
            repository.insert_alert(reminder)?;
            created += 1;
        }
    }

    Ok(created)
}

/// Run [`check_scheduled_alerts`] every `period`
pub fn spawn_alert_scheduler(state: SharedState, period: Duration) -> JoinHandle<()> {
    info!("Scheduling alert checks every {}s", period.as_secs());
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let state = state.read().await;
            match check_scheduled_alerts(&state.repository, &state.alerts, Utc::now()) {
                Ok(created) => {
                    metrics::counter!("maintenance_alerts_total").increment(created as u64);
                    info!("Scheduled alert check completed ({} created)", created);
                }
                Err(e) => error!("Error in scheduled alert check: {}", e),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use storage::{NewAquarium, VolumeUnit, WaterParameters, WaterType};
    use uuid::Uuid;

    fn aquarium_changed(repo: &Repository, owner: Uuid, days_ago: i64) -> Uuid {
        repo.create_aquarium(
            owner,
            NewAquarium {
                name: "Planted".to_string(),
                water_type: WaterType::Freshwater,
                size: 40.0,
                unit: VolumeUnit::Liters,
                water_parameters: WaterParameters::default(),
                last_water_change: Some(Utc::now() - ChronoDuration::days(days_ago)),
                water_change_frequency: 7,
            },
        )
        .unwrap()
        .id
    }

    #[test]
    fn test_due_aquarium_gets_one_reminder() {
        let repo = Repository::new();
        let manager = AlertManager::default();
        let owner = Uuid::new_v4();
        aquarium_changed(&repo, owner, 8);
        aquarium_changed(&repo, owner, 2);

        assert_eq!(check_scheduled_alerts(&repo, &manager, Utc::now()).unwrap(), 1);
        // unread reminder suppresses a duplicate
        assert_eq!(check_scheduled_alerts(&repo, &manager, Utc::now()).unwrap(), 0);

        repo.mark_all_alerts_read(owner).unwrap();
        assert_eq!(check_scheduled_alerts(&repo, &manager, Utc::now()).unwrap(), 1);
    }

    #[test]
    fn test_notifications_disabled() {
        let repo = Repository::new();
        let manager = AlertManager::default();
        let owner = Uuid::new_v4();
        aquarium_changed(&repo, owner, 30);
        repo.set_notifications_enabled(owner, false).unwrap();

        assert_eq!(check_scheduled_alerts(&repo, &manager, Utc::now()).unwrap(), 0);
    }

    #[test]
    fn test_unschedulable_aquarium_is_skipped() {
        let repo = Repository::new();
        let manager = AlertManager::default();
        let owner = Uuid::new_v4();
        repo.create_aquarium(
            owner,
            NewAquarium {
                name: "Broken".to_string(),
                water_type: WaterType::Freshwater,
                size: 40.0,
                unit: VolumeUnit::Liters,
                water_parameters: WaterParameters::default(),
                last_water_change: Some(DateTime::<Utc>::MAX_UTC - ChronoDuration::days(1)),
                water_change_frequency: 7,
            },
        )
        .unwrap();
        aquarium_changed(&repo, owner, 8);

        // the broken aquarium must not stop the others from being checked
        assert_eq!(check_scheduled_alerts(&repo, &manager, Utc::now()).unwrap(), 1);
    }

    #[test]
    fn test_water_change_resets_schedule() {
        let repo = Repository::new();
        let manager = AlertManager::default();
        let owner = Uuid::new_v4();
        let id = aquarium_changed(&repo, owner, 10);
        repo.record_water_change(owner, id, Utc::now()).unwrap();

        assert_eq!(check_scheduled_alerts(&repo, &manager, Utc::now()).unwrap(), 0);
    }
}

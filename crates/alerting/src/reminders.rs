//! Maintenance and Treatment Reminders

use crate::alert::{format_date, AlertData, AlertKind, NewAlert};
use crate::manager::AlertManager;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

/// Water change schedule of one aquarium
#[derive(Debug, Clone, Copy)]
pub struct WaterChangeSchedule<'a> {
    pub aquarium_id: Uuid,
    pub aquarium_name: &'a str,
    pub last_water_change: DateTime<Utc>,
    /// Days between water changes
    pub frequency_days: u32,
}

impl WaterChangeSchedule<'_> {
    /// When the next water change is due; `None` past the representable range
    pub fn next_change(&self) -> Option<DateTime<Utc>> {
        self.last_water_change
            .checked_add_signed(Duration::days(i64::from(self.frequency_days)))
    }

    /// Whether a water change is due at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.next_change() {
            Some(next) => now >= next,
            None => {
                warn!(
                    "Aquarium {} has an unschedulable last water change {}",
                    self.aquarium_id, self.last_water_change
                );
                false
            }
        }
    }
}

/// The treatment a reminder refers to
#[derive(Debug, Clone, Copy)]
pub struct TreatmentSubject<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub frequency: Option<&'a str>,
    pub fish: &'a [Uuid],
    pub aquarium: Option<Uuid>,
    pub end_date: Option<DateTime<Utc>>,
}

fn expire_after(from: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    Duration::try_days(days).and_then(|d| from.checked_add_signed(d))
}

impl AlertManager {
    /// Reminder that an aquarium's water change is due, triggering at the due date
    pub fn water_change_reminder(
        &self,
        owner: Uuid,
        schedule: &WaterChangeSchedule<'_>,
    ) -> Option<NewAlert> {
        let next_change = schedule.next_change()?;
        let title = format!("Water Change Due for {}", schedule.aquarium_name);
        let message = format!(
            "It's time for a water change in {}. Last change was on {}.",
            schedule.aquarium_name,
            format_date(schedule.last_water_change)
        );

        let mut alert = NewAlert::new(owner, AlertKind::Maintenance, title, message, next_change);
        alert.related_aquarium = Some(schedule.aquarium_id);
        alert.action_required = true;
        alert.expiry_date = expire_after(next_change, self.config().maintenance_expiry_days);

        debug!("Built water change reminder for aquarium {}", schedule.aquarium_id);
        Some(alert)
    }

    /// Alert announcing a newly started treatment
    pub fn treatment_started(
        &self,
        owner: Uuid,
        treatment: &TreatmentSubject<'_>,
        now: DateTime<Utc>,
    ) -> NewAlert {
        let title = format!("Treatment Started: {}", treatment.name);
        let message = format!(
            "You've started a new treatment. Next dose: {}",
            treatment.frequency.unwrap_or("as directed")
        );

        let mut alert = NewAlert::new(owner, AlertKind::Reminder, title, message, now);
        alert.related_fish = treatment.fish.to_vec();
        alert.related_aquarium = treatment.aquarium;
        alert.action_required = true;
        alert.expiry_date = treatment
            .end_date
            .or_else(|| expire_after(now, self.config().treatment_expiry_days));
        alert
    }

    /// Reminder that the next dose of a treatment is due
    pub fn treatment_reminder(
        &self,
        owner: Uuid,
        treatment: &TreatmentSubject<'_>,
        now: DateTime<Utc>,
    ) -> NewAlert {
        let title = format!("Treatment Reminder: {}", treatment.name);
        let message = format!("It's time for the next dose of {} for your fish.", treatment.name);

        let mut alert = NewAlert::new(owner, AlertKind::Reminder, title, message, now);
        alert.related_fish = treatment.fish.to_vec();
        alert.related_aquarium = treatment.aquarium;
        alert.action_required = true;
        alert.data = Some(AlertData::Treatment {
            treatment_id: treatment.id,
        });
        alert
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertPriority;
    use chrono::TimeZone;

    fn schedule(last: DateTime<Utc>, frequency_days: u32) -> WaterChangeSchedule<'static> {
        WaterChangeSchedule {
            aquarium_id: Uuid::new_v4(),
            aquarium_name: "Reef Tank",
            last_water_change: last,
            frequency_days,
        }
    }

    #[test]
    fn test_water_change_due() {
        let last = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let s = schedule(last, 7);

        assert_eq!(s.next_change(), Some(Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap()));
        assert!(!s.is_due(Utc.with_ymd_and_hms(2025, 1, 8, 11, 59, 59).unwrap()));
        assert!(s.is_due(Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap()));
    }

    #[test]
    fn test_far_future_change_is_never_due() {
        let s = schedule(DateTime::<Utc>::MAX_UTC - Duration::days(3), 7);

        assert_eq!(s.next_change(), None);
        assert!(!s.is_due(DateTime::<Utc>::MAX_UTC));
        assert!(AlertManager::default()
            .water_change_reminder(Uuid::new_v4(), &s)
            .is_none());
    }

    #[test]
    fn test_water_change_reminder() {
        let manager = AlertManager::default();
        let last = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let s = schedule(last, 7);

        let alert = manager.water_change_reminder(Uuid::new_v4(), &s).unwrap();
        let next = s.next_change().unwrap();
        assert_eq!(alert.title, "Water Change Due for Reef Tank");
        assert_eq!(
            alert.message,
            "It's time for a water change in Reef Tank. Last change was on Jan 1, 2025."
        );
        assert_eq!(alert.kind, AlertKind::Maintenance);
        assert_eq!(alert.priority, AlertPriority::Medium);
        assert_eq!(alert.trigger_date, next);
        assert_eq!(alert.expiry_date, Some(next + Duration::days(2)));
        assert_eq!(alert.related_aquarium, Some(s.aquarium_id));
    }

    #[test]
    fn test_treatment_started_default_expiry() {
        let manager = AlertManager::default();
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let fish = [Uuid::new_v4()];
        let t = TreatmentSubject {
            id: Uuid::new_v4(),
            name: "Salt bath",
            frequency: Some("daily"),
            fish: &fish,
            aquarium: None,
            end_date: None,
        };

        let alert = manager.treatment_started(Uuid::new_v4(), &t, now);
        assert_eq!(alert.title, "Treatment Started: Salt bath");
        assert_eq!(alert.message, "You've started a new treatment. Next dose: daily");
        assert_eq!(alert.expiry_date, Some(now + Duration::days(7)));
        assert_eq!(alert.related_fish, fish.to_vec());
    }

    #[test]
    fn test_treatment_reminder_carries_id() {
        let manager = AlertManager::default();
        let t = TreatmentSubject {
            id: Uuid::new_v4(),
            name: "Ich-X",
            frequency: None,
            fish: &[],
            aquarium: None,
            end_date: None,
        };

        let alert = manager.treatment_reminder(Uuid::new_v4(), &t, Utc::now());
        assert_eq!(alert.message, "It's time for the next dose of Ich-X for your fish.");
        assert_eq!(alert.data, Some(AlertData::Treatment { treatment_id: t.id }));
    }
}

//! Field Validator

use crate::error::ValidationError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Max length of notes fields
    pub notes_max_len: usize,
    /// Max length of treatment descriptions
    pub description_max_len: usize,
    /// Max images attached to one health log
    pub max_images: usize,
    /// Water temperature valid range (°C)
    pub temperature_range: (f64, f64),
    /// pH valid range
    pub ph_range: (f64, f64),
    /// Ammonia, nitrite and nitrate lower bound (ppm)
    pub min_concentration: f64,
    /// Aquarium volume valid range
    pub size_range: (f64, f64),
    /// Days between water changes
    pub water_change_frequency_range: (f64, f64),
    /// Fish age valid range, in the fish's own unit
    pub age_range: (f64, f64),
    /// How far past now a recorded date may lie, in days
    pub max_future_days: i64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            notes_max_len: 1000,
            description_max_len: 500,
            max_images: 5,
            temperature_range: (0.0, 45.0),
            ph_range: (0.0, 14.0),
            min_concentration: 0.0,
            size_range: (1.0, 100_000.0),
            water_change_frequency_range: (1.0, 365.0),
            age_range: (0.0, 10_000.0),
            max_future_days: 1,
        }
    }
}

/// Collected outcome of validating one request
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Every failed check
    pub errors: Vec<ValidationError>,
    /// Number of checks run
    pub fields_checked: usize,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one check
    pub fn check(&mut self, outcome: Result<(), ValidationError>) -> &mut Self {
        self.fields_checked += 1;
        if let Err(e) = outcome {
            self.errors.push(e);
        }
        self
    }

    /// Whether every check passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<(), Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Validator for request fields
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if value.is_nan() || value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Text must contain something other than whitespace
    pub fn require_text(&self, field: &'static str, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(ValidationError::Required(field))
        } else {
            Ok(())
        }
    }

    /// Text must not exceed `max` characters
    pub fn validate_max_len(
        &self,
        field: &'static str,
        value: &str,
        max: usize,
    ) -> Result<(), ValidationError> {
        let actual = value.chars().count();
        if actual > max {
            Err(ValidationError::TooLong { field, max, actual })
        } else {
            Ok(())
        }
    }

    /// Validate a notes field
    pub fn validate_notes(&self, notes: Option<&str>) -> Result<(), ValidationError> {
        match notes {
            Some(n) => self.validate_max_len("notes", n, self.config.notes_max_len),
            None => Ok(()),
        }
    }

    /// Validate a treatment description
    pub fn validate_description(&self, description: Option<&str>) -> Result<(), ValidationError> {
        match description {
            Some(d) => self.validate_max_len("description", d, self.config.description_max_len),
            None => Ok(()),
        }
    }

    /// Validate the number of attached images
    pub fn validate_images(&self, count: usize) -> Result<(), ValidationError> {
        if count > self.config.max_images {
            Err(ValidationError::TooMany {
                field: "images",
                max: self.config.max_images,
                actual: count,
            })
        } else {
            Ok(())
        }
    }

    /// Validate water temperature
    pub fn validate_temperature(&self, temp: f64) -> Result<(), ValidationError> {
        self.validate_range("temperature", temp, self.config.temperature_range)
    }

    /// Validate pH
    pub fn validate_ph(&self, ph: f64) -> Result<(), ValidationError> {
        self.validate_range("pH", ph, self.config.ph_range)
    }

    /// Validate an ammonia, nitrite or nitrate reading
    pub fn validate_concentration(&self, field: &'static str, ppm: f64) -> Result<(), ValidationError> {
        self.validate_range(field, ppm, (self.config.min_concentration, f64::MAX))
    }

    /// Validate aquarium volume
    pub fn validate_size(&self, size: f64) -> Result<(), ValidationError> {
        self.validate_range("size", size, self.config.size_range)
    }

    /// Validate days between water changes
    pub fn validate_water_change_frequency(&self, days: u32) -> Result<(), ValidationError> {
        self.validate_range(
            "waterChangeFrequency",
            f64::from(days),
            self.config.water_change_frequency_range,
        )
    }

    /// Validate fish age
    pub fn validate_age(&self, age: f64) -> Result<(), ValidationError> {
        self.validate_range("age", age, self.config.age_range)
    }

    /// A recorded date may be at most `max_future_days` after `now`
    pub fn validate_not_future(
        &self,
        field: &'static str,
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        let latest = Duration::try_days(self.config.max_future_days)
            .and_then(|d| now.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        if date > latest {
            Err(ValidationError::TooLate { field, latest })
        } else {
            Ok(())
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

//! Request Validation

use chrono::{DateTime, Utc};
use data_validator::{ValidationError, ValidationResult, Validator};
use storage::{
    FishUpdate, HealthLogUpdate, NewAquarium, NewFish, NewHealthLog, NewTreatment, TreatmentUpdate,
    WaterParameters,
};

fn check_water(result: &mut ValidationResult, validator: &Validator, water: &WaterParameters) {
    if let Some(t) = water.temperature {
        result.check(validator.validate_temperature(t));
    }
    if let Some(ph) = water.ph {
        result.check(validator.validate_ph(ph));
    }
    for (field, value) in [
        ("ammonia", water.ammonia),
        ("nitrite", water.nitrite),
        ("nitrate", water.nitrate),
    ] {
        if let Some(ppm) = value {
            result.check(validator.validate_concentration(field, ppm));
        }
    }
}

fn check_date(
    result: &mut ValidationResult,
    validator: &Validator,
    field: &'static str,
    date: Option<DateTime<Utc>>,
) {
    if let Some(date) = date {
        result.check(validator.validate_not_future(field, date, Utc::now()));
    }
}

pub fn new_aquarium(validator: &Validator, new: &NewAquarium) -> Result<(), Vec<ValidationError>> {
    let mut result = ValidationResult::new();
    result
        .check(validator.require_text("name", &new.name))
        .check(validator.validate_size(new.size))
        .check(validator.validate_water_change_frequency(new.water_change_frequency));
    check_date(&mut result, validator, "lastWaterChange", new.last_water_change);
    check_water(&mut result, validator, &new.water_parameters);
    result.into_result()
}

pub fn new_fish(validator: &Validator, new: &NewFish) -> Result<(), Vec<ValidationError>> {
    let mut result = ValidationResult::new();
    result
        .check(validator.require_text("species", &new.species))
        .check(validator.require_text("name", &new.name))
        .check(validator.validate_age(new.age));
    result.into_result()
}

pub fn fish_update(validator: &Validator, update: &FishUpdate) -> Result<(), Vec<ValidationError>> {
    let mut result = ValidationResult::new();
    if let Some(name) = &update.name {
        result.check(validator.require_text("name", name));
    }
    if let Some(species) = &update.species {
        result.check(validator.require_text("species", species));
    }
    if let Some(age) = update.age {
        result.check(validator.validate_age(age));
    }
    result.into_result()
}

pub fn new_health_log(validator: &Validator, new: &NewHealthLog) -> Result<(), Vec<ValidationError>> {
    let mut result = ValidationResult::new();
    result
        .check(validator.validate_notes(new.notes.as_deref()))
        .check(validator.validate_images(new.images.len()));
    check_date(&mut result, validator, "observationDate", new.observation_date);
    check_water(&mut result, validator, &new.water_parameters);
    result.into_result()
}

pub fn health_log_update(
    validator: &Validator,
    update: &HealthLogUpdate,
) -> Result<(), Vec<ValidationError>> {
    let mut result = ValidationResult::new();
    result.check(validator.validate_notes(update.notes.as_deref()));
    check_date(&mut result, validator, "observationDate", update.observation_date);
    if let Some(water) = &update.water_parameters {
        check_water(&mut result, validator, water);
    }
    result.into_result()
}

pub fn new_treatment(validator: &Validator, new: &NewTreatment) -> Result<(), Vec<ValidationError>> {
    let mut result = ValidationResult::new();
    result
        .check(validator.require_text("name", &new.name))
        .check(validator.validate_description(new.description.as_deref()))
        .check(validator.validate_notes(new.notes.as_deref()));
    check_date(&mut result, validator, "startDate", new.start_date);
    result.into_result()
}

pub fn treatment_update(
    validator: &Validator,
    update: &TreatmentUpdate,
) -> Result<(), Vec<ValidationError>> {
    let mut result = ValidationResult::new();
    if let Some(name) = &update.name {
        result.check(validator.require_text("name", name));
    }
    result
        .check(validator.validate_description(update.description.as_deref()))
        .check(validator.validate_notes(update.notes.as_deref()));
    result.into_result()
}

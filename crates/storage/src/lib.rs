//! Storage Layer
//!
//! Owner-scoped repository for aquariums, fish, health logs, treatments and
//! alerts, with pagination and postcard snapshots.

mod page;
mod records;
mod repository;
mod snapshot;

pub use page::{paginate, Page, PageRequest};
pub use records::{
    Activity, AgeUnit, AlertFilter, AlertRecord, Appetite, Aquarium, Behavior, Fish, FishOrigin,
    FishStatus, FishUpdate, HealthLog, HealthLogUpdate, NewAquarium, NewFish, NewHealthLog,
    NewTreatment, Physical, Social, Treatment, TreatmentKind, TreatmentResult, TreatmentStatus,
    TreatmentUpdate, VolumeUnit, WaterParameters, WaterType,
};
pub use repository::{AlertPage, Repository};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Input Validation
//!
//! Required-field, length and range checks for aquarium, fish, health log
//! and treatment input.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{Validator, ValidationConfig, ValidationResult};

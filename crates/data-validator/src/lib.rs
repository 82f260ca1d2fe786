//! Form Validation
//!
//! Range and option checking for vehicle valuation requests.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ValidationConfig, ValidationResult, Validator};

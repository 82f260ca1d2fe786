//! Validation Error Types

use serde::Serialize;
use thiserror::Error;

/// Errors during form validation
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// Value is not a multiple of the slider step
    #[error("{field} value {value} is not a multiple of {step}")]
    OffStep {
        field: &'static str,
        value: u32,
        step: u32,
    },

    /// Value is not one of the enumerated options
    #[error("{field} value {value} is not one of {options:?}")]
    NotAnOption {
        field: &'static str,
        value: u8,
        options: Vec<u8>,
    },
}

impl ValidationError {
    /// Form field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { field, .. }
            | ValidationError::OffStep { field, .. }
            | ValidationError::NotAnOption { field, .. } => field,
        }
    }
}

//! Form Validator for Range and Option Checking

use crate::error::ValidationError;
use feature_engine::{VehicleForm, CYLINDER_OPTIONS, DOOR_OPTIONS};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Power valid range (CV)
    pub power_range: (u32, u32),
    /// Power slider step (CV)
    pub power_step: u32,
    /// Age valid range (years)
    pub age_range: (u32, u32),
    /// Selectable cylinder counts
    pub cylinder_options: Vec<u8>,
    /// Selectable door counts
    pub door_options: Vec<u8>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            power_range: (50, 600),
            power_step: 10,
            age_range: (0, 25),
            cylinder_options: CYLINDER_OPTIONS.to_vec(),
            door_options: DOOR_OPTIONS.to_vec(),
        }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked,
        }
    }

    /// Convert into a `Result`, keeping every error
    pub fn into_result(self) -> Result<(), Vec<ValidationError>> {
        if self.valid {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Validator for vehicle valuation forms
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a single value against an inclusive range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: u32,
        range: (u32, u32),
    ) -> Result<(), ValidationError> {
        if value < range.0 || value > range.1 {
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

    /// Validate power: in range and on the slider step, offset from the minimum
    pub fn validate_power(&self, power_cv: u32) -> Result<(), ValidationError> {
        self.validate_range("power_cv", power_cv, self.config.power_range)?;
        let step = self.config.power_step;
        if step > 1 && (power_cv - self.config.power_range.0) % step != 0 {
            return Err(ValidationError::OffStep {
                field: "power_cv",
                value: power_cv,
                step,
            });
        }
        Ok(())
    }

    /// Validate vehicle age
    pub fn validate_age(&self, age_years: u32) -> Result<(), ValidationError> {
        self.validate_range("age_years", age_years, self.config.age_range)
    }

    /// Validate cylinder count
    pub fn validate_cylinders(&self, cylinders: u8) -> Result<(), ValidationError> {
        Self::validate_option("cylinders", cylinders, &self.config.cylinder_options)
    }

    /// Validate door count
    pub fn validate_doors(&self, doors: u8) -> Result<(), ValidationError> {
        Self::validate_option("doors", doors, &self.config.door_options)
    }

    fn validate_option(
        field: &'static str,
        value: u8,
        options: &[u8],
    ) -> Result<(), ValidationError> {
        if options.contains(&value) {
            Ok(())
        } else {
            Err(ValidationError::NotAnOption {
                field,
                value,
                options: options.to_vec(),
            })
        }
    }

    /// Validate every numeric field of a form, collecting all errors.
    /// Categorical fields are closed enums and need no runtime check.
    pub fn validate(&self, form: &VehicleForm) -> ValidationResult {
        let checks = [
            self.validate_power(form.power_cv),
            self.validate_age(form.age_years),
            self.validate_cylinders(form.cylinders),
            self.validate_doors(form.doors),
        ];
        let fields_checked = checks.len();

        let errors: Vec<ValidationError> = checks.into_iter().filter_map(Result::err).collect();
        if errors.is_empty() {
            ValidationResult::valid(fields_checked)
        } else {
            debug!("Form rejected with {} errors", errors.len());
            ValidationResult::invalid(errors, fields_checked)
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

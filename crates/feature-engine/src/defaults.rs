//! Default Table
//!
//! Fallback values for fields the form does not collect. Built once at startup
//! and never mutated afterwards.

use crate::error::SchemaError;
use crate::field::Field;
use crate::value::FeatureValue;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Immutable field -> fallback value table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DefaultTable {
    values: BTreeMap<Field, FeatureValue>,
}

impl DefaultTable {
    /// Table with no defaults
    pub fn empty() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Built-in defaults every model revision was trained against
    pub fn builtin() -> Self {
        let values = BTreeMap::from([
            (Field::Power, FeatureValue::from(150)),
            (Field::Year, FeatureValue::from(2018)),
            (Field::Popularity, FeatureValue::from(1000)),
            (Field::CityConsumption, FeatureValue::from(20)),
            (Field::HighwayConsumption, FeatureValue::from(25)),
            (Field::Cylinders, FeatureValue::from(4)),
            (Field::Doors, FeatureValue::from(4)),
            (Field::Brand, FeatureValue::from("Otro")),
            (Field::Size, FeatureValue::from("Midsize")),
            (Field::Transmission, FeatureValue::from("Automática")),
            (Field::Drivetrain, FeatureValue::from("Delantera")),
            (Field::Market, FeatureValue::from("Lujo")),
            (Field::Style, FeatureValue::from("Sedan")),
            (Field::Fuel, FeatureValue::from("Gasolina")),
        ]);
        Self { values }
    }

    /// Replace entries, checking value kinds. Consumes the table so the
    /// result is again frozen.
    pub fn with_overrides(
        mut self,
        overrides: impl IntoIterator<Item = (Field, FeatureValue)>,
    ) -> Result<Self, SchemaError> {
        for (field, value) in overrides {
            if value.kind() != field.kind() {
                return Err(SchemaError::DefaultKindMismatch {
                    field,
                    expected: field.kind(),
                    actual: value.kind(),
                });
            }
            debug!("Default for {} set to {}", field, value);
            self.values.insert(field, value);
        }
        Ok(self)
    }

    /// Fallback value for a field
    pub fn get(&self, field: Field) -> Option<&FeatureValue> {
        self.values.get(&field)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for DefaultTable {
    fn default() -> Self {
        Self::builtin()
    }
}

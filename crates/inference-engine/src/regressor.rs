//! Regressor Boundary

use crate::InferenceError;
use feature_engine::{FeatureRow, FeatureSchema};
use tracing::debug;

/// A pre-fitted price model. Loaded once and shared read-only.
pub trait Regressor: Send + Sync {
    /// Model name, for logs and responses
    fn name(&self) -> &str;

    /// Columns the model was fit on, in order
    fn schema(&self) -> &FeatureSchema;

    /// Levels a categorical column was fit on, when the model knows them
    fn levels(&self, _column: &str) -> Option<&[String]> {
        None
    }

    /// Predict a price for a single row
    fn predict(&self, row: &FeatureRow) -> Result<f64, InferenceError>;
}

/// Regressor returning the same price for every well-formed row
pub struct ConstantRegressor {
    schema: FeatureSchema,
    value: f64,
}

impl ConstantRegressor {
    /// Create a constant regressor for a schema
    pub fn new(schema: FeatureSchema, value: f64) -> Self {
        debug!("Creating constant regressor: value={}", value);
        Self { schema, value }
    }
}

impl Regressor for ConstantRegressor {
    fn name(&self) -> &str {
        "constant"
    }

    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, row: &FeatureRow) -> Result<f64, InferenceError> {
        if !row.columns().eq(self.schema.names()) {
            return Err(InferenceError::ColumnMismatch {
                expected: self.schema.names().map(str::to_string).collect(),
                actual: row.columns().map(str::to_string).collect(),
            });
        }
        Ok(self.value)
    }
}

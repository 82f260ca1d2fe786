//! Linear Regression Pipeline

use crate::encoder::FeatureEncoder;
use crate::regressor::Regressor;
use crate::InferenceError;
use feature_engine::{FeatureRow, FeatureSchema};
use tracing::{debug, info};

/// Scaler + one-hot encoder feeding a linear model
pub struct LinearRegressor {
    name: String,
    schema: FeatureSchema,
    encoder: FeatureEncoder,
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearRegressor {
    /// Create a linear regressor; one coefficient per encoded slot
    pub fn new(
        name: impl Into<String>,
        encoder: FeatureEncoder,
        intercept: f64,
        coefficients: Vec<f64>,
    ) -> Result<Self, InferenceError> {
        if coefficients.len() != encoder.width() {
            return Err(InferenceError::InvalidInputShape {
                expected: format!("{} coefficients", encoder.width()),
                actual: format!("{} coefficients", coefficients.len()),
            });
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(InferenceError::InvalidArtifact(
                "non-finite model parameters".to_string(),
            ));
        }

        let schema = encoder.schema()?;
        let name = name.into();
        info!(
            "Linear model '{}' ready: {} columns, {} encoded features",
            name,
            schema.len(),
            encoder.width()
        );

        Ok(Self {
            name,
            schema,
            encoder,
            intercept,
            coefficients,
        })
    }
}

impl Regressor for LinearRegressor {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn levels(&self, column: &str) -> Option<&[String]> {
        self.encoder.levels(column)
    }

    fn predict(&self, row: &FeatureRow) -> Result<f64, InferenceError> {
        let x = self.encoder.encode(row)?;
        let y = self.intercept
            + x.iter()
                .zip(&self.coefficients)
                .map(|(xi, wi)| xi * wi)
                .sum::<f64>();
        debug!("Linear prediction: {:.2}", y);
        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::ColumnEncoding;
    use feature_engine::FeatureValue;

    fn encoder() -> FeatureEncoder {
        FeatureEncoder::new(vec![
            (
                "Combustible".to_string(),
                ColumnEncoding::Categorical {
                    levels: vec!["Gasolina".into(), "Diesel".into()],
                },
            ),
            (
                "Año".to_string(),
                ColumnEncoding::Numeric {
                    mean: 2010.0,
                    scale: 10.0,
                },
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_prediction() {
        let model = LinearRegressor::new("test", encoder(), 20_000.0, vec![0.0, 1_000.0, 5_000.0])
            .unwrap();
        let row = FeatureRow::from_entries(vec![
            ("Combustible".to_string(), FeatureValue::from("Diesel")),
            ("Año".to_string(), FeatureValue::from(2020)),
        ]);
        // 20000 + 1000 (diesel) + 5000 * 1.0
        assert!((model.predict(&row).unwrap() - 26_000.0).abs() < 1e-9);
        assert_eq!(model.schema().len(), 2);
    }

    #[test]
    fn test_coefficient_width_checked() {
        let result = LinearRegressor::new("test", encoder(), 0.0, vec![1.0, 2.0]);
        assert!(matches!(result, Err(InferenceError::InvalidInputShape { .. })));
    }
}

//! Valuation Engine

use crate::currency::CurrencyFormat;
use crate::regressor::Regressor;
use crate::InferenceError;
use feature_engine::{
    manufacture_year, DefaultTable, FeatureRow, FeatureSchema, RowBuilder, SchemaError,
    VehicleForm,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors producing a single estimate. None are retried.
#[derive(Debug, Error)]
pub enum ValuationError {
    /// Row could not be assembled from the form
    #[error("Feature row assembly failed: {0}")]
    Row(#[from] SchemaError),
    /// Model rejected the row; the row is kept for diagnosis
    #[error("Prediction failed: {source}")]
    Prediction {
        source: InferenceError,
        row: FeatureRow,
    },
}

/// Result of a valuation
#[derive(Debug, Clone, Serialize)]
pub struct PriceEstimate {
    /// Predicted price
    pub price: f64,
    /// Price formatted as currency
    pub formatted_price: String,
    /// Year derived from the vehicle age
    pub manufacture_year: i32,
    /// Model that produced the estimate
    pub model: String,
    /// Row the model was fed
    pub row: FeatureRow,
    /// Inference latency in milliseconds
    pub latency_ms: u64,
}

/// Form -> row -> model -> formatted price
pub struct ValuationEngine {
    regressor: Arc<dyn Regressor>,
    builder: RowBuilder,
    currency: CurrencyFormat,
}

impl ValuationEngine {
    /// Create an engine for a loaded model. Fails if the model's schema
    /// cannot be filled from the form and the default table, or a default
    /// names a level the model was never fit on.
    pub fn new(
        regressor: Arc<dyn Regressor>,
        defaults: &DefaultTable,
        currency: CurrencyFormat,
    ) -> Result<Self, InferenceError> {
        let builder = RowBuilder::new(
            regressor.schema().clone(),
            defaults,
            &VehicleForm::EXPOSED_FIELDS,
        )?;

        for (column, value) in builder.defaulted_columns() {
            let (Some(level), Some(levels)) = (value.as_str(), regressor.levels(column)) else {
                continue;
            };
            if !levels.iter().any(|l| l == level) {
                return Err(InferenceError::UnknownDefaultLevel {
                    column: column.to_string(),
                    value: level.to_string(),
                });
            }
        }

        info!(
            "Valuation engine ready with model '{}' ({} columns)",
            regressor.name(),
            builder.schema().len()
        );

        Ok(Self {
            regressor,
            builder,
            currency,
        })
    }

    /// Estimate the price of a vehicle as of `current_year`
    pub fn estimate(
        &self,
        form: &VehicleForm,
        current_year: i32,
    ) -> Result<PriceEstimate, ValuationError> {
        let start = Instant::now();
        let row = self.builder.build(&form.to_inputs(current_year))?;

        let price = match self.predict_row(&row) {
            Ok(price) => price,
            Err(source) => {
                warn!("Prediction failed: {}", source);
                return Err(ValuationError::Prediction { source, row });
            }
        };

        let latency_ms = start.elapsed().as_millis() as u64;
        debug!("Estimate {:.2} in {}ms", price, latency_ms);

        Ok(PriceEstimate {
            price,
            formatted_price: self.currency.format(price),
            manufacture_year: manufacture_year(current_year, form.age_years),
            model: self.regressor.name().to_string(),
            row,
            latency_ms,
        })
    }

    /// Run the model on a prepared row
    pub fn predict_row(&self, row: &FeatureRow) -> Result<f64, InferenceError> {
        let price = self.regressor.predict(row)?;
        if !price.is_finite() {
            return Err(InferenceError::InferenceFailed(format!(
                "model returned non-finite price {}",
                price
            )));
        }
        Ok(price)
    }

    /// Schema of the loaded model
    pub fn schema(&self) -> &FeatureSchema {
        self.builder.schema()
    }

    /// Name of the loaded model
    pub fn model_name(&self) -> &str {
        self.regressor.name()
    }
}

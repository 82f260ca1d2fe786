//! ONNX Regressor using tract

use crate::encoder::FeatureEncoder;
use crate::regressor::Regressor;
use crate::InferenceError;
use feature_engine::{FeatureRow, FeatureSchema};
use std::path::Path;
use tracing::{debug, info};
use tract_onnx::prelude::*;

/// Encoded features fed to an ONNX graph taking a `[1, width]` f32 tensor
pub struct OnnxRegressor {
    name: String,
    schema: FeatureSchema,
    encoder: FeatureEncoder,
    plan: TypedRunnableModel<TypedModel>,
}

impl OnnxRegressor {
    /// Load and optimize the ONNX graph at `path`
    pub fn load(
        name: impl Into<String>,
        encoder: FeatureEncoder,
        path: &Path,
    ) -> Result<Self, InferenceError> {
        let name = name.into();
        let width = encoder.width();
        info!("Loading ONNX model '{}' from {}", name, path.display());

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, width]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| InferenceError::ModelLoadError(e.to_string()))?;

        let schema = encoder.schema()?;
        Ok(Self {
            name,
            schema,
            encoder,
            plan,
        })
    }
}

impl Regressor for OnnxRegressor {
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
        let x: Vec<f32> = self
            .encoder
            .encode(row)?
            .into_iter()
            .map(|v| v as f32)
            .collect();

        let input = Tensor::from_shape(&[1, x.len()], &x)
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;
        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| InferenceError::InferenceFailed("model produced no outputs".to_string()))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;
        let y = view.iter().next().copied().ok_or_else(|| InferenceError::InvalidInputShape {
            expected: "at least one output value".to_string(),
            actual: format!("{:?}", view.shape()),
        })?;

        debug!("ONNX prediction: {:.2}", y);
        Ok(f64::from(y))
    }
}

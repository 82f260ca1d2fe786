//! Model Artifact Format
//!
//! A valuation model is a JSON document describing its input columns (with
//! their encodings) and the estimator. The column list is the only place the
//! model schema is written down; row assembly derives from it.

use crate::encoder::{ColumnEncoding, FeatureEncoder};
use crate::linear::LinearRegressor;
use crate::onnx::OnnxRegressor;
use crate::regressor::Regressor;
use crate::InferenceError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Supported artifact format version
pub const FORMAT_VERSION: u32 = 1;

/// One input column of the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactColumn {
    pub name: String,
    pub encoding: ColumnEncoding,
}

/// Estimator fit on the encoded columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EstimatorSpec {
    /// `intercept + coefficients · x`
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
    /// ONNX graph; relative paths resolve against the artifact's directory
    Onnx { path: PathBuf },
}

/// Serialized valuation model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub name: String,
    /// Predicted quantity, informational
    #[serde(default)]
    pub target: Option<String>,
    pub columns: Vec<ArtifactColumn>,
    pub estimator: EstimatorSpec,
}

impl ModelArtifact {
    /// Parse an artifact from JSON
    pub fn from_json(json: &str) -> Result<Self, InferenceError> {
        let artifact: ModelArtifact =
            serde_json::from_str(json).map_err(|e| InferenceError::InvalidArtifact(e.to_string()))?;
        if artifact.format_version != FORMAT_VERSION {
            return Err(InferenceError::UnsupportedVersion {
                found: artifact.format_version,
                expected: FORMAT_VERSION,
            });
        }
        Ok(artifact)
    }

    /// Read an artifact file
    pub fn read(path: &Path) -> Result<Self, InferenceError> {
        let json = std::fs::read_to_string(path).map_err(|e| InferenceError::ArtifactUnavailable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// Encoder for the artifact's columns
    pub fn encoder(&self) -> Result<FeatureEncoder, InferenceError> {
        FeatureEncoder::new(
            self.columns
                .iter()
                .map(|c| (c.name.clone(), c.encoding.clone()))
                .collect(),
        )
    }

    /// Instantiate the regressor. `base_dir` resolves relative estimator paths.
    pub fn into_regressor(self, base_dir: &Path) -> Result<Arc<dyn Regressor>, InferenceError> {
        let encoder = self.encoder()?;
        let regressor: Arc<dyn Regressor> = match self.estimator {
            EstimatorSpec::Linear {
                intercept,
                coefficients,
            } => Arc::new(LinearRegressor::new(self.name, encoder, intercept, coefficients)?),
            EstimatorSpec::Onnx { path } => {
                let path = if path.is_relative() {
                    base_dir.join(path)
                } else {
                    path
                };
                Arc::new(OnnxRegressor::load(self.name, encoder, &path)?)
            }
        };
        Ok(regressor)
    }

    /// Load the artifact file at `path` into a ready regressor
    pub fn load(path: &Path) -> Result<Arc<dyn Regressor>, InferenceError> {
        let artifact = Self::read(path)?;
        info!(
            "Loaded model artifact '{}' ({} columns) from {}",
            artifact.name,
            artifact.columns.len(),
            path.display()
        );
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        artifact.into_regressor(base_dir)
    }
}

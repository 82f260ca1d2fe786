//! Inference Engine
//!
//! Loads a serialized valuation model once at startup and turns vehicle
//! forms into formatted price estimates.

mod artifact;
mod currency;
mod encoder;
mod engine;
mod linear;
mod onnx;
mod regressor;
mod state;

pub use artifact::{ArtifactColumn, EstimatorSpec, ModelArtifact, FORMAT_VERSION};
pub use currency::{CurrencyFormat, SymbolPosition};
pub use encoder::{ColumnEncoding, FeatureEncoder};
pub use engine::{PriceEstimate, ValuationEngine, ValuationError};
pub use linear::LinearRegressor;
pub use onnx::OnnxRegressor;
pub use regressor::{ConstantRegressor, Regressor};
pub use state::ModelState;

use feature_engine::{FeatureKind, SchemaError};
use thiserror::Error;

/// Errors loading a model or running inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model artifact unavailable at {path}: {reason}")]
    ArtifactUnavailable { path: String, reason: String },
    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),
    #[error("Unsupported artifact format version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("Invalid model schema: {0}")]
    Schema(#[from] SchemaError),
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Column mismatch: expected {expected:?}, got {actual:?}")]
    ColumnMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },
    #[error("Column '{column}' expects a {expected} value")]
    WrongKind { column: String, expected: FeatureKind },
    #[error("Unknown level '{value}' for column '{column}'")]
    UnknownCategory { column: String, value: String },
    #[error("Default '{value}' for column '{column}' is not a level the model knows")]
    UnknownDefaultLevel { column: String, value: String },
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
}

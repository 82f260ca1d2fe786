//! Model Availability

use crate::artifact::ModelArtifact;
use crate::currency::CurrencyFormat;
use crate::engine::ValuationEngine;
use feature_engine::DefaultTable;
use std::path::Path;
use tracing::{info, warn};

/// Whether the prediction path is enabled
pub enum ModelState {
    /// Model loaded and reconciled with the form
    Ready(ValuationEngine),
    /// Artifact missing or unusable; predictions are disabled
    Unavailable { reason: String },
}

impl ModelState {
    /// Load the artifact at `path`. Never fails: any problem disables
    /// prediction and is logged as a warning.
    pub fn load(path: &Path, defaults: &DefaultTable, currency: CurrencyFormat) -> Self {
        if !path.exists() {
            let reason = format!("model artifact not found at {}", path.display());
            warn!("Predictions disabled: {}", reason);
            return ModelState::Unavailable { reason };
        }

        let engine = ModelArtifact::load(path)
            .and_then(|regressor| ValuationEngine::new(regressor, defaults, currency));

        match engine {
            Ok(engine) => {
                info!("Predictions enabled with model '{}'", engine.model_name());
                ModelState::Ready(engine)
            }
            Err(e) => {
                let reason = e.to_string();
                warn!("Predictions disabled: {}", reason);
                ModelState::Unavailable { reason }
            }
        }
    }

    /// Engine, when ready
    pub fn engine(&self) -> Option<&ValuationEngine> {
        match self {
            ModelState::Ready(engine) => Some(engine),
            ModelState::Unavailable { .. } => None,
        }
    }

    /// Whether predictions are enabled
    pub fn is_ready(&self) -> bool {
        matches!(self, ModelState::Ready(_))
    }

    /// Reason predictions are disabled, if they are
    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            ModelState::Ready(_) => None,
            ModelState::Unavailable { reason } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifact_disables_prediction() {
        let state = ModelState::load(
            Path::new("/nonexistent/valuation_model.json"),
            &DefaultTable::builtin(),
            CurrencyFormat::default(),
        );
        assert!(!state.is_ready());
        assert!(state.engine().is_none());
        assert!(state.unavailable_reason().unwrap().contains("not found"));
    }

    #[test]
    fn test_sample_artifact_enables_prediction() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models/valuation_model.json");
        let state = ModelState::load(&path, &DefaultTable::builtin(), CurrencyFormat::default());
        let engine = state.engine().unwrap();

        let estimate = engine
            .estimate(&feature_engine::VehicleForm::default(), 2024)
            .unwrap();
        assert!(estimate.price > 0.0);
        assert!(estimate.formatted_price.starts_with('$'));
        assert_eq!(estimate.row.len(), 13);
    }

    #[test]
    fn test_uncoverable_artifact_disables_prediction() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models/valuation_model.json");
        let state = ModelState::load(&path, &DefaultTable::empty(), CurrencyFormat::default());
        assert!(!state.is_ready());
        assert!(state.unavailable_reason().unwrap().contains("Popularidad"));
    }

    #[test]
    fn test_default_unknown_to_model_disables_prediction() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models/valuation_model.json");
        let defaults = DefaultTable::builtin()
            .with_overrides([(
                feature_engine::Field::Market,
                feature_engine::FeatureValue::from("Economy"),
            )])
            .unwrap();

        let state = ModelState::load(&path, &defaults, CurrencyFormat::default());
        assert!(!state.is_ready());
        assert!(state.unavailable_reason().unwrap().contains("Economy"));
    }
}

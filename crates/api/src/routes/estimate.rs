//! Estimate Routes

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use feature_engine::VehicleForm;
use inference_engine::ValuationError;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{model_unavailable, ErrorResponse};
use crate::AppState;

/// Estimate the price of the submitted vehicle
pub async fn post_estimate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<VehicleForm>, JsonRejection>,
) -> Response {
    let Json(form) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            metrics::counter!("valuation_requests_total", "outcome" => "invalid_form").increment(1);
            return ErrorResponse::new("invalid_form", rejection.body_text())
                .with_status(StatusCode::BAD_REQUEST);
        }
    };

    let Some(engine) = state.model.engine() else {
        metrics::counter!("valuation_requests_total", "outcome" => "model_unavailable")
            .increment(1);
        return model_unavailable(state.model.unavailable_reason().unwrap_or("unknown"));
    };

    let validation = state.validator.validate(&form);
    if !validation.valid {
        metrics::counter!("valuation_requests_total", "outcome" => "validation_failed")
            .increment(1);
        let mut body = ErrorResponse::new(
            "validation_failed",
            format!("{} of {} fields invalid", validation.errors.len(), validation.fields_checked),
        );
        body.details = validation.errors;
        return body.with_status(StatusCode::BAD_REQUEST);
    }

    debug!("Estimating {:?}", form);
    match engine.estimate(&form, state.current_year()) {
        Ok(estimate) => {
            metrics::counter!("valuation_requests_total", "outcome" => "ok").increment(1);
            metrics::histogram!("valuation_latency_ms").record(estimate.latency_ms as f64);
            (StatusCode::OK, Json(estimate)).into_response()
        }
        Err(ValuationError::Prediction { source, row }) => {
            metrics::counter!("valuation_requests_total", "outcome" => "schema_mismatch")
                .increment(1);
            warn!("Estimate rejected by model: {}", source);
            let mut body = ErrorResponse::new("schema_mismatch", source.to_string());
            body.row = Some(row);
            body.with_status(StatusCode::UNPROCESSABLE_ENTITY)
        }
        Err(e @ ValuationError::Row(_)) => {
            metrics::counter!("valuation_requests_total", "outcome" => "schema_mismatch")
                .increment(1);
            warn!("Estimate rejected: {}", e);
            ErrorResponse::new("schema_mismatch", e.to_string())
                .with_status(StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}

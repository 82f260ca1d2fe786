//! Model Schema Routes

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use feature_engine::FeatureSchema;
use serde::Serialize;
use std::sync::Arc;

use super::model_unavailable;
use crate::AppState;

/// Response for the schema endpoint
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub model: String,
    pub columns: FeatureSchema,
}

/// Get the columns the loaded model expects
pub async fn get_schema(State(state): State<Arc<AppState>>) -> Response {
    match state.model.engine() {
        Some(engine) => Json(SchemaResponse {
            model: engine.model_name().to_string(),
            columns: engine.schema().clone(),
        })
        .into_response(),
        None => model_unavailable(state.model.unavailable_reason().unwrap_or("unknown")),
    }
}

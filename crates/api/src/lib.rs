//! Vehicle Valuation API Server
//!
//! REST API serving the valuation form definition and price estimates.

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Datelike;
use data_validator::Validator;
use inference_engine::ModelState;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
mod routes;

pub use config::{AppConfig, ConfigError};

/// Application state shared across handlers. Read-only after startup.
pub struct AppState {
    /// Loaded model, or why it is missing
    pub model: ModelState,
    /// Form validator
    pub validator: Validator,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus handle, when the recorder is installed
    pub metrics: Option<PrometheusHandle>,
    /// Year used to derive manufacture years; the calendar year when unset
    pub fixed_year: Option<i32>,
}

impl AppState {
    /// Create new application state
    pub fn new(model: ModelState, validator: Validator) -> Self {
        Self {
            model,
            validator,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics: None,
            fixed_year: None,
        }
    }

    /// Build state from configuration, loading the model artifact
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let defaults = config.default_table()?;
        let model = ModelState::load(
            &config.model.artifact_path,
            &defaults,
            config.currency.clone(),
        );
        Ok(Self::new(model, Validator::new(config.validation.clone())))
    }

    /// Expose metrics through `handle`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Pin the current year
    pub fn with_fixed_year(mut self, year: i32) -> Self {
        self.fixed_year = Some(year);
        self
    }

    /// Year used for manufacture year derivation
    pub fn current_year(&self) -> i32 {
        self.fixed_year.unwrap_or_else(|| chrono::Utc::now().year())
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: ComponentStatus,
}

/// Component status
#[derive(Debug, Serialize)]
pub struct ComponentStatus {
    pub model: ComponentHealth,
}

/// Individual component health
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/options", get(routes::options::get_options))
        .route("/api/v1/schema", get(routes::schema::get_schema))
        .route("/api/v1/estimate", post(routes::estimate::post_estimate))
        .route("/metrics", get(metrics_handler))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Browser form clients may be served from another origin
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let model = match &state.model {
        ModelState::Ready(engine) => ComponentHealth {
            status: "ok".to_string(),
            name: Some(engine.model_name().to_string()),
            detail: Some(format!("{} columns", engine.schema().len())),
        },
        ModelState::Unavailable { reason } => ComponentHealth {
            status: "unavailable".to_string(),
            name: None,
            detail: Some(reason.clone()),
        },
    };

    let status = if state.model.is_ready() {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        components: ComponentStatus { model },
    })
}

/// Prometheus exposition handler
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}

/// Initialize logging
pub fn init_logging(level: Level) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}

/// Run the server
pub async fn run_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = AppState::from_config(&config)?;
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(e) => warn!("Metrics disabled: {}", e),
    }

    let app = create_router(Arc::new(state));

    info!("Starting API server on {}", config.server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use feature_engine::{DefaultTable, FeatureRow, FeatureSchema, Field};
    use inference_engine::{
        ConstantRegressor, CurrencyFormat, InferenceError, Regressor, ValuationEngine,
    };
    use serde_json::{json, Value};
    use std::path::Path;
    use tower::ServiceExt;

    fn constant_state(price: f64) -> AppState {
        let schema = FeatureSchema::from_fields(&Field::ALL).unwrap();
        let engine = ValuationEngine::new(
            Arc::new(ConstantRegressor::new(schema, price)),
            &DefaultTable::builtin(),
            CurrencyFormat::default(),
        )
        .unwrap();
        AppState::new(ModelState::Ready(engine), Validator::default()).with_fixed_year(2024)
    }

    fn unavailable_state() -> AppState {
        let model = ModelState::load(
            Path::new("/nonexistent/valuation_model.json"),
            &DefaultTable::builtin(),
            CurrencyFormat::default(),
        );
        AppState::new(model, Validator::default())
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = create_router(Arc::new(state)).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn example_form() -> Value {
        json!({
            "brand": "Toyota",
            "power_cv": 150,
            "age_years": 5,
            "fuel": "Gasoline",
            "transmission": "Automatic",
            "body_style": "Sedan",
            "cylinders": 4,
            "doors": 4
        })
    }

    #[tokio::test]
    async fn test_estimate_with_constant_model() {
        let (status, body) = send(
            constant_state(21_300.0),
            post_json("/api/v1/estimate", example_form()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["price"], json!(21_300.0));
        assert_eq!(body["formatted_price"], "$21,300.00");
        assert_eq!(body["manufacture_year"], 2019);
        assert_eq!(body["row"]["Marca"], "Toyota");
        assert_eq!(body["row"]["Tracción"], "Delantera");
        assert_eq!(body["row"].as_object().unwrap().len(), 14);
    }

    #[tokio::test]
    async fn test_estimate_without_model() {
        let (status, body) =
            send(unavailable_state(), post_json("/api/v1/estimate", example_form())).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "model_unavailable");
    }

    #[tokio::test]
    async fn test_estimate_validation_errors() {
        let mut form = example_form();
        form["power_cv"] = json!(155);
        form["doors"] = json!(3);

        let (status, body) =
            send(constant_state(1.0), post_json("/api/v1/estimate", form)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_failed");
        assert_eq!(body["details"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_estimate_unknown_option() {
        let mut form = example_form();
        form["brand"] = json!("Tesla");

        let (status, body) =
            send(constant_state(1.0), post_json("/api/v1/estimate", form)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_form");
    }

    struct UnknownLevel(FeatureSchema);

    impl Regressor for UnknownLevel {
        fn name(&self) -> &str {
            "unknown-level"
        }

        fn schema(&self) -> &FeatureSchema {
            &self.0
        }

        fn predict(&self, _row: &FeatureRow) -> Result<f64, InferenceError> {
            Err(InferenceError::UnknownCategory {
                column: "Marca".to_string(),
                value: "Toyota".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_estimate_schema_mismatch_shows_row() {
        let schema = FeatureSchema::from_fields(&Field::ALL).unwrap();
        let engine = ValuationEngine::new(
            Arc::new(UnknownLevel(schema)),
            &DefaultTable::builtin(),
            CurrencyFormat::default(),
        )
        .unwrap();
        let state =
            AppState::new(ModelState::Ready(engine), Validator::default()).with_fixed_year(2024);

        let (status, body) = send(state, post_json("/api/v1/estimate", example_form())).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "schema_mismatch");
        assert_eq!(body["row"]["Marca"], "Toyota");
        assert_eq!(body["row"]["Año"], 2019.0);
    }

    #[tokio::test]
    async fn test_estimate_with_sample_artifact() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models/valuation_model.json");
        let model = ModelState::load(&path, &DefaultTable::builtin(), CurrencyFormat::default());
        assert!(model.is_ready());
        let state = AppState::new(model, Validator::default()).with_fixed_year(2024);

        let mut form = example_form();
        form["size"] = json!("Large");
        let (status, body) = send(state, post_json("/api/v1/estimate", form)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model"], "tasacion-valtel-linear");
        assert_eq!(body["row"]["Tamaño"], "Large");
        assert!(body["price"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(constant_state(1.0), get("/api/v1/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["components"]["model"]["name"], "constant");

        let (_, body) = send(unavailable_state(), get("/api/v1/health")).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["components"]["model"]["status"], "unavailable");
    }

    #[tokio::test]
    async fn test_options() {
        let (status, body) = send(constant_state(1.0), get("/api/v1/options")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["brands"].as_array().unwrap().len(), 8);
        assert_eq!(body["fuels"], json!(["Gasolina", "Diesel", "Híbrido"]));
        assert_eq!(body["power_cv"], json!({"min": 50, "max": 600, "step": 10}));
        assert_eq!(body["age_years"]["max"], 25);
        assert_eq!(body["initial"]["doors"], 4);
    }

    #[tokio::test]
    async fn test_schema() {
        let (status, body) = send(constant_state(1.0), get("/api/v1/schema")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["columns"][0], json!({"name": "Marca", "kind": "categorical"}));

        let (status, _) = send(unavailable_state(), get("/api/v1/schema")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_metrics_without_recorder() {
        let response = create_router(Arc::new(constant_state(1.0)))
            .oneshot(get("/metrics"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_preflight_for_estimate() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/v1/estimate")
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "content-type")
            .body(Body::empty())
            .unwrap();
        let response = create_router(Arc::new(constant_state(1.0)))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert!(headers["access-control-allow-methods"]
            .to_str()
            .unwrap()
            .contains("POST"));
    }

    #[tokio::test]
    async fn test_cors_header_on_simple_request() {
        let request = Request::builder()
            .uri("/api/v1/options")
            .header("origin", "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = create_router(Arc::new(constant_state(1.0)))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }
}

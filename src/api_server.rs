// Axum API Server Module
//
// Purpose: JSON endpoints over the projection / scoring pipeline.
// Every handler is synchronous arithmetic; no request touches disk or network.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::alerts::generate_safety_alerts;
use crate::config::ServerConfig;
use crate::country::normalize_code;
use crate::error::ForecastError;
use crate::predictor::{
    simulate_baseline, EnvironmentalPredictor, ForecastRequest, DEFAULT_PREDICTION_TYPE,
    DEFAULT_TIMEFRAME,
};
use crate::snapshot::EnvironmentalInput;
use crate::time_series::{
    analyze_seasonal, analyze_trend, detect_anomalies, generate_time_series, summarize,
    SeriesField, DEFAULT_FORECAST_HORIZON, DEFAULT_TIME_RANGE, MAX_TIME_RANGE,
};

/// Version tag carried in every prediction envelope
pub const API_MODEL_VERSION: &str = "1.0.0";

/// Version tag on simulated-baseline responses
pub const SIMULATED_MODEL_VERSION: &str = "2.0.0";

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<EnvironmentalPredictor>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        tracing::info!(
            "Initializing predictor (max horizon {} months)...",
            config.max_horizon_months
        );
        Self {
            predictor: Arc::new(EnvironmentalPredictor::new(config.max_horizon_months)),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Prediction series: POST with caller readings, GET with a simulated baseline
        .route("/api/ai-predictions", get(predict_simulated).post(predict))

        // Historical + forecast series with analysis
        .route("/api/time-series", get(time_series))

        // Alert feed
        .route("/api/safety-alerts", get(safety_alerts))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

/// POST /api/ai-predictions
///
/// The body is parsed by hand so that a missing Content-Type or malformed
/// JSON lands in the standard error envelope.
async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let payload: PredictionPayload = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("Rejected prediction request body: {}", e);
        AppError::internal(PREDICTION_FAILURE, e)
    })?;

    let (input, country_code) = match (payload.environmental_data, payload.country_code) {
        (Some(input), Some(code)) if !code.trim().is_empty() => (input, code),
        _ => {
            return Err(AppError::BadRequest(
                "Missing required parameters: environmentalData and countryCode".to_string(),
            ))
        }
    };

    let prediction_type = payload
        .prediction_type
        .unwrap_or_else(|| DEFAULT_PREDICTION_TYPE.to_string());
    let timeframe = payload.timeframe.unwrap_or(DEFAULT_TIMEFRAME);

    tracing::info!(
        country = %country_code,
        prediction_type = %prediction_type,
        timeframe,
        "Prediction request"
    );

    let request = ForecastRequest {
        current: input.resolve(),
        country_code: &country_code,
        prediction_type: &prediction_type,
        timeframe,
    };
    let series = {
        let mut rng = rand::thread_rng();
        state
            .predictor
            .predict(&request, Utc::now(), &mut rng)
            .map_err(|e| AppError::from_forecast(PREDICTION_FAILURE, e))?
    };

    Ok(Json(serde_json::json!({
        "success": true,
        "data": series,
        "timestamp": Utc::now().to_rfc3339(),
        "model_version": API_MODEL_VERSION,
    })))
}

/// GET /api/ai-predictions?country=BD&horizon=12
///
/// Same pipeline as the POST route, seeded from a simulated baseline which is
/// echoed back so callers can tell it apart from real readings.
async fn predict_simulated(
    State(state): State<AppState>,
    Query(params): Query<SimulatedPredictionQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let country_code = normalize_code(params.country.as_deref().unwrap_or("BD"));
    let horizon = parse_int_param("horizon", params.horizon.as_deref(), DEFAULT_TIMEFRAME)?;
    let prediction_type = params
        .prediction_type
        .unwrap_or_else(|| "safety".to_string());

    tracing::info!(country = %country_code, horizon, "Simulated prediction request");

    let (baseline, series) = {
        let mut rng = rand::thread_rng();
        let baseline = simulate_baseline(&country_code, &mut rng);
        let request = ForecastRequest {
            current: baseline,
            country_code: &country_code,
            prediction_type: &prediction_type,
            timeframe: horizon,
        };
        let series = state
            .predictor
            .predict(&request, Utc::now(), &mut rng)
            .map_err(|e| AppError::from_forecast(PREDICTION_FAILURE, e))?;
        (baseline, series)
    };

    Ok(Json(serde_json::json!({
        "success": true,
        "data": series,
        "baseline": baseline,
        "timestamp": Utc::now().to_rfc3339(),
        "model_version": SIMULATED_MODEL_VERSION,
        "realTime": true,
    })))
}

/// GET /api/time-series?country=US&timeRange=12&predictionHorizon=6&metric=temperature
async fn time_series(
    State(state): State<AppState>,
    Query(params): Query<TimeSeriesQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let country_code = normalize_code(params.country.as_deref().unwrap_or("US"));
    let time_range = parse_int_param("timeRange", params.time_range.as_deref(), DEFAULT_TIME_RANGE)?;
    let horizon = parse_int_param(
        "predictionHorizon",
        params.prediction_horizon.as_deref(),
        DEFAULT_FORECAST_HORIZON,
    )?;
    let field: SeriesField = params
        .metric
        .as_deref()
        .unwrap_or("temperature")
        .parse()
        .map_err(|e| AppError::from_forecast(TIME_SERIES_FAILURE, e))?;

    if time_range < 1 || time_range > MAX_TIME_RANGE as i64 {
        return Err(AppError::from_forecast(
            TIME_SERIES_FAILURE,
            ForecastError::InvalidTimeRange {
                got: time_range,
                max: MAX_TIME_RANGE,
            },
        ));
    }
    let horizon = state
        .predictor
        .validate_horizon(horizon)
        .map_err(|e| AppError::from_forecast(TIME_SERIES_FAILURE, e))?;

    tracing::info!(country = %country_code, time_range, horizon, metric = %field, "Time series request");

    let series = {
        let mut rng = rand::thread_rng();
        generate_time_series(
            &country_code,
            time_range as u32,
            horizon,
            Utc::now().date_naive(),
            &mut rng,
        )
        .map_err(|e| AppError::from_forecast(TIME_SERIES_FAILURE, e))?
    };

    let trend = analyze_trend(&series.historical, field);
    let seasonal = analyze_seasonal(&series.historical, field);
    let anomalies = detect_anomalies(&series.historical, field);
    let summary = summarize(&trend, &seasonal, &anomalies);
    let points = series.combined();

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "timeSeries": points,
            "analysis": {
                "trend": trend,
                "seasonal": seasonal,
                "anomalies": anomalies,
                "summary": summary,
            },
            "metadata": {
                "countryCode": country_code,
                "timeRange": time_range,
                "predictionHorizon": horizon,
                "metric": field,
                "generatedAt": Utc::now().to_rfc3339(),
                "dataPoints": points.len(),
            },
        },
    })))
}

/// GET /api/safety-alerts?country=US
async fn safety_alerts(Query(params): Query<AlertQuery>) -> Json<serde_json::Value> {
    let country_code = normalize_code(params.country.as_deref().unwrap_or("US"));
    tracing::info!(country = %country_code, "Safety alerts request");

    let alerts = {
        let mut rng = rand::thread_rng();
        generate_safety_alerts(&country_code, Utc::now(), &mut rng)
    };

    Json(serde_json::json!({
        "success": true,
        "data": alerts,
        "metadata": {
            "countryCode": country_code,
            "alertCount": alerts.len(),
            "generatedAt": Utc::now().to_rfc3339(),
        },
    }))
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PredictionPayload {
    environmental_data: Option<EnvironmentalInput>,
    country_code: Option<String>,
    prediction_type: Option<String>,
    timeframe: Option<i64>,
}

#[derive(Deserialize, Debug)]
struct SimulatedPredictionQuery {
    country: Option<String>,
    horizon: Option<String>,
    #[serde(rename = "type")]
    prediction_type: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct TimeSeriesQuery {
    country: Option<String>,
    time_range: Option<String>,
    prediction_horizon: Option<String>,
    metric: Option<String>,
}

#[derive(Deserialize, Debug)]
struct AlertQuery {
    country: Option<String>,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse an optional integer query parameter, falling back to `default`.
fn parse_int_param(name: &str, raw: Option<&str>, default: i64) -> Result<i64, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Invalid {}: {}", name, value))),
    }
}

// ============================================================================
// Error Handling
// ============================================================================

const PREDICTION_FAILURE: &str = "Failed to generate AI predictions";
const TIME_SERIES_FAILURE: &str = "Failed to generate time series analysis";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{error}: {details}")]
    Internal { error: &'static str, details: String },
}

impl AppError {
    fn internal(error: &'static str, details: impl std::fmt::Display) -> Self {
        AppError::Internal {
            error,
            details: details.to_string(),
        }
    }

    /// Validation failures are the caller's fault; anything else is ours.
    fn from_forecast(context: &'static str, err: ForecastError) -> Self {
        match err {
            ForecastError::InvalidHorizon { .. }
            | ForecastError::InvalidTimeRange { .. }
            | ForecastError::UnknownMetric(_) => AppError::BadRequest(err.to_string()),
            ForecastError::EmptySeries | ForecastError::DateOutOfRange(_) => {
                tracing::error!("{}: {}", context, err);
                AppError::internal(context, err)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "success": false,
                    "error": message
                }),
            ),
            AppError::Internal { error, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({
                    "success": false,
                    "error": error,
                    "details": details
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

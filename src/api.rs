//! HTTP API for route estimation and itinerary generation

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::error;

use crate::ai::AiClient;
use crate::estimator::Estimator;
use crate::itinerary::{self, ItineraryOutcome};
use crate::models::{Coordinates, EstimateSource, RouteQuery};

/// Shared, immutable per-process state
#[derive(Clone)]
pub struct AppState {
    pub estimator: Arc<Estimator>,
    pub ai: Option<AiClient>,
}

/// Coordinates as the front end sends them
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct WireCoordinates {
    pub lat: f64,
    pub lng: f64,
}

impl From<WireCoordinates> for Coordinates {
    fn from(wire: WireCoordinates) -> Self {
        Coordinates::new(wire.lat, wire.lng)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEstimateRequest {
    pub from_city: String,
    pub to_city: String,
    pub from_coords: Option<WireCoordinates>,
    pub to_coords: Option<WireCoordinates>,
    pub mode: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEstimateResponse {
    pub distance: f64,
    pub duration: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub mode: String,
    pub from_city: String,
    pub to_city: String,
    pub is_estimate: bool,
    pub source: EstimateSource,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

type HandlerError = (StatusCode, Json<ErrorBody>);

/// The one user-visible failure shape: HTTP 500 with the message
fn internal_error(message: impl Into<String>) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/route-estimate", post(estimate_route))
        .route("/itinerary", post(generate_itinerary))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": crate::VERSION }))
}

// Bodies are read raw and parsed explicitly: the original contract answers
// any malformed request with 500 {"error"}, not with axum's Json rejection.
async fn estimate_route(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RouteEstimateResponse>, HandlerError> {
    let request: RouteEstimateRequest = serde_json::from_slice(&body).map_err(|err| {
        error!(error = %err, "Malformed route-estimate request");
        internal_error(err.to_string())
    })?;

    let query = RouteQuery {
        origin_city: request.from_city.clone(),
        destination_city: request.to_city.clone(),
        origin_coords: request.from_coords.map(Coordinates::from),
        destination_coords: request.to_coords.map(Coordinates::from),
        mode_name: request.mode.clone(),
    };

    let estimate = state.estimator.estimate(&query).await;

    Ok(Json(RouteEstimateResponse {
        distance: estimate.distance_km,
        duration: estimate.duration_hours,
        min_price: estimate.min_price,
        max_price: estimate.max_price,
        mode: estimate.mode,
        from_city: request.from_city,
        to_city: request.to_city,
        is_estimate: estimate.is_estimate,
        source: estimate.source,
    }))
}

async fn generate_itinerary(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, HandlerError> {
    let preferences: Value = serde_json::from_slice(&body).map_err(|err| {
        error!(error = %err, "Malformed itinerary request");
        internal_error(err.to_string())
    })?;

    let Some(ai) = &state.ai else {
        return Err(internal_error("AI API key is not configured"));
    };

    match itinerary::plan(ai, &preferences).await {
        Ok(ItineraryOutcome::Plan(plan)) => Ok(Json(plan)),
        Ok(ItineraryOutcome::Unparsed { raw }) => {
            Ok(Json(json!({ "raw": raw, "parseError": true })))
        }
        Err(err) => {
            error!(error = %err, "Itinerary generation failed");
            Err(internal_error(err.to_string()))
        }
    }
}

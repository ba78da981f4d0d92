//! HTTP route handlers.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{error, info, warn};

use crate::domain::CityId;
use crate::planner::{
    SearchControl, SearchError, best_round_trip, collect_itineraries,
    find_best_single_trip_with_control, rank_itineraries,
};
use crate::store::StoreError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/trip/search", post(search_trip))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

fn lookup_city(state: &AppState, code: &str) -> Result<CityId, AppError> {
    state.cities.get(code).ok_or_else(|| AppError::BadRequest {
        message: format!("Unknown airport: {code}"),
    })
}

/// Search round trips from an origin through a set of destinations.
async fn search_trip(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TripSearchResponse>, AppError> {
    let req: TripSearchRequest =
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        })?;

    let origin = lookup_city(&state, &req.origin)?;
    let mut cities = BTreeSet::from([origin]);
    for code in &req.destinations {
        cities.insert(lookup_city(&state, code)?);
    }
    let city_costs = req
        .city_costs
        .iter()
        .map(|(code, &cost)| Ok((lookup_city(&state, code)?, cost)))
        .collect::<Result<BTreeMap<CityId, f64>, AppError>>()?;

    let start_time = req.start_time.unwrap_or(0.0);
    let window_start = req.window_start.unwrap_or(start_time);
    let window_end = req.window_end.unwrap_or(f64::INFINITY);
    let flights = state
        .flights
        .select_flights(&cities, &cities, window_start, window_end)?;
    let flights_considered = flights.len();

    let settings = Arc::clone(&state.settings);
    let deadline = Instant::now() + state.search_timeout;
    let travels = tokio::task::spawn_blocking(move || {
        let control = SearchControl::new().with_deadline(deadline);
        find_best_single_trip_with_control(
            origin,
            start_time,
            &flights,
            &settings,
            &city_costs,
            &control,
        )
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("Search task failed: {e}"),
    })??;

    let itineraries = rank_itineraries(collect_itineraries(&travels)?);
    let best = best_round_trip(&travels, origin)?;

    info!(
        origin = %req.origin,
        destinations = req.destinations.len(),
        flights = flights_considered,
        travels = travels.len(),
        round_trip = best.is_some(),
        "trip search"
    );

    Ok(Json(TripSearchResponse {
        flights_considered,
        travels: travels
            .iter()
            .map(|t| TravelResult::from_travel(t, &state.cities))
            .collect(),
        itineraries: itineraries
            .iter()
            .map(|i| ItineraryResult::from_itinerary(i, &state.cities, origin))
            .collect(),
        best_round_trip: best
            .as_ref()
            .map(|i| ItineraryResult::from_itinerary(i, &state.cities, origin)),
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Timeout => AppError::Unavailable {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

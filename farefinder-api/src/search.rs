use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use farefinder_core::validation::validate_search_request;
use farefinder_core::{Flight, FlightSearchRequest, FlightSearchResponse, SearchQuery};
use serde_json::{json, Value};
use tokio::time::Instant;
use tracing::{info, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Budget for one optimizer run.
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(60);

pub const NO_RESULTS_MESSAGE: &str = "No flights found for your search criteria";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/search", post(search_flights))
        .route("/search", post(search_flights))
        .route("/api/search/health", get(search_health))
}

/// POST /api/search
pub async fn search_flights(
    State(state): State<AppState>,
    payload: Result<Json<FlightSearchRequest>, JsonRejection>,
) -> Result<Json<FlightSearchResponse>, AppError> {
    let Json(req) = payload?;

    let directory = state.validate_codes.then(|| state.airports.as_ref());
    let query = validate_search_request(&req, directory, Utc::now().date_naive())
        .map_err(|errors| AppError::Validation(errors.into_iter().next().unwrap_or_default()))?;

    info!(
        "Searching cheapest flights: {} -> {} on {} for {} passengers",
        query.origin, query.destination, query.date, query.passengers
    );

    let deadline = Instant::now() + SEARCH_TIMEOUT;
    let flights = state
        .optimizer
        .optimize_routes(&query, deadline)
        .await
        .map_err(|e| AppError::Internal(format!("Flight search failed: {}", e)))?;

    let message = response_message(&flights);
    let flights = if flights.is_empty() {
        warn!(
            "No routes found for {} -> {}, serving sample flights",
            query.origin, query.destination
        );
        fallback_flights(&query)
    } else {
        flights
    };

    info!(
        "Found {} flight options for {} -> {}",
        flights.len(),
        query.origin,
        query.destination
    );
    Ok(Json(FlightSearchResponse::new(query, flights, message)))
}

/// GET /api/search/health
pub async fn search_health(State(state): State<AppState>) -> Json<Value> {
    let provider_status = match state.provider.health_check().await {
        Ok(()) => "healthy".to_string(),
        Err(e) => format!("unhealthy: {}", e),
    };

    Json(json!({
        "status": "healthy",
        "service": "flight-search",
        "provider_service": provider_status,
        "airports_loaded": state.airports.len(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Summary line shown above the result list.
pub fn response_message(flights: &[Flight]) -> String {
    let Some(first) = flights.first() else {
        return NO_RESULTS_MESSAGE.to_string();
    };

    let (cheapest, dearest) = flights
        .iter()
        .fold((first.price, first.price), |(lo, hi), f| (lo.min(f.price), hi.max(f.price)));

    let savings = dearest - cheapest;
    if savings > 0.0 && flights.len() > 1 {
        return format!(
            "Found {} options with up to ${:.0} savings through creative routing",
            flights.len(),
            savings
        );
    }

    if flights.iter().any(|f| f.stops == 0) {
        "Found flights including direct options".to_string()
    } else if flights.iter().any(|f| f.stops == 1) {
        "Found flights with creative routing to save money".to_string()
    } else {
        "Found multi-stop routes with significant savings".to_string()
    }
}

const FALLBACK_AIRLINE: &str = "Sample Airways (offline data)";
const FALLBACK_HUBS: [&str; 6] = ["DXB", "DOH", "IST", "FRA", "SIN", "LHR"];

/// Five fixed sample flights shown when a search produces nothing, so
/// clients always have something to render. Cheapest first.
pub fn fallback_flights(query: &SearchQuery) -> Vec<Flight> {
    let hubs: Vec<&str> = FALLBACK_HUBS
        .iter()
        .copied()
        .filter(|h| *h != query.origin && *h != query.destination)
        .collect();

    let legs: [(&[&str], f64, &str); 5] = [
        (&[hubs[0], hubs[1]], 429.0, "16h 10m"),
        (&[hubs[2], hubs[3]], 459.0, "15h 40m"),
        (&[hubs[0]], 589.0, "11h 20m"),
        (&[hubs[1]], 649.0, "10h 05m"),
        (&[], 899.0, "6h 45m"),
    ];

    legs.iter()
        .enumerate()
        .map(|(i, (via, price, duration))| {
            let mut route = Vec::with_capacity(via.len() + 2);
            route.push(query.origin.clone());
            route.extend(via.iter().map(|h| h.to_string()));
            route.push(query.destination.clone());

            Flight {
                id: format!("fallback-{}", i + 1),
                origin: query.origin.clone(),
                destination: query.destination.clone(),
                date: query.date,
                price: *price,
                currency: "USD".to_string(),
                airline: FALLBACK_AIRLINE.to_string(),
                duration: duration.to_string(),
                stops: via.len() as u32,
                route,
                booking_url: None,
            }
        })
        .collect()
}

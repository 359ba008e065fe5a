use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use farefinder_core::Airport;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Listing cap when no search term is given.
pub const LIST_LIMIT: usize = 50;

#[derive(Debug, Default, Deserialize)]
pub struct AirportQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct AirportsResponse {
    pub airports: Vec<Airport>,
    pub total: usize,
    pub query: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/airports", get(list_airports))
}

/// GET /api/airports?q=
pub async fn list_airports(
    State(state): State<AppState>,
    Query(params): Query<AirportQuery>,
) -> Json<AirportsResponse> {
    let term = params.q.trim();
    let airports: Vec<Airport> = if term.is_empty() {
        state.airports.all().take(LIST_LIMIT).cloned().collect()
    } else {
        state.airports.search(term)
    };

    Json(AirportsResponse {
        total: airports.len(),
        airports,
        query: params.q,
    })
}

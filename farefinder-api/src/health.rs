use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

pub const SERVICE_NAME: &str = "farefinder";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .route("/health/live", get(live))
        .route("/api/info", get(info))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": state.version,
        "timestamp": Utc::now().to_rfc3339(),
        "uptime": format_uptime(state.started_at.elapsed().as_secs()),
    }))
}

/// GET /health/ready
///
/// Ready once the airport directory has data; the provider is checked
/// separately by `/api/search/health`.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let is_ready = !state.airports.is_empty();
    let status = if is_ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };

    (
        status,
        Json(json!({
            "ready": is_ready,
            "service": SERVICE_NAME,
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
}

/// GET /health/live
pub async fn live() -> Json<Value> {
    Json(json!({
        "alive": true,
        "service": SERVICE_NAME,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// GET /api/info
pub async fn info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": state.version,
        "environment": state.environment,
        "endpoints": {
            "health": "GET /health",
            "search": "POST /api/search",
            "airports": "GET /api/airports",
            "search_health": "GET /api/search/health",
        },
    }))
}

fn format_uptime(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, secs % 3600 / 60, secs % 60);
    match (h, m) {
        (0, 0) => format!("{}s", s),
        (0, m) => format!("{}m{}s", m, s),
        (h, m) => format!("{}h{}m{}s", h, m, s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(7), "7s");
        assert_eq!(format_uptime(125), "2m5s");
        assert_eq!(format_uptime(3600 * 26 + 61), "26h1m1s");
    }
}

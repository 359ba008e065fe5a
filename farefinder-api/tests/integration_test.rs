use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Days, Utc};
use farefinder_api::{app, cors_layer, AppState};
use farefinder_core::conversion;
use farefinder_core::offer_schema::{
    FlightOffersResponse, Itinerary, OfferPrice, ProviderOffer, Segment, SegmentEndpoint,
};
use farefinder_core::{
    AirportDirectory, CarrierTable, Flight, FlightProvider, HubRegistry, ProviderError, SearchQuery,
};
use farefinder_routes::RouteOptimizer;
use serde_json::{json, Value};
use tower::ServiceExt;

struct StubProvider {
    offers: Option<FlightOffersResponse>,
    carriers: CarrierTable,
}

#[async_trait]
impl FlightProvider for StubProvider {
    async fn search_flights(&self, _query: &SearchQuery) -> Result<FlightOffersResponse, ProviderError> {
        self.offers
            .clone()
            .ok_or_else(|| ProviderError::Search("status 503: unavailable".into()))
    }

    fn convert_offers(&self, response: &FlightOffersResponse, query: &SearchQuery) -> Vec<Flight> {
        conversion::convert_offers(response, query, &self.carriers)
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match self.offers {
            Some(_) => Ok(()),
            None => Err(ProviderError::Auth("status 401: invalid_client".into())),
        }
    }
}

fn direct_offer(total: &str) -> FlightOffersResponse {
    let segment = Segment {
        departure: SegmentEndpoint { iata_code: "BKK".into(), ..Default::default() },
        arrival: SegmentEndpoint { iata_code: "SIN".into(), ..Default::default() },
        carrier_code: "SQ".into(),
        ..Default::default()
    };

    FlightOffersResponse {
        meta: None,
        data: vec![ProviderOffer {
            id: "1".into(),
            itineraries: vec![Itinerary { duration: "PT2H25M".into(), segments: vec![segment] }],
            price: OfferPrice { currency: "USD".into(), total: total.into(), ..Default::default() },
            ..Default::default()
        }],
    }
}

fn router(offers: Option<FlightOffersResponse>, hubs: HubRegistry) -> Router {
    let provider: Arc<dyn FlightProvider> = Arc::new(StubProvider {
        offers,
        carriers: CarrierTable::default(),
    });
    let optimizer = RouteOptimizer::new(provider.clone(), Arc::new(hubs));
    let state = AppState::new(provider, optimizer, Arc::new(AirportDirectory::builtin()), "test");

    app(state, cors_layer(&["*".to_string()]))
}

fn default_router() -> Router {
    router(Some(direct_offer("450.00")), HubRegistry::default())
}

fn tomorrow() -> String {
    (Utc::now().date_naive() + Days::new(1)).format("%Y-%m-%d").to_string()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_search(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

fn search_body(origin: &str, destination: &str, date: &str, passengers: i64) -> String {
    json!({
        "origin": origin,
        "destination": destination,
        "date": date,
        "passengers": passengers,
    })
    .to_string()
}

#[tokio::test]
async fn test_search_returns_direct_offer_cheapest_first() {
    let (status, body) =
        post_search(default_router(), "/api/search", search_body("bkk", "sin", &tomorrow(), 1)).await;

    assert_eq!(status, StatusCode::OK);
    let flights = body["flights"].as_array().unwrap();
    assert_eq!(body["total"].as_u64().unwrap() as usize, flights.len());
    assert!(!flights.is_empty() && flights.len() <= 10);

    let prices: Vec<f64> = flights.iter().map(|f| f["price"].as_f64().unwrap()).collect();
    assert!(prices.windows(2).all(|w| w[0] <= w[1]));

    let direct = flights.iter().find(|f| f["stops"] == 0).unwrap();
    assert_eq!(direct["price"], 450.0);
    assert_eq!(direct["route"], json!(["BKK", "SIN"]));
    assert_eq!(direct["airline"], "Singapore Airlines");
    assert_eq!(direct["duration"], "2h 25m");

    assert_eq!(body["query"]["origin"], "BKK");
    assert!(body["message"].as_str().unwrap().starts_with("Found"));
    assert!(body["search_id"].is_string());
}

#[tokio::test]
async fn test_search_alias_route() {
    let (status, _) =
        post_search(default_router(), "/search", search_body("BKK", "SIN", &tomorrow(), 2)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_validation_reports_first_violation() {
    let (status, body) =
        post_search(default_router(), "/api/search", search_body("BKK", "bkk", &tomorrow(), 0)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(
        body["message"],
        "Request validation failed: origin and destination cannot be the same"
    );
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn test_unknown_airport_and_past_date_are_rejected() {
    let (status, body) =
        post_search(default_router(), "/api/search", search_body("QQQ", "SIN", &tomorrow(), 1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Request validation failed: invalid origin airport code: QQQ");

    let (status, body) =
        post_search(default_router(), "/api/search", search_body("BKK", "SIN", "2001-01-01", 1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Request validation failed: date must be in YYYY-MM-DD format and not in the past"
    );
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (status, body) =
        post_search(default_router(), "/api/search", "{\"origin\": ".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid request body:"));
}

#[tokio::test]
async fn test_empty_results_serve_fallback_flights() {
    let app = router(None, HubRegistry::new(Vec::new(), Vec::new()));
    let (status, body) = post_search(app, "/api/search", search_body("BKK", "SIN", &tomorrow(), 1)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["message"], "No flights found for your search criteria");
    let stops: Vec<u64> = body["flights"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["stops"].as_u64().unwrap())
        .collect();
    assert!(stops.contains(&0) && stops.contains(&1) && stops.contains(&2));
}

#[tokio::test]
async fn test_provider_failure_still_returns_hub_routes() {
    let app = router(None, HubRegistry::default());
    let (status, body) = post_search(app, "/api/search", search_body("BKK", "SIN", &tomorrow(), 1)).await;

    assert_eq!(status, StatusCode::OK);
    let flights = body["flights"].as_array().unwrap();
    assert_eq!(flights.len(), 10);
    assert!(flights.iter().all(|f| f["stops"].as_u64().unwrap() > 0));
}

#[tokio::test]
async fn test_health_endpoints() {
    let (status, body) = get(default_router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime"].is_string());

    let (status, body) = get(default_router(), "/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);

    let (_, body) = get(default_router(), "/health/live").await;
    assert_eq!(body["alive"], true);

    let (_, body) = get(default_router(), "/api/info").await;
    assert_eq!(body["environment"], "test");
    assert_eq!(body["endpoints"]["search"], "POST /api/search");
}

#[tokio::test]
async fn test_search_health_reports_provider_status() {
    let (_, body) = get(default_router(), "/api/search/health").await;
    assert_eq!(body["provider_service"], "healthy");
    assert!(body["airports_loaded"].as_u64().unwrap() > 0);

    let (status, body) = get(router(None, HubRegistry::default()), "/api/search/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["provider_service"].as_str().unwrap().starts_with("unhealthy: "));
}

#[tokio::test]
async fn test_airport_listing_and_search() {
    let (status, body) = get(default_router(), "/api/airports?q=bkk").await;
    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = body["airports"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["iata"].as_str().unwrap())
        .collect();
    assert!(codes.contains(&"BKK"));
    assert_eq!(body["query"], "bkk");

    let (_, body) = get(default_router(), "/api/airports").await;
    let total = body["total"].as_u64().unwrap();
    assert!(total > 0 && total <= 50);
}

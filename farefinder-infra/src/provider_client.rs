use std::time::Duration;

use async_trait::async_trait;
use farefinder_core::conversion;
use farefinder_core::offer_schema::{FlightOffersResponse, TokenResponse};
use farefinder_core::{CarrierTable, Flight, FlightProvider, ProviderError, SearchQuery};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::app_config::ProviderConfig;

/// Tokens are treated as stale this long before their actual expiry.
pub const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(5 * 60);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_RESULTS: u32 = 250;
const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Default)]
struct TokenState {
    access_token: Option<String>,
    expires_at: Option<Instant>,
}

impl TokenState {
    fn usable(&self, now: Instant) -> Option<&str> {
        match (&self.access_token, self.expires_at) {
            (Some(token), Some(expires_at)) if now + TOKEN_EXPIRY_MARGIN < expires_at => {
                Some(token.as_str())
            }
            _ => None,
        }
    }
}

/// Client for an Amadeus-style flight offers API using OAuth2 client credentials.
pub struct AmadeusClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    carriers: CarrierTable,
    token: RwLock<TokenState>,
}

impl AmadeusClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            carriers: CarrierTable::default(),
            token: RwLock::new(TokenState::default()),
        })
    }

    /// Return the cached bearer token, refreshing it when missing or inside
    /// the expiry margin. Concurrent callers share a single refresh.
    pub async fn access_token(&self) -> Result<String, ProviderError> {
        {
            let state = self.token.read().await;
            if let Some(token) = state.usable(Instant::now()) {
                return Ok(token.to_string());
            }
        }

        let mut state = self.token.write().await;
        // Another caller may have refreshed while we waited for the write lock.
        if let Some(token) = state.usable(Instant::now()) {
            debug!("Access token refreshed by a concurrent caller");
            return Ok(token.to_string());
        }

        let issued = self.request_token().await?;
        let Some(expires_at) = Instant::now().checked_add(Duration::from_secs(issued.expires_in)) else {
            warn!("Token response carried an unusable expires_in of {}", issued.expires_in);
            return Err(ProviderError::Auth(format!(
                "invalid expires_in in token response: {}",
                issued.expires_in
            )));
        };
        state.access_token = Some(issued.access_token.clone());
        state.expires_at = Some(expires_at);
        info!("Obtained provider access token, expires in {}s", issued.expires_in);

        Ok(issued.access_token)
    }

    async fn request_token(&self) -> Result<TokenResponse, ProviderError> {
        let url = format!("{}/v1/security/oauth2/token", self.base_url);
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let resp = self
            .http
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| ProviderError::Auth(format!("failed to request token: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("Token request rejected with status {}", status);
            return Err(ProviderError::Auth(format!(
                "token request failed with status {}: {}",
                status.as_u16(),
                body
            )));
        }

        resp.json::<TokenResponse>()
            .await
            .map_err(|e| ProviderError::Auth(format!("failed to decode token response: {}", e)))
    }
}

#[async_trait]
impl FlightProvider for AmadeusClient {
    async fn search_flights(&self, query: &SearchQuery) -> Result<FlightOffersResponse, ProviderError> {
        let token = self.access_token().await?;

        let url = format!("{}/v2/shopping/flight-offers", self.base_url);
        let date = query.date_param();
        let adults = query.passengers.to_string();
        let max = MAX_RESULTS.to_string();
        let params = [
            ("originLocationCode", query.origin.as_str()),
            ("destinationLocationCode", query.destination.as_str()),
            ("departureDate", date.as_str()),
            ("adults", adults.as_str()),
            ("max", max.as_str()),
            ("currencyCode", DEFAULT_CURRENCY),
        ];

        let resp = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .query(&params)
            .send()
            .await
            .map_err(|e| ProviderError::Search(format!("failed to search flights: {}", e)))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ProviderError::Search(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(ProviderError::Search(format!(
                "flight search failed with status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let offers: FlightOffersResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::Search(format!("failed to decode flight response: {}: {}", e, body))
        })?;
        debug!(
            "Provider returned {} offers for {} -> {}",
            offers.data.len(),
            query.origin,
            query.destination
        );

        Ok(offers)
    }

    fn convert_offers(&self, response: &FlightOffersResponse, query: &SearchQuery) -> Vec<Flight> {
        conversion::convert_offers(response, query, &self.carriers)
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        self.access_token().await.map(|_| ())
    }
}

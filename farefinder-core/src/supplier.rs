use async_trait::async_trait;

use crate::offer_schema::FlightOffersResponse;
use crate::search::{Flight, SearchQuery};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Token acquisition failed.
    #[error("Authentication with flight provider failed: {0}")]
    Auth(String),
    /// The offer search call failed; carries upstream status and body when known.
    #[error("Flight search failed: {0}")]
    Search(String),
}

/// External source of flight offers.
#[async_trait]
pub trait FlightProvider: Send + Sync {
    /// Run an offer search for the query and return the raw provider payload.
    async fn search_flights(&self, query: &SearchQuery) -> Result<FlightOffersResponse, ProviderError>;

    /// Normalize a provider payload into flights for the given query.
    fn convert_offers(&self, response: &FlightOffersResponse, query: &SearchQuery) -> Vec<Flight>;

    /// Succeeds when the provider will issue an access token.
    async fn health_check(&self) -> Result<(), ProviderError>;
}

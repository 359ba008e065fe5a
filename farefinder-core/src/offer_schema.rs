use serde::{Deserialize, Serialize};

// ============================================================================
// OAuth2 client-credentials token
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub expires_in: u64,
}

// ============================================================================
// Flight Offers Search
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightOffersResponse {
    #[serde(default)]
    pub meta: Option<OffersMeta>,
    #[serde(default)]
    pub data: Vec<ProviderOffer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OffersMeta {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub links: serde_json::Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOffer {
    pub id: String,
    #[serde(default, rename = "type")]
    pub offer_type: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub one_way: bool,
    #[serde(default)]
    pub last_ticketing_date: Option<String>,
    #[serde(default)]
    pub number_of_bookable_seats: Option<u32>,
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
    pub price: OfferPrice,
    #[serde(default)]
    pub validating_airline_codes: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Itinerary {
    /// ISO-8601 style duration, e.g. `PT2H30M`.
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub departure: SegmentEndpoint,
    pub arrival: SegmentEndpoint,
    pub carrier_code: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub number_of_stops: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentEndpoint {
    pub iata_code: String,
    #[serde(default)]
    pub terminal: Option<String>,
    #[serde(default)]
    pub at: String,
}

/// Amounts arrive as decimal strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferPrice {
    pub currency: String,
    pub total: String,
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub grand_total: String,
}

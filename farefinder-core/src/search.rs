use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Search body as posted by clients, before normalization.
///
/// Fields default so that a missing value surfaces as a validation message
/// instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlightSearchRequest {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub passengers: i64,
}

/// A validated, normalized search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub passengers: u8,
}

impl SearchQuery {
    pub fn new(origin: &str, destination: &str, date: NaiveDate, passengers: u8) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            date,
            passengers,
        }
    }

    /// Date in the `YYYY-MM-DD` form the provider expects.
    pub fn date_param(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// A single priced flight option, real or synthesized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub price: f64,
    pub currency: String,
    pub airline: String,
    pub duration: String,
    pub stops: u32,
    /// Airport codes from origin to destination; always `stops + 2` long.
    pub route: Vec<String>,
    #[serde(
        rename = "bookingUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub booking_url: Option<String>,
}

impl Flight {
    pub fn is_direct(&self) -> bool {
        self.stops == 0
    }
}

#[derive(Debug, Serialize)]
pub struct FlightSearchResponse {
    pub search_id: Uuid,
    pub flights: Vec<Flight>,
    pub message: String,
    pub total: usize,
    pub query: SearchQuery,
}

impl FlightSearchResponse {
    pub fn new(query: SearchQuery, flights: Vec<Flight>, message: String) -> Self {
        Self {
            search_id: Uuid::new_v4(),
            total: flights.len(),
            flights,
            message,
            query,
        }
    }
}

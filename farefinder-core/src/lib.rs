pub mod airports;
pub mod carriers;
pub mod conversion;
pub mod hubs;
pub mod offer_schema;
pub mod search;
pub mod supplier;
pub mod validation;

pub use airports::{Airport, AirportDirectory};
pub use carriers::CarrierTable;
pub use hubs::HubRegistry;
pub use search::{Flight, FlightSearchRequest, FlightSearchResponse, SearchQuery};
pub use supplier::{FlightProvider, ProviderError};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Airport data error: {0}")]
    AirportData(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

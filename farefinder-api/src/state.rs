use std::sync::Arc;
use std::time::Instant;

use farefinder_core::{AirportDirectory, FlightProvider};
use farefinder_routes::RouteOptimizer;

#[derive(Clone)]
pub struct AppState {
    pub optimizer: RouteOptimizer,
    pub provider: Arc<dyn FlightProvider>,
    pub airports: Arc<AirportDirectory>,
    /// Require searched codes to be present in `airports`.
    pub validate_codes: bool,
    pub environment: String,
    pub version: &'static str,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn FlightProvider>,
        optimizer: RouteOptimizer,
        airports: Arc<AirportDirectory>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            optimizer,
            provider,
            airports,
            validate_codes: true,
            environment: environment.into(),
            version: env!("CARGO_PKG_VERSION"),
            started_at: Instant::now(),
        }
    }

    pub fn with_code_validation(mut self, enabled: bool) -> Self {
        self.validate_codes = enabled;
        self
    }
}

pub mod app_config;
pub mod provider_client;

pub use app_config::Config;
pub use provider_client::AmadeusClient;

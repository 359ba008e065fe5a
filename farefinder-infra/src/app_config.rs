use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    #[serde(default)]
    pub airports: AirportsConfig,
    #[serde(default = "default_environment")]
    pub environment: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// `*` allows any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AirportsConfig {
    pub csv_path: Option<String>,
    /// Require searched codes to exist in the airport directory.
    #[serde(default = "default_validate_codes")]
    pub validate_codes: bool,
}

impl Default for AirportsConfig {
    fn default() -> Self {
        Self {
            csv_path: None,
            validate_codes: default_validate_codes(),
        }
    }
}

fn default_port() -> u16 { 8080 }
fn default_environment() -> String { "development".into() }
fn default_base_url() -> String { "https://test.api.amadeus.com".into() }
fn default_validate_codes() -> bool { true }
fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".into(), "http://frontend:3000".into()]
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("{0} is required")]
    Missing(&'static str),
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `FAREFINDER__PROVIDER__CLIENT_ID=abc` sets `provider.client_id`
            .add_source(
                config::Environment::with_prefix("FAREFINDER")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Credentials and base URL are required to reach the flight provider.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.base_url.trim().is_empty() {
            return Err(ConfigError::Missing("provider.base_url"));
        }
        if self.provider.client_id.trim().is_empty() {
            return Err(ConfigError::Missing("provider.client_id"));
        }
        if self.provider.client_secret.trim().is_empty() {
            return Err(ConfigError::Missing("provider.client_secret"));
        }
        Ok(())
    }
}

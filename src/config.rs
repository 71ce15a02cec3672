use std::{env, sync::Arc, time::Duration};

use thiserror::Error;

use crate::logic::zone::{RapidApiZoneLookup, StubZoneLookup, ZoneError, ZoneLookup, DEFAULT_RAPIDAPI_HOST};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_ZONE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown zone provider '{0}' (expected 'stub' or 'rapidapi')")]
    UnknownProvider(String),
    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
    #[error(transparent)]
    Zone(#[from] ZoneError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneProvider {
    Stub,
    RapidApi,
}

impl std::str::FromStr for ZoneProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stub" => Ok(Self::Stub),
            "rapidapi" => Ok(Self::RapidApi),
            other => Err(ConfigError::UnknownProvider(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub zone_provider: ZoneProvider,
    pub rapidapi_key: Option<String>,
    pub rapidapi_host: String,
    pub zone_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_owned(),
            zone_provider: ZoneProvider::Stub,
            rapidapi_key: None,
            rapidapi_host: DEFAULT_RAPIDAPI_HOST.to_owned(),
            zone_timeout: Duration::from_secs(DEFAULT_ZONE_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; unset variables keep their defaults.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(addr) = var("GARDEN_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(provider) = var("GARDEN_ZONE_PROVIDER") {
            config.zone_provider = provider.parse()?;
        }
        config.rapidapi_key = var("RAPIDAPI_KEY").filter(|k| !k.is_empty());
        if let Some(host) = var("RAPIDAPI_HOST").filter(|h| !h.is_empty()) {
            config.rapidapi_host = host;
        }
        if let Some(secs) = var("GARDEN_ZONE_TIMEOUT_SECS") {
            let parsed = secs.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                name: "GARDEN_ZONE_TIMEOUT_SECS",
                value: secs.clone(),
            })?;
            config.zone_timeout = Duration::from_secs(parsed);
        }
        Ok(config)
    }

    /// The zone lookup selected by `zone_provider`.
    pub fn zone_lookup(&self) -> Result<Arc<dyn ZoneLookup>, ConfigError> {
        Ok(match self.zone_provider {
            ZoneProvider::Stub => Arc::new(StubZoneLookup::new()),
            ZoneProvider::RapidApi => Arc::new(RapidApiZoneLookup::new(
                self.rapidapi_key.clone(),
                self.rapidapi_host.clone(),
                self.zone_timeout,
            )?),
        })
    }
}

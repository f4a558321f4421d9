use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::workflows::slides::matching::{
    DimensionId, DimensionToggles, DimensionWeights, MatchingConfig,
};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub matching: MatchingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let matching = load_matching_config()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            matching,
        })
    }
}

/// Merge the standard weight table with the `MATCH_WEIGHTS` and
/// `MATCH_DISABLED_DIMENSIONS` overrides. Sum-to-1 validation happens when
/// the engine is built, so a bad override still fails before the service
/// accepts a match request.
fn load_matching_config() -> Result<MatchingConfig, ConfigError> {
    let mut weights = DimensionWeights::standard();
    if let Ok(raw) = env::var("MATCH_WEIGHTS") {
        apply_weight_overrides(&mut weights, &raw)?;
    }

    let mut enabled = DimensionToggles::default();
    if let Ok(raw) = env::var("MATCH_DISABLED_DIMENSIONS") {
        for name in raw.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            let dimension = DimensionId::from_str(name).map_err(|_| {
                ConfigError::UnknownDimension {
                    name: name.to_string(),
                }
            })?;
            enabled.disable(dimension);
        }
    }

    Ok(MatchingConfig { weights, enabled })
}

fn apply_weight_overrides(
    weights: &mut DimensionWeights,
    raw: &str,
) -> Result<(), ConfigError> {
    for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let (name, value) = entry
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidWeightEntry {
                entry: entry.to_string(),
            })?;
        let dimension =
            DimensionId::from_str(name.trim()).map_err(|_| ConfigError::UnknownDimension {
                name: name.trim().to_string(),
            })?;
        let weight = value
            .trim()
            .parse::<f32>()
            .map_err(|_| ConfigError::InvalidWeightValue {
                dimension,
                raw: value.trim().to_string(),
            })?;
        weights.set(dimension, weight);
    }
    Ok(())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidWeightEntry { entry: String },
    InvalidWeightValue { dimension: DimensionId, raw: String },
    UnknownDimension { name: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidWeightEntry { entry } => {
                write!(
                    f,
                    "MATCH_WEIGHTS entry '{entry}' must look like dimension=weight"
                )
            }
            ConfigError::InvalidWeightValue { dimension, raw } => {
                write!(f, "weight '{raw}' for {dimension} is not a number")
            }
            ConfigError::UnknownDimension { name } => {
                write!(f, "'{name}' is not a known matching dimension")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

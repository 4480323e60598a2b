//! Worker configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PLATFORM_BASE_URL` - Base URL of the retailer platform's internal API
//! - `WMS_INTEGRATIONS` - JSON array of per-retailer warehouse integrations
//!   (see [`WarehouseIntegration`]); credential persistence itself lives in
//!   the platform's configuration store, this is only the loading seam
//!
//! ## Optional
//! - `WORKER_HOST` - Bind address (default: 127.0.0.1)
//! - `WORKER_PORT` - Listen port (default: 3002)
//! - `WMS_HTTP_TIMEOUT_SECS` - Outbound HTTP timeout (default: 30)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use return_sync_core::{GoodsOwnerId, RetailerId};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3002;
const DEFAULT_WMS_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// IP address to bind the event endpoints to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the retailer platform's internal API
    pub platform_base_url: Url,
    /// Timeout applied to every outbound WMS and platform call
    pub http_timeout: Duration,
    /// Per-retailer warehouse integrations, one per retailer per WMS type
    pub integrations: Vec<WarehouseIntegration>,
}

/// Credentials and tenant coordinates for one retailer's WMS integration.
///
/// Immutable once loaded for a run. `warehouse_name` is the WMS tenant code
/// embedded in the API base URL; `goods_owner_id` is the WMS-side tenant id
/// the webhook events carry.
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseIntegration {
    pub retailer_id: RetailerId,
    pub goods_owner_id: GoodsOwnerId,
    pub warehouse_name: String,
    pub username: String,
    pub password: SecretString,
}

impl WorkerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = optional_env("WORKER_HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("WORKER_HOST".into(), e.to_string()))?;

        let port = match optional_env("WORKER_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidEnvVar("WORKER_PORT".into(), e.to_string()))?,
            None => DEFAULT_PORT,
        };

        let platform_base_url = required_env("PLATFORM_BASE_URL")?
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("PLATFORM_BASE_URL".into(), e.to_string()))?;

        let http_timeout = match optional_env("WMS_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("WMS_HTTP_TIMEOUT_SECS".into(), e.to_string())
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_WMS_TIMEOUT_SECS),
        };

        let integrations = parse_integrations(&required_env("WMS_INTEGRATIONS")?)?;

        Ok(Self {
            host,
            port,
            platform_base_url,
            http_timeout,
            integrations,
        })
    }

    /// Socket address for the event endpoints.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_integrations(raw: &str) -> Result<Vec<WarehouseIntegration>, ConfigError> {
    serde_json::from_str(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("WMS_INTEGRATIONS".into(), e.to_string()))
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

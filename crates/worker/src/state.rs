//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::WorkerConfig;
use crate::ongoing::OngoingClient;
use crate::platform::PlatformClient;
use crate::reconcile::IntegrationResolver;

/// Error building the shared clients from configuration.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("warehouse client: {0}")]
    Warehouse(#[from] crate::error::WarehouseError),
    #[error("platform client: {0}")]
    Platform(#[from] crate::error::PlatformError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// outbound API clients and the configured integrations.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WorkerConfig,
    warehouse: OngoingClient,
    platform: PlatformClient,
    integrations: IntegrationResolver,
}

impl AppState {
    /// Create a new application state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client fails to build.
    pub fn new(config: WorkerConfig) -> Result<Self, StateError> {
        let warehouse = OngoingClient::new(config.http_timeout)?;
        let platform = PlatformClient::new(config.platform_base_url.clone(), config.http_timeout)?;
        let integrations = IntegrationResolver::new(config.integrations.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                warehouse,
                platform,
                integrations,
            }),
        })
    }

    /// Get a reference to the worker configuration.
    #[must_use]
    pub fn config(&self) -> &WorkerConfig {
        &self.inner.config
    }

    /// Get a reference to the Ongoing WMS client.
    #[must_use]
    pub fn warehouse(&self) -> &OngoingClient {
        &self.inner.warehouse
    }

    /// Get a reference to the retailer platform client.
    #[must_use]
    pub fn platform(&self) -> &PlatformClient {
        &self.inner.platform
    }

    /// Get a reference to the configured integrations.
    #[must_use]
    pub fn integrations(&self) -> &IntegrationResolver {
        &self.inner.integrations
    }
}

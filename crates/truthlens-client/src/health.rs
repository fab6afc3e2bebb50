//! Bounded-time liveness check against the health endpoint

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;

use truthlens_core::{with_deadline, DeadlineElapsed, Error, HealthProbe, ProbeFailure, RemoteError, Result};

use crate::config::{ApiConfig, Endpoint};

/// Checks whether the analysis service is reachable without ever hanging
/// longer than the configured health timeout.
pub struct HealthProber {
    config: ApiConfig,
    client: Client,
}

impl HealthProber {
    /// Create a new prober from configuration
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Remote(RemoteError::Network(e.to_string())))?;

        Ok(Self::with_client(config, client))
    }

    /// Create a prober sharing an existing HTTP client
    pub fn with_client(config: ApiConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Run one probe and report why it failed, if it did.
    ///
    /// The request is dropped, and with it the connection, once the deadline passes.
    pub async fn check(&self) -> std::result::Result<(), ProbeFailure> {
        let url = self.config.url(Endpoint::Health);
        let request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send();

        match with_deadline(self.config.health_timeout, request).await {
            Err(DeadlineElapsed(after)) => Err(ProbeFailure::TimedOut(after)),
            Ok(Err(e)) => Err(ProbeFailure::Unreachable(e.to_string())),
            Ok(Ok(response)) if response.status().is_success() => Ok(()),
            Ok(Ok(response)) => Err(ProbeFailure::Unhealthy(response.status().as_u16())),
        }
    }
}

#[async_trait]
impl HealthProbe for HealthProber {
    async fn probe(&self) -> bool {
        match self.check().await {
            Ok(()) => true,
            Err(failure) => {
                match &failure {
                    ProbeFailure::TimedOut(_) => tracing::warn!("API health check timed out"),
                    ProbeFailure::Unreachable(reason) => {
                        tracing::error!(%reason, "API health check failed")
                    }
                    ProbeFailure::Unhealthy(status) => {
                        tracing::debug!(status, "API health endpoint reported failure")
                    }
                }
                false
            }
        }
    }
}

//! Analysis client implementation

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;

use truthlens_core::{
    with_deadline, AnalysisRequest, AnalysisResult, BiasLabel, ContentAnalyzer, Error,
    LatestResult, RemoteError, Result,
};

use crate::config::{ApiConfig, Endpoint};

/// Client for the analyze endpoint.
///
/// Owns the latest-result cell: every successful call replaces it, failed calls
/// leave it alone.
pub struct AnalysisClient {
    config: ApiConfig,
    client: Client,
    latest: LatestResult,
}

/// Verdict as the service puts it on the wire
#[derive(Deserialize)]
struct WireVerdict {
    factual_accuracy: f64,
    bias: String,
    emotional_tone: String,
    recommendation: String,
}

impl WireVerdict {
    fn into_result(self) -> std::result::Result<AnalysisResult, RemoteError> {
        let bias = BiasLabel::parse(&self.bias)
            .ok_or_else(|| RemoteError::Malformed(format!("unknown bias label {:?}", self.bias)))?;

        Ok(AnalysisResult {
            factual_accuracy: self.factual_accuracy,
            bias,
            emotional_level: self.emotional_tone,
            recommendation: self.recommendation,
        })
    }
}

impl AnalysisClient {
    /// Create a new analysis client from configuration
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Remote(RemoteError::Network(e.to_string())))?;

        Ok(Self::with_client(config, client))
    }

    /// Create a client sharing an existing HTTP client
    pub fn with_client(config: ApiConfig, client: Client) -> Self {
        Self {
            config,
            client,
            latest: LatestResult::new(),
        }
    }

    /// Perform the request and translate the response
    async fn perform_analysis(&self, text: &str) -> std::result::Result<AnalysisResult, RemoteError> {
        let url = self.config.url(Endpoint::Analyze);

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&AnalysisRequest::new(text))
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let verdict: WireVerdict = serde_json::from_str(&body)?;
        verdict.into_result()
    }
}

#[async_trait]
impl ContentAnalyzer for AnalysisClient {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let outcome = match self.config.analysis_timeout {
            Some(deadline) => with_deadline(deadline, self.perform_analysis(text))
                .await
                .unwrap_or_else(|elapsed| Err(RemoteError::TimedOut(elapsed.0))),
            None => self.perform_analysis(text).await,
        };

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "analysis request failed");
                return Err(e.into());
            }
        };

        tracing::debug!(
            factual_accuracy = result.factual_accuracy,
            bias = %result.bias,
            "analysis completed"
        );
        self.latest.store(result.clone());
        Ok(result)
    }

    fn latest(&self) -> Option<AnalysisResult> {
        self.latest.get()
    }
}

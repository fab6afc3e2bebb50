//! TruthLens analysis service client
//!
//! This crate resolves the service endpoints from configuration and provides the
//! HTTP implementations of the `ContentAnalyzer` and `HealthProbe` traits.

mod client;
mod config;
mod health;

#[cfg(test)]
mod tests;

pub use client::AnalysisClient;
pub use config::{
    ApiConfig, Endpoint, Environment, DEFAULT_HEALTH_TIMEOUT, DEVELOPMENT_BASE_URL,
    PRODUCTION_BASE_URL,
};
pub use health::HealthProber;

// Re-export core types for convenience
pub use truthlens_core::{
    AnalysisResult, BiasLabel, ContentAnalyzer, Error, HealthProbe, ProbeFailure, RemoteError,
    Result,
};

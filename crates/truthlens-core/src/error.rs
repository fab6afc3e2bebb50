//! Error types for TruthLens

use std::time::Duration;
use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the TruthLens client
#[derive(Error, Debug)]
pub enum Error {
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl Error {
    /// Whether this error came from the analysis service rather than local setup
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Remote(_))
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

/// Failure of a call to the analysis service.
///
/// Callers are expected to treat every variant the same way; the split only
/// exists so logs can say what went wrong.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("service answered with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("no response within {0:?}")]
    TimedOut(Duration),
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::Malformed(err.to_string())
    }
}

/// Reason a health probe did not report the service as reachable.
///
/// Never propagated past the prober: `probe()` folds all of these into `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    #[error("health check timed out after {0:?}")]
    TimedOut(Duration),

    #[error("health check failed: {0}")]
    Unreachable(String),

    #[error("health endpoint answered with status {0}")]
    Unhealthy(u16),
}

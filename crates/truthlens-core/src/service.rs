//! Capability traits for the analysis service

use async_trait::async_trait;

use crate::{AnalysisResult, Result};

/// Submits text to an analysis backend and remembers the latest verdict.
///
/// Implementations must not assume the backend is deterministic: two identical
/// submissions may legitimately produce different verdicts.
#[async_trait]
pub trait ContentAnalyzer: Send + Sync {
    /// Analyze `text`. Failures are always [`crate::Error::Remote`] and leave
    /// the latest verdict untouched.
    async fn analyze(&self, text: &str) -> Result<AnalysisResult>;

    /// Most recent successful verdict
    fn latest(&self) -> Option<AnalysisResult>;
}

/// Answers "is the analysis service reachable right now?"
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Never fails: every problem reads as `false`.
    async fn probe(&self) -> bool;
}

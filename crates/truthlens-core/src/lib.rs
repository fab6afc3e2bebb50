//! Core traits and types for TruthLens
//!
//! This crate defines the data model shared by the analysis client and the
//! terminal front end: the verdict returned by the remote service, the
//! single-slot cell holding the latest verdict, the deadline primitive used to
//! bound remote calls, and the capability traits the front end is written against.

pub mod analysis;
pub mod deadline;
pub mod error;
pub mod latest;
pub mod service;

pub use analysis::{AnalysisRequest, AnalysisResult, BiasLabel};
pub use deadline::{with_deadline, DeadlineElapsed};
pub use error::{Error, ProbeFailure, RemoteError, Result};
pub use latest::LatestResult;
pub use service::{ContentAnalyzer, HealthProbe};

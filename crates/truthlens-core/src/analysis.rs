//! Analysis request and verdict types

use serde::{Deserialize, Serialize};

/// Perceived political slant of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasLabel {
    Left,
    Right,
    Neutral,
}

impl BiasLabel {
    /// Get all labels
    pub fn all() -> [BiasLabel; 3] {
        [BiasLabel::Left, BiasLabel::Right, BiasLabel::Neutral]
    }

    /// Wire and display form of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            BiasLabel::Left => "left",
            BiasLabel::Right => "right",
            BiasLabel::Neutral => "neutral",
        }
    }

    /// Parse a label as sent by the service, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<BiasLabel> {
        match s.trim().to_lowercase().as_str() {
            "left" => Some(BiasLabel::Left),
            "right" => Some(BiasLabel::Right),
            "neutral" => Some(BiasLabel::Neutral),
            _ => None,
        }
    }
}

impl std::fmt::Display for BiasLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Text submitted for analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(rename = "input_text")]
    pub text: String,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Verdict produced by the analysis service for one piece of text.
///
/// A verdict is never patched in place: every completed analysis yields a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Factual-accuracy score, documented range 0-100
    pub factual_accuracy: f64,
    pub bias: BiasLabel,
    /// Emotional tone as worded by the service, e.g. "Slightly emotional"
    pub emotional_level: String,
    pub recommendation: String,
}

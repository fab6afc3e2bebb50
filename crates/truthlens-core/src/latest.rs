//! Single-slot holder for the most recent verdict

use std::sync::{Mutex, MutexGuard};

use crate::AnalysisResult;

/// Holds the most recent successful analysis, or nothing before the first one.
///
/// The slot is only ever replaced as a whole. Concurrent writers race on the
/// lock, so the value left behind is the one stored last.
#[derive(Debug, Default)]
pub struct LatestResult {
    slot: Mutex<Option<AnalysisResult>>,
}

impl LatestResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held verdict
    pub fn store(&self, result: AnalysisResult) {
        *self.lock() = Some(result);
    }

    /// Copy of the held verdict, if any
    pub fn get(&self) -> Option<AnalysisResult> {
        self.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    fn lock(&self) -> MutexGuard<'_, Option<AnalysisResult>> {
        // A poisoned slot still holds a whole value; writers never leave it half-set.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

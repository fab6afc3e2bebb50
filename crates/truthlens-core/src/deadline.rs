//! Cancellable call with a deadline
//!
//! Remote calls that must not hang are wrapped in [`with_deadline`]. When the
//! deadline passes first the wrapped future is dropped, which for an HTTP
//! request aborts it and releases its connection.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::timeout;

/// The deadline passed before the call completed; the call was cancelled
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("deadline of {0:?} elapsed")]
pub struct DeadlineElapsed(pub Duration);

/// Run `call` to completion unless `deadline` passes first.
///
/// Every invocation arms its own timer; nothing is shared between calls.
pub async fn with_deadline<F, T>(deadline: Duration, call: F) -> Result<T, DeadlineElapsed>
where
    F: Future<Output = T>,
{
    match timeout(deadline, call).await {
        Ok(output) => Ok(output),
        Err(_) => {
            tracing::debug!(?deadline, "call cancelled at deadline");
            Err(DeadlineElapsed(deadline))
        }
    }
}

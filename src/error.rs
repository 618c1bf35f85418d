//! Failure taxonomy for lookups and waits.
//!
//! Two boundaries matter here. A single lookup attempt can fail with
//! [`LookupError::NotFound`], which the polling loop absorbs and retries,
//! or with [`LookupError::Backend`], which aborts the wait immediately.
//! The only failures a caller observes from a wait are [`WaitError`]
//! variants; `NotFound` never crosses that boundary.

use std::time::Duration;
use thiserror::Error;

/// Failure of a single lookup attempt against the driver.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Nothing matched the selector within the implicit timeout.
    ///
    /// Absorbed by [`PollingWait`](crate::PollingWait) and retried; never
    /// surfaced to wait callers.
    #[error("no element matched '{selector}' after {waited:?}")]
    NotFound { selector: String, waited: Duration },

    /// Any other driver failure (protocol error, dead session, ...).
    /// Propagates immediately, without further retries.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl LookupError {
    pub fn not_found(selector: impl Into<String>, waited: Duration) -> Self {
        Self::NotFound {
            selector: selector.into(),
            waited,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Terminal outcome of a polling wait.
#[derive(Debug, Error)]
pub enum WaitError {
    /// The total timeout elapsed with no successful attempt.
    ///
    /// This is the only failure a caller should expect from a wait on a
    /// guaranteed-absent target.
    #[error("condition not met within {timeout:?} ({attempts} attempts over {elapsed:?})")]
    Timeout {
        timeout: Duration,
        elapsed: Duration,
        attempts: u32,
        /// Last per-attempt failure observed before giving up, if any.
        last_failure: Option<LookupError>,
    },

    /// An unexpected driver error surfaced mid-wait.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl WaitError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

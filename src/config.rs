//! Explicit wait configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Total timeout used when the caller passes 0 (i.e. "no preference").
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Hard cap on the total timeout; larger requests are clamped.
pub const MAX_WAIT_TIMEOUT_MS: u64 = 120_000;

/// Default interval between polling attempts.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Caller-scoped wait settings: a total timeout and a polling interval.
///
/// A fresh config is supplied per wait call; the session-wide implicit
/// timeout lives on [`ImplicitWaitSource`](crate::ImplicitWaitSource)
/// instead. If `timeout < poll_interval` the wait degenerates to a single
/// attempt (see [`is_single_attempt`](Self::is_single_attempt)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitConfig {
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
}

impl WaitConfig {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Custom timeout, default polling interval.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(
            timeout,
            Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        )
    }

    /// True when the timeout is shorter than the polling interval, in which
    /// case the loop runs exactly one attempt before giving up.
    pub fn is_single_attempt(&self) -> bool {
        self.timeout < self.poll_interval
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// Validate a wait timeout value.
///
/// Returns an error if the timeout exceeds the maximum allowed value.
pub fn validate_timeout(timeout_ms: u64) -> anyhow::Result<u64> {
    if timeout_ms > MAX_WAIT_TIMEOUT_MS {
        anyhow::bail!(
            "Wait timeout {} ms exceeds maximum allowed {} ms",
            timeout_ms,
            MAX_WAIT_TIMEOUT_MS
        );
    }
    Ok(timeout_ms)
}

/// Get the effective timeout value.
///
/// Returns the provided timeout if valid, otherwise the default (for 0) or
/// the cap (for oversized values).
pub fn effective_timeout(timeout_ms: u64) -> u64 {
    if timeout_ms == 0 {
        DEFAULT_WAIT_TIMEOUT_MS
    } else if timeout_ms > MAX_WAIT_TIMEOUT_MS {
        MAX_WAIT_TIMEOUT_MS
    } else {
        timeout_ms
    }
}

//! The explicit polling-wait retry loop.

use crate::clock::{Clock, MonotonicClock};
use crate::config::WaitConfig;
use crate::error::{LookupError, WaitError};
use std::sync::Arc;
use std::time::Duration;

/// Caller-scoped retry loop over a lookup operation.
///
/// A `PollingWait` is created fresh per call-site and discarded once the
/// wait resolves or times out; the session-wide implicit timeout lives on
/// [`ImplicitWaitSource`](crate::ImplicitWaitSource) instead. The loop runs
/// on the calling thread and blocks for the full duration of each attempt.
///
/// How long a wait on an absent target takes depends on whether the lookup
/// is singular or plural; the closed-form envelopes are in
/// [`latency`](crate::latency).
pub struct PollingWait {
    config: WaitConfig,
    clock: Arc<dyn Clock>,
}

impl PollingWait {
    /// Wait driven by real wall-clock time.
    pub fn new(config: WaitConfig) -> Self {
        Self::with_clock(config, Arc::new(MonotonicClock::new()))
    }

    /// Wait driven by the supplied clock. Pass the same clock the
    /// [`ImplicitWaitSource`](crate::ImplicitWaitSource) uses so the two
    /// layers observe one timeline.
    pub fn with_clock(config: WaitConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &WaitConfig {
        &self.config
    }

    /// Repeatedly invoke `op` until it yields a value or the total timeout
    /// elapses.
    ///
    /// Any `Ok` resolves the wait — including an empty vector from a plural
    /// lookup; callers that require a non-empty result should use
    /// [`until_with`](Self::until_with). `NotFound` failures are absorbed
    /// and retried after `poll_interval`; any other failure aborts the wait
    /// immediately.
    pub fn until<T, F>(&self, op: F) -> Result<T, WaitError>
    where
        F: FnMut() -> Result<T, LookupError>,
    {
        self.until_with(op, |_| true)
    }

    /// Like [`until`](Self::until), with a predicate judging each `Ok`
    /// value. Rejected values are retried exactly like `NotFound`.
    ///
    /// The total timeout is checked after each failed attempt, so an
    /// attempt already in flight when the deadline passes still runs to
    /// completion; the observed duration can exceed `config.timeout` by up
    /// to one attempt plus one polling interval.
    pub fn until_with<T, F, P>(&self, mut op: F, mut accept: P) -> Result<T, WaitError>
    where
        F: FnMut() -> Result<T, LookupError>,
        P: FnMut(&T) -> bool,
    {
        let start = self.clock.now();
        let mut attempts: u32 = 0;
        let mut last_failure: Option<LookupError> = None;

        loop {
            attempts += 1;
            match op() {
                Ok(value) if accept(&value) => {
                    tracing::debug!(
                        attempts,
                        elapsed = ?self.elapsed_since(start),
                        "wait resolved"
                    );
                    return Ok(value);
                }
                Ok(_) => {
                    tracing::debug!(attempts, "attempt produced a rejected value");
                    last_failure = None;
                }
                Err(err @ LookupError::NotFound { .. }) => {
                    tracing::debug!(attempts, %err, "attempt failed, will retry");
                    last_failure = Some(err);
                }
                Err(LookupError::Backend(err)) => {
                    tracing::warn!(attempts, %err, "unexpected driver error, aborting wait");
                    return Err(WaitError::Failed(err));
                }
            }

            let elapsed = self.elapsed_since(start);
            if elapsed >= self.config.timeout {
                tracing::warn!(
                    attempts,
                    ?elapsed,
                    timeout = ?self.config.timeout,
                    "wait timed out"
                );
                return Err(WaitError::Timeout {
                    timeout: self.config.timeout,
                    elapsed,
                    attempts,
                    last_failure,
                });
            }

            self.clock.sleep(self.config.poll_interval);
        }
    }

    fn elapsed_since(&self, start: Duration) -> Duration {
        self.clock.now().saturating_sub(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::VirtualClock;

    fn wait_on(clock: &Arc<VirtualClock>, timeout: Duration, poll: Duration) -> PollingWait {
        PollingWait::with_clock(WaitConfig::new(timeout, poll), clock.clone())
    }

    // ==================== Resolution ====================

    #[test]
    fn test_until_resolves_on_first_success() {
        let clock = Arc::new(VirtualClock::new());
        let wait = wait_on(&clock, Duration::from_secs(4), Duration::from_millis(500));

        let value = wait.until(|| Ok::<_, LookupError>(42)).unwrap();
        assert_eq!(value, 42);
        assert_eq!(clock.now(), Duration::ZERO);
    }

    #[test]
    fn test_until_accepts_empty_sequence() {
        let clock = Arc::new(VirtualClock::new());
        let wait = wait_on(&clock, Duration::from_secs(4), Duration::from_millis(500));

        let found: Vec<u8> = wait.until(|| Ok(Vec::new())).unwrap();
        assert!(found.is_empty());
        assert_eq!(clock.now(), Duration::ZERO);
    }

    #[test]
    fn test_until_retries_not_found_until_success() {
        let clock = Arc::new(VirtualClock::new());
        let wait = wait_on(&clock, Duration::from_secs(4), Duration::from_millis(500));

        let mut calls = 0;
        let value = wait
            .until(|| {
                calls += 1;
                if calls < 3 {
                    Err(LookupError::not_found("#late", Duration::ZERO))
                } else {
                    Ok("element")
                }
            })
            .unwrap();

        assert_eq!(value, "element");
        assert_eq!(calls, 3);
        // Two polling intervals between the three attempts.
        assert_eq!(clock.now(), Duration::from_secs(1));
    }

    #[test]
    fn test_until_with_retries_rejected_values() {
        let clock = Arc::new(VirtualClock::new());
        let wait = wait_on(&clock, Duration::from_secs(4), Duration::from_millis(500));

        let mut calls = 0;
        let found = wait
            .until_with(
                || {
                    calls += 1;
                    Ok::<_, LookupError>(if calls < 2 { vec![] } else { vec!["element"] })
                },
                |found| !found.is_empty(),
            )
            .unwrap();

        assert_eq!(found, vec!["element"]);
        assert_eq!(calls, 2);
    }

    // ==================== Timeout ====================

    #[test]
    fn test_until_times_out_with_accounting() {
        let clock = Arc::new(VirtualClock::new());
        let wait = wait_on(&clock, Duration::from_secs(2), Duration::from_millis(500));

        let err = wait
            .until(|| Err::<(), _>(LookupError::not_found("#missing", Duration::ZERO)))
            .unwrap_err();

        match err {
            WaitError::Timeout {
                timeout,
                elapsed,
                attempts,
                last_failure,
            } => {
                assert_eq!(timeout, Duration::from_secs(2));
                assert_eq!(elapsed, Duration::from_secs(2));
                // Attempts at 0, 0.5, 1.0, 1.5 and 2.0 s.
                assert_eq!(attempts, 5);
                assert!(last_failure.is_some_and(|f| f.is_not_found()));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[test]
    fn test_single_attempt_when_timeout_below_interval() {
        let clock = Arc::new(VirtualClock::new());
        let wait = wait_on(&clock, Duration::from_millis(200), Duration::from_millis(500));

        let mut calls = 0;
        let err = wait
            .until(|| {
                calls += 1;
                // Model an attempt that itself consumes wall-clock time.
                clock.advance(Duration::from_millis(300));
                Err::<(), _>(LookupError::not_found("#missing", Duration::ZERO))
            })
            .unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(calls, 1);
    }

    // ==================== Unexpected errors ====================

    #[test]
    fn test_backend_error_aborts_without_retry() {
        let clock = Arc::new(VirtualClock::new());
        let wait = wait_on(&clock, Duration::from_secs(4), Duration::from_millis(500));

        let mut calls = 0;
        let err = wait
            .until(|| {
                calls += 1;
                Err::<(), _>(LookupError::Backend(anyhow::anyhow!("session went away")))
            })
            .unwrap_err();

        assert!(!err.is_timeout());
        assert_eq!(calls, 1);
        assert_eq!(clock.now(), Duration::ZERO);
    }
}

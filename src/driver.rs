//! Driver seam and the implicit-timeout layer.
//!
//! The automation backend itself is an external collaborator; this module
//! defines the trait the rest of the crate talks through, plus a wrapper
//! that reproduces the session-wide implicit timeout real drivers apply
//! underneath every element lookup.

use crate::clock::Clock;
use crate::error::LookupError;
use std::sync::Arc;
use std::time::Duration;

/// Cadence at which the implicit-timeout layer re-polls the raw source,
/// mirroring the internal lookup cadence of real driver backends.
const IMPLICIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Raw element lookups against a live driver session.
///
/// Implementations wrap whatever backend is in use. The crate only cares
/// that a singular lookup reports "nothing matched" by failing with
/// [`LookupError::NotFound`], while a plural lookup reports it as an empty
/// vector.
pub trait ElementSource {
    type Element;

    /// Singular lookup: the first match, or `NotFound`.
    fn find_one(&mut self, selector: &str) -> Result<Self::Element, LookupError>;

    /// Plural lookup: every match, possibly none. Never raises `NotFound`.
    fn find_all(&mut self, selector: &str) -> Result<Vec<Self::Element>, LookupError>;
}

/// Applies a session-wide implicit timeout underneath every lookup.
///
/// Real driver sessions do this inside the browser: each lookup silently
/// re-polls the DOM until the implicit window closes, and only then reports
/// `NotFound` (singular) or returns the still-empty sequence (plural).
/// Modelling that behavior as an explicit wrapper is what makes the
/// timeout-composition rules in [`latency`](crate::latency) testable
/// instead of emergent.
///
/// The timeout is set once at session configuration time and persists until
/// changed, exactly like the driver's own timeout management command. It
/// defaults to zero, i.e. lookups report their result immediately.
pub struct ImplicitWaitSource<S> {
    inner: S,
    implicit_timeout: Duration,
    clock: Arc<dyn Clock>,
}

impl<S: ElementSource> ImplicitWaitSource<S> {
    pub fn new(inner: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            implicit_timeout: Duration::ZERO,
            clock,
        }
    }

    /// Session-wide setting; applies to every subsequent lookup.
    pub fn set_implicit_timeout(&mut self, timeout: Duration) {
        self.implicit_timeout = timeout;
    }

    pub fn implicit_timeout(&self) -> Duration {
        self.implicit_timeout
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ElementSource> ElementSource for ImplicitWaitSource<S> {
    type Element = S::Element;

    fn find_one(&mut self, selector: &str) -> Result<Self::Element, LookupError> {
        let start = self.clock.now();
        loop {
            match self.inner.find_one(selector) {
                Ok(element) => return Ok(element),
                Err(err @ LookupError::Backend(_)) => return Err(err),
                Err(LookupError::NotFound { .. }) => {
                    let waited = self.clock.now().saturating_sub(start);
                    let remaining = self.implicit_timeout.saturating_sub(waited);
                    if remaining.is_zero() {
                        tracing::debug!(selector, ?waited, "implicit window exhausted");
                        return Err(LookupError::not_found(selector, waited));
                    }
                    self.clock.sleep(remaining.min(IMPLICIT_POLL_INTERVAL));
                }
            }
        }
    }

    fn find_all(&mut self, selector: &str) -> Result<Vec<Self::Element>, LookupError> {
        let start = self.clock.now();
        loop {
            let found = self.inner.find_all(selector)?;
            if !found.is_empty() {
                return Ok(found);
            }
            let waited = self.clock.now().saturating_sub(start);
            let remaining = self.implicit_timeout.saturating_sub(waited);
            if remaining.is_zero() {
                tracing::debug!(selector, ?waited, "implicit window exhausted, no matches");
                return Ok(found);
            }
            self.clock.sleep(remaining.min(IMPLICIT_POLL_INTERVAL));
        }
    }
}

//! Timeout-composition rules.
//!
//! Two independently configured timeout mechanisms interact underneath a
//! polling wait: the session-wide implicit timeout applied to every
//! individual lookup, and the explicit wait's own total timeout. Whether
//! the two stack or overlap depends on how "nothing matched" is reported:
//!
//! * A **singular** lookup holds each attempt hostage for the full implicit
//!   window before `NotFound` can even be observed, and the wait must still
//!   exhaust its own timeout before giving up. The timeouts **stack**: a
//!   wait for a guaranteed-absent element costs roughly
//!   `implicit + timeout`.
//! * A **plural** lookup returns an empty sequence the moment the implicit
//!   window closes, and the tolerant acceptance of
//!   [`PollingWait::until`](crate::PollingWait::until) resolves on it
//!   immediately. The timeouts **overlap**: the same wait resolves at
//!   roughly `implicit`, regardless of the explicit timeout.
//!
//! The functions below state those rules as closed-form envelopes so that
//! callers can reason about the worst-case latency of a wait before running
//! it. They are the primary contract of this crate; the wait loop is tested
//! against them rather than against hand-picked constants. Callers that
//! treat "nothing matched" as a valid outcome should prefer the plural form
//! to avoid paying the stacked cost.

use crate::config::WaitConfig;
use std::time::Duration;

/// Inclusive wall-clock envelope for a wait against an absent target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyBound {
    pub min: Duration,
    pub max: Duration,
}

impl LatencyBound {
    pub fn contains(&self, observed: Duration) -> bool {
        self.min <= observed && observed <= self.max
    }
}

/// Envelope for a **singular** lookup that never matches (stacked).
///
/// The wait can never fail faster than one full implicit window (the first
/// attempt blocks that long) nor faster than its own timeout, and it gives
/// up at most one attempt plus one polling interval past the deadline.
pub fn absent_singular(implicit: Duration, config: &WaitConfig) -> LatencyBound {
    LatencyBound {
        min: implicit.max(config.timeout),
        max: implicit + config.timeout + config.poll_interval,
    }
}

/// Envelope for a **plural** lookup that stays empty, resolved with the
/// tolerant acceptance of [`PollingWait::until`](crate::PollingWait::until)
/// (overlapped).
///
/// The first attempt returns its empty sequence once the implicit window
/// closes and the wait accepts it on the spot, so the explicit timeout
/// never enters the picture.
pub fn empty_plural(implicit: Duration, config: &WaitConfig) -> LatencyBound {
    LatencyBound {
        min: implicit,
        max: implicit + config.poll_interval,
    }
}

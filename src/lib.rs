//! # element-wait
//!
//! Timeout composition for browser-automation element lookups.
//!
//! Driver sessions carry a session-wide *implicit* timeout: every element
//! lookup silently re-polls the page until that window closes before
//! reporting "not found". Test code then layers an *explicit* polling wait
//! on top, with its own total timeout and polling interval. The two
//! mechanisms interact in a sharp, easy-to-miss way:
//!
//! * **singular** lookups (which fail with `NotFound`) make the timeouts
//!   **stack** — a wait for a guaranteed-absent element costs roughly
//!   implicit + explicit, because the explicit wait cannot observe "not
//!   found" faster than the implicit window permits per attempt;
//! * **plural** lookups (which return an empty list) make them **overlap**
//!   — the same wait resolves as soon as the implicit window closes.
//!
//! This crate turns that composition rule into an explicit, tested
//! contract: [`ImplicitWaitSource`] models the driver's implicit re-poll,
//! [`PollingWait`] is the explicit retry loop, and [`latency`] states the
//! resulting wall-clock envelopes in closed form.
//!
//! ## Quick start
//!
//! ```
//! use element_wait::{
//!     Clock, ElementSource, ImplicitWaitSource, LookupError, PollingWait, VirtualClock,
//!     WaitConfig,
//! };
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! /// A page with no matching elements, ever.
//! struct EmptyPage;
//!
//! impl ElementSource for EmptyPage {
//!     type Element = String;
//!
//!     fn find_one(&mut self, selector: &str) -> Result<String, LookupError> {
//!         Err(LookupError::not_found(selector, Duration::ZERO))
//!     }
//!
//!     fn find_all(&mut self, _selector: &str) -> Result<Vec<String>, LookupError> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! let clock = Arc::new(VirtualClock::new());
//! let mut page = ImplicitWaitSource::new(EmptyPage, clock.clone());
//! page.set_implicit_timeout(Duration::from_secs(3));
//!
//! let wait = PollingWait::with_clock(
//!     WaitConfig::new(Duration::from_secs(4), Duration::from_millis(500)),
//!     clock.clone(),
//! );
//!
//! // Plural lookup: the empty list is accepted the moment the implicit
//! // window closes, so the two timeouts overlap.
//! let found = wait.until(|| page.find_all("#missing")).unwrap();
//! assert!(found.is_empty());
//! assert_eq!(clock.now(), Duration::from_secs(3));
//!
//! // Singular lookup: every attempt blocks the full implicit window, so
//! // the two timeouts stack and the wait only fails well past both.
//! let err = wait.until(|| page.find_one("#missing")).unwrap_err();
//! assert!(err.is_timeout());
//! ```

pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod latency;
pub mod wait;

pub use clock::{Clock, MonotonicClock, VirtualClock};
pub use config::{
    effective_timeout, validate_timeout, WaitConfig, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_WAIT_TIMEOUT_MS, MAX_WAIT_TIMEOUT_MS,
};
pub use driver::{ElementSource, ImplicitWaitSource};
pub use error::{LookupError, WaitError};
pub use latency::{absent_singular, empty_plural, LatencyBound};
pub use wait::PollingWait;

//! Server-driven rate limiting.
//!
//! The brokerage publishes its quota window in `x-ratelimit-*` response
//! headers. The client keeps no token bucket of its own: the last observed
//! window is authoritative and is replaced wholesale by every response.

use reqwest::header::HeaderMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use t212_core::error::RateLimitError;
use tokio::sync::{Mutex, MutexGuard, Notify};
use tracing::{debug, info};

/// Calls allowed per window.
pub const HEADER_LIMIT: &str = "x-ratelimit-limit";
/// Window length in seconds.
pub const HEADER_PERIOD: &str = "x-ratelimit-period";
/// Calls left in the current window.
pub const HEADER_REMAINING: &str = "x-ratelimit-remaining";
/// Epoch second at which the window resets.
pub const HEADER_RESET: &str = "x-ratelimit-reset";
/// Calls consumed in the current window.
pub const HEADER_USED: &str = "x-ratelimit-used";

/// Minimum safety margin added after the reset instant.
pub const MIN_RESET_BUFFER: Duration = Duration::from_secs(1);

/// Last observed quota window.
///
/// The default value is the "unknown" window (all zeros), which never
/// blocks a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RateLimitState {
    /// Maximum calls allowed per window.
    pub limit: u64,
    /// Window length in seconds.
    pub period: u64,
    /// Calls left in the current window.
    pub remaining: u64,
    /// Epoch second at which the window resets.
    pub reset: u64,
    /// Calls consumed so far in the window.
    pub used: u64,
}

impl RateLimitState {
    /// Parses the quota window from response headers.
    ///
    /// Missing or non-integer headers read as zero. The result is meant to
    /// replace the previous state, never to be merged with it.
    ///
    /// # Example
    ///
    /// ```
    /// use reqwest::header::{HeaderMap, HeaderValue};
    /// use t212_gateway::rest::RateLimitState;
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert("x-ratelimit-remaining", HeaderValue::from_static("4"));
    ///
    /// let state = RateLimitState::from_headers(&headers);
    /// assert_eq!(state.remaining, 4);
    /// assert_eq!(state.limit, 0);
    /// ```
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: header_u64(headers, HEADER_LIMIT),
            period: header_u64(headers, HEADER_PERIOD),
            remaining: header_u64(headers, HEADER_REMAINING),
            reset: header_u64(headers, HEADER_RESET),
            used: header_u64(headers, HEADER_USED),
        }
    }

    /// Returns true while no quota information has been observed.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true if the window has no calls left and a reset time is known.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0 && self.reset > 0
    }

    /// Returns the reset instant as wall-clock time, or `None` if the
    /// reported epoch second is beyond what the platform clock can hold.
    #[must_use]
    pub fn reset_at(&self) -> Option<SystemTime> {
        UNIX_EPOCH.checked_add(Duration::from_secs(self.reset))
    }

    /// Returns how long a caller must wait at `now` before issuing a call.
    ///
    /// Zero unless the window is exhausted and its reset lies in the future;
    /// otherwise the time until reset plus `buffer` (never less than
    /// [`MIN_RESET_BUFFER`]). A reset past the end of the clock yields
    /// [`Duration::MAX`].
    #[must_use]
    pub fn wait_time(&self, now: SystemTime, buffer: Duration) -> Duration {
        if !self.is_exhausted() {
            return Duration::ZERO;
        }
        let Some(reset_at) = self.reset_at() else {
            return Duration::MAX;
        };
        match reset_at.duration_since(now) {
            Ok(until_reset) if !until_reset.is_zero() => {
                until_reset.saturating_add(buffer.max(MIN_RESET_BUFFER))
            }
            _ => Duration::ZERO,
        }
    }

    /// Accounts for one admitted call until the server reports back.
    fn reserve(&mut self) {
        if self.remaining > 0 {
            self.remaining -= 1;
            self.used += 1;
        }
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> u64 {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

/// Shared owner of the quota window.
///
/// `admit` and `observe` serialize on one async mutex so concurrent callers
/// never both spend the last call of a window. The lock is held neither
/// while a request is on the wire nor while a caller sleeps out a window,
/// so responses are observed as soon as they arrive. Every observation
/// wakes the sleepers to re-check the new window.
#[derive(Debug)]
pub struct RateLimitGate {
    state: Mutex<RateLimitState>,
    observed: Notify,
    buffer: Duration,
    max_wait: Option<Duration>,
}

impl Default for RateLimitGate {
    fn default() -> Self {
        Self::new(MIN_RESET_BUFFER)
    }
}

impl RateLimitGate {
    /// Creates a gate in the unknown state.
    ///
    /// `buffer` is clamped to at least [`MIN_RESET_BUFFER`].
    #[must_use]
    pub fn new(buffer: Duration) -> Self {
        Self {
            state: Mutex::new(RateLimitState::default()),
            observed: Notify::new(),
            buffer: buffer.max(MIN_RESET_BUFFER),
            max_wait: None,
        }
    }

    /// Refuses to wait longer than `max_wait` for a window reset.
    #[must_use]
    pub fn with_max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Returns the safety margin added after each reset.
    #[must_use]
    pub fn buffer(&self) -> Duration {
        self.buffer
    }

    /// Suspends the caller until the window is open, without reserving.
    ///
    /// Dropping the returned future cancels the wait.
    ///
    /// # Errors
    ///
    /// Returns `RateLimitError::WaitExceeded` if the required wait is
    /// longer than the configured maximum.
    pub async fn block_if_exhausted(&self) -> Result<(), RateLimitError> {
        self.open_window().await.map(drop)
    }

    /// Waits until the quota allows another call, then reserves it.
    ///
    /// Dropping the returned future cancels the wait.
    ///
    /// # Errors
    ///
    /// Returns `RateLimitError::WaitExceeded` if the required wait is
    /// longer than the configured maximum.
    pub async fn admit(&self) -> Result<(), RateLimitError> {
        let mut state = self.open_window().await?;
        state.reserve();
        Ok(())
    }

    /// Returns the locked state once it has no wait left. The lock is
    /// released for the duration of every sleep.
    async fn open_window(&self) -> Result<MutexGuard<'_, RateLimitState>, RateLimitError> {
        loop {
            let state = self.state.lock().await;
            let wait = state.wait_time(SystemTime::now(), self.buffer);
            if wait.is_zero() {
                return Ok(state);
            }
            if let Some(max_wait) = self.max_wait.filter(|max| wait > *max) {
                return Err(RateLimitError::WaitExceeded {
                    wait_ms: duration_ms(wait),
                    max_wait_ms: duration_ms(max_wait),
                });
            }
            info!(
                wait_ms = duration_ms(wait),
                reset = state.reset,
                "Rate limit exhausted, waiting for window reset"
            );

            // Registered before the lock is released so no observation is missed
            let observed = self.observed.notified();
            drop(state);
            tokio::select! {
                () = tokio::time::sleep(wait) => {}
                () = observed => debug!("Rate limit changed while waiting, re-checking"),
            }
        }
    }

    /// Replaces the quota window with one observed from a response.
    pub async fn observe(&self, observed: RateLimitState) {
        debug!(
            limit = observed.limit,
            remaining = observed.remaining,
            reset = observed.reset,
            used = observed.used,
            "Rate limit updated"
        );
        *self.state.lock().await = observed;
        self.observed.notify_waiters();
    }

    /// Returns a copy of the current quota window.
    pub async fn snapshot(&self) -> RateLimitState {
        *self.state.lock().await
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

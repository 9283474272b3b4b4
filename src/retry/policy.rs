//! Retry-while policy and retry event types.

use std::time::Duration;

/// Pause inserted between a failed attempt and the next one when none is given.
pub const DEFAULT_PAUSE: Duration = Duration::from_millis(1000);

/// A time-budgeted retry policy.
///
/// The policy is pure data: it describes how long retries are allowed and how
/// long to wait between attempts, but does not run anything itself. Use
/// [`RetryWhile::run`] (or the free [`retry_while`](crate::retry::retry_while)
/// function) to execute an operation under the policy.
///
/// The time budget is measured from the first attempt and is only consulted
/// after a failure, so at least one attempt is always made.
///
/// # Examples
///
/// ```rust
/// use alertkit::RetryWhile;
/// use std::time::Duration;
///
/// let policy = RetryWhile::new(Duration::from_secs(3));
/// assert_eq!(policy.pause(), Duration::from_secs(1));
///
/// let policy = policy.with_pause(Duration::from_millis(250));
/// assert!(policy.within_budget(Duration::from_millis(2999)));
/// assert!(!policy.within_budget(Duration::from_secs(3)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RetryWhile {
    timeout: Duration,
    pause: Duration,
}

/// Information about a failed attempt, passed to hooks.
#[derive(Debug, Clone)]
pub struct RetryEvent<'a, E> {
    /// Which attempt just failed (1-indexed).
    pub attempt: u32,
    /// The error from the failed attempt.
    pub error: &'a E,
    /// Time elapsed since the first attempt started.
    pub elapsed: Duration,
    /// Pause before the next attempt, or `None` if this failure is final.
    pub next_pause: Option<Duration>,
}

impl<E> RetryEvent<'_, E> {
    /// Returns true if another attempt follows this one.
    pub fn will_retry(&self) -> bool {
        self.next_pause.is_some()
    }
}

impl RetryWhile {
    /// Create a policy with the given total time budget and the default pause.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            pause: DEFAULT_PAUSE,
        }
    }

    /// Create a policy from millisecond values.
    ///
    /// ```rust
    /// use alertkit::RetryWhile;
    /// use std::time::Duration;
    ///
    /// let policy = RetryWhile::from_millis(3000, 1000);
    /// assert_eq!(policy.timeout(), Duration::from_secs(3));
    /// assert_eq!(policy.pause(), Duration::from_secs(1));
    /// ```
    pub fn from_millis(timeout_ms: u64, pause_ms: u64) -> Self {
        Self {
            timeout: Duration::from_millis(timeout_ms),
            pause: Duration::from_millis(pause_ms),
        }
    }

    /// Set the fixed pause between a failure and the next attempt.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Total wall-clock budget, measured from the first attempt.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fixed pause between attempts.
    pub fn pause(&self) -> Duration {
        self.pause
    }

    /// Whether a failure observed `elapsed` after the first attempt may still
    /// be retried.
    ///
    /// The comparison is strict: a failure at exactly `timeout` is final.
    pub fn within_budget(&self, elapsed: Duration) -> bool {
        elapsed < self.timeout
    }

    /// Decide what follows a failure.
    ///
    /// Returns the pause to wait before the next attempt, or `None` when the
    /// failure must be surfaced. The predicate result is consulted before the
    /// time budget.
    pub fn next_pause(&self, retryable: bool, elapsed: Duration) -> Option<Duration> {
        if retryable && self.within_budget(elapsed) {
            Some(self.pause)
        } else {
            None
        }
    }
}

impl Default for RetryWhile {
    /// A zero budget: a single attempt, never retried.
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

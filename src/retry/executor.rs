//! Async execution of [`RetryWhile`] policies.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::retry::{RetryEvent, RetryWhile};

impl RetryWhile {
    /// Run `operation` until it succeeds, `should_retry` rejects its error, or
    /// the time budget is spent.
    ///
    /// Each attempt calls `operation` afresh; attempts never overlap. After a
    /// failure the predicate is consulted first, then the elapsed time since
    /// the first attempt. When both allow it, the loop sleeps for the fixed
    /// pause and tries again. Otherwise the error of the last attempt is
    /// returned unchanged and earlier errors are dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use alertkit::RetryWhile;
    /// use std::sync::atomic::{AtomicU32, Ordering};
    /// use std::time::Duration;
    ///
    /// # tokio_test::block_on(async {
    /// let calls = &AtomicU32::new(0);
    /// let policy = RetryWhile::new(Duration::from_secs(5)).with_pause(Duration::from_millis(1));
    ///
    /// let result = policy
    ///     .run(
    ///         move || async move {
    ///             if calls.fetch_add(1, Ordering::SeqCst) < 2 {
    ///                 Err("not ready")
    ///             } else {
    ///                 Ok("ready")
    ///             }
    ///         },
    ///         |err: &&str| *err == "not ready",
    ///     )
    ///     .await;
    ///
    /// assert_eq!(result, Ok("ready"));
    /// assert_eq!(calls.load(Ordering::SeqCst), 3);
    /// # });
    /// ```
    pub async fn run<T, E, F, Fut, P>(&self, operation: F, should_retry: P) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
    {
        self.run_with_hooks(operation, should_retry, |_: &RetryEvent<'_, E>| {})
            .await
    }

    /// Like [`run`](Self::run), calling `on_retry` after every failed attempt.
    ///
    /// The hook sees the final failure too; its `next_pause` is `None` then.
    /// The hook is synchronous and should not block.
    pub async fn run_with_hooks<T, E, F, Fut, P, H>(
        &self,
        mut operation: F,
        should_retry: P,
        on_retry: H,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        H: Fn(&RetryEvent<'_, E>),
    {
        let start = Instant::now();
        let mut attempt = 0u32;

        loop {
            attempt = attempt.saturating_add(1);

            let error = match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            let elapsed = start.elapsed();
            let next_pause = self.next_pause(should_retry(&error), elapsed);

            on_retry(&RetryEvent {
                attempt,
                error: &error,
                elapsed,
                next_pause,
            });

            match next_pause {
                Some(pause) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(attempt, ?elapsed, ?pause, "attempt failed, retrying");
                    tokio::time::sleep(pause).await;
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(attempt, ?elapsed, "attempt failed, giving up");
                    return Err(error);
                }
            }
        }
    }
}

/// Retry `operation` while `should_retry` accepts its errors and `timeout`
/// has not elapsed since the first attempt, pausing `pause` between attempts.
///
/// Shorthand for `RetryWhile::new(timeout).with_pause(pause).run(..)`.
///
/// # Example
///
/// ```rust
/// use alertkit::retry::retry_while;
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// let result: Result<(), &str> = retry_while(
///     || async { Err("permission denied") },
///     |err: &&str| err.contains("unavailable"),
///     Duration::from_secs(60),
///     Duration::from_secs(1),
/// )
/// .await;
///
/// // Non-retryable errors surface immediately.
/// assert_eq!(result, Err("permission denied"));
/// # });
/// ```
pub async fn retry_while<T, E, F, Fut, P>(
    operation: F,
    should_retry: P,
    timeout: Duration,
    pause: Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    RetryWhile::new(timeout)
        .with_pause(pause)
        .run(operation, should_retry)
        .await
}

//! Integration tests for retry-while behaviour.
//!
//! All tests run on tokio's paused clock so elapsed times are exact.

use super::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq)]
enum TestError {
    Transient(u32),
    Permanent(u32),
}

fn is_transient(err: &TestError) -> bool {
    matches!(err, TestError::Transient(_))
}

/// Records the offset of every attempt from `origin`.
fn recorder() -> (Arc<Mutex<Vec<Duration>>>, Instant) {
    (Arc::new(Mutex::new(Vec::new())), Instant::now())
}

#[tokio::test(start_paused = true)]
async fn test_success_on_first_attempt_has_no_pause() {
    let attempts = Arc::new(AtomicU32::new(0));
    let start = Instant::now();

    let result = RetryWhile::from_millis(3000, 1000)
        .run(
            {
                let attempts = attempts.clone();
                move || {
                    let attempts = attempts.clone();
                    async move {
                        attempts.fetch_add(1, Ordering::SeqCst);
                        Ok::<_, TestError>("value")
                    }
                }
            },
            is_transient,
        )
        .await;

    assert_eq!(result, Ok("value"));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_succeeds_after_n_transient_failures() {
    let attempts = Arc::new(AtomicU32::new(0));
    let start = Instant::now();

    let result = RetryWhile::from_millis(10_000, 1000)
        .run(
            {
                let attempts = attempts.clone();
                move || {
                    let attempts = attempts.clone();
                    async move {
                        let n = attempts.fetch_add(1, Ordering::SeqCst);
                        if n < 3 {
                            Err(TestError::Transient(n))
                        } else {
                            Ok("success")
                        }
                    }
                }
            },
            is_transient,
        )
        .await;

    assert_eq!(result, Ok("success"));
    assert_eq!(attempts.load(Ordering::SeqCst), 4);
    // Exactly three pauses of one second each.
    assert_eq!(start.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_non_retryable_error_fails_immediately() {
    let attempts = Arc::new(AtomicU32::new(0));
    let start = Instant::now();

    let result: Result<(), _> = RetryWhile::new(Duration::from_secs(3600))
        .run(
            {
                let attempts = attempts.clone();
                move || {
                    let attempts = attempts.clone();
                    async move {
                        let n = attempts.fetch_add(1, Ordering::SeqCst);
                        Err(TestError::Permanent(n))
                    }
                }
            },
            is_transient,
        )
        .await;

    assert_eq!(result, Err(TestError::Permanent(0)));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_always_failing_operation_stops_at_budget_boundary() {
    let (offsets, origin) = recorder();

    let result: Result<(), _> = RetryWhile::from_millis(3000, 1000)
        .run(
            {
                let offsets = offsets.clone();
                move || {
                    let offsets = offsets.clone();
                    async move {
                        let mut offsets = offsets.lock().unwrap();
                        offsets.push(origin.elapsed());
                        Err(TestError::Transient(offsets.len() as u32))
                    }
                }
            },
            is_transient,
        )
        .await;

    // The failure at exactly 3000ms is final, and its error is the one surfaced.
    assert_eq!(result, Err(TestError::Transient(4)));
    assert_eq!(
        *offsets.lock().unwrap(),
        vec![
            Duration::from_millis(0),
            Duration::from_millis(1000),
            Duration::from_millis(2000),
            Duration::from_millis(3000),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_zero_budget_still_attempts_once() {
    let attempts = Arc::new(AtomicU32::new(0));

    let result: Result<(), _> = RetryWhile::default()
        .run(
            {
                let attempts = attempts.clone();
                move || {
                    let attempts = attempts.clone();
                    async move {
                        let n = attempts.fetch_add(1, Ordering::SeqCst);
                        Err(TestError::Transient(n))
                    }
                }
            },
            is_transient,
        )
        .await;

    assert_eq!(result, Err(TestError::Transient(0)));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_attempt_finishing_after_deadline_is_not_retried() {
    let attempts = Arc::new(AtomicU32::new(0));
    let start = Instant::now();

    let result: Result<(), _> = RetryWhile::from_millis(1000, 100)
        .run(
            {
                let attempts = attempts.clone();
                move || {
                    let attempts = attempts.clone();
                    async move {
                        let n = attempts.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(1500)).await;
                        Err(TestError::Transient(n))
                    }
                }
            },
            is_transient,
        )
        .await;

    assert_eq!(result, Err(TestError::Transient(0)));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert_eq!(start.elapsed(), Duration::from_millis(1500));
}

#[tokio::test(start_paused = true)]
async fn test_pause_is_not_counted_until_next_failure() {
    // 900ms pause: failures at 0, 900 and 1800ms. The last one is past the
    // 1000ms budget even though it started after a pause granted inside it.
    let (offsets, origin) = recorder();

    let result: Result<(), _> = RetryWhile::from_millis(1000, 900)
        .run(
            {
                let offsets = offsets.clone();
                move || {
                    let offsets = offsets.clone();
                    async move {
                        let mut offsets = offsets.lock().unwrap();
                        offsets.push(origin.elapsed());
                        Err(TestError::Transient(offsets.len() as u32))
                    }
                }
            },
            is_transient,
        )
        .await;

    assert_eq!(result, Err(TestError::Transient(3)));
    assert_eq!(
        *offsets.lock().unwrap(),
        vec![
            Duration::from_millis(0),
            Duration::from_millis(900),
            Duration::from_millis(1800),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_predicate_checked_on_every_failure() {
    let attempts = Arc::new(AtomicU32::new(0));

    let result: Result<(), _> = RetryWhile::from_millis(60_000, 10)
        .run(
            {
                let attempts = attempts.clone();
                move || {
                    let attempts = attempts.clone();
                    async move {
                        let n = attempts.fetch_add(1, Ordering::SeqCst);
                        if n < 2 {
                            Err(TestError::Transient(n))
                        } else {
                            Err(TestError::Permanent(n))
                        }
                    }
                }
            },
            is_transient,
        )
        .await;

    assert_eq!(result, Err(TestError::Permanent(2)));
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_run_with_hooks_reports_every_failure() {
    let attempts = Arc::new(AtomicU32::new(0));
    let events = Arc::new(Mutex::new(Vec::new()));

    let result = RetryWhile::from_millis(5000, 250)
        .run_with_hooks(
            {
                let attempts = attempts.clone();
                move || {
                    let attempts = attempts.clone();
                    async move {
                        let n = attempts.fetch_add(1, Ordering::SeqCst);
                        if n < 2 {
                            Err(TestError::Transient(n))
                        } else {
                            Ok(n)
                        }
                    }
                }
            },
            is_transient,
            {
                let events = events.clone();
                move |event: &RetryEvent<'_, TestError>| {
                    events.lock().unwrap().push((
                        event.attempt,
                        event.error.clone(),
                        event.elapsed,
                        event.next_pause,
                    ));
                }
            },
        )
        .await;

    assert_eq!(result, Ok(2));
    assert_eq!(
        *events.lock().unwrap(),
        vec![
            (
                1,
                TestError::Transient(0),
                Duration::ZERO,
                Some(Duration::from_millis(250))
            ),
            (
                2,
                TestError::Transient(1),
                Duration::from_millis(250),
                Some(Duration::from_millis(250))
            ),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_run_with_hooks_reports_final_failure() {
    let hook_calls = Arc::new(AtomicU32::new(0));
    let last_will_retry = Arc::new(Mutex::new(None));

    let result: Result<(), _> = RetryWhile::from_millis(1000, 1000)
        .run_with_hooks(
            || async { Err(TestError::Transient(0)) },
            is_transient,
            {
                let hook_calls = hook_calls.clone();
                let last_will_retry = last_will_retry.clone();
                move |event: &RetryEvent<'_, TestError>| {
                    hook_calls.fetch_add(1, Ordering::SeqCst);
                    *last_will_retry.lock().unwrap() = Some(event.will_retry());
                }
            },
        )
        .await;

    assert!(result.is_err());
    // Failure at 0ms retries, failure at 1000ms is final.
    assert_eq!(hook_calls.load(Ordering::SeqCst), 2);
    assert_eq!(*last_will_retry.lock().unwrap(), Some(false));
}

#[tokio::test(start_paused = true)]
async fn test_retry_while_function_matches_policy() {
    let attempts = Arc::new(AtomicU32::new(0));
    let start = Instant::now();

    let result = retry_while(
        {
            let attempts = attempts.clone();
            move || {
                let attempts = attempts.clone();
                async move {
                    let n = attempts.fetch_add(1, Ordering::SeqCst);
                    if n == 0 {
                        Err(TestError::Transient(n))
                    } else {
                        Ok("ok")
                    }
                }
            }
        },
        is_transient,
        Duration::from_secs(10),
        DEFAULT_PAUSE,
    )
    .await;

    assert_eq!(result, Ok("ok"));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert_eq!(start.elapsed(), DEFAULT_PAUSE);
}

#[cfg(feature = "tracing")]
mod tracing_events {
    use super::*;
    use tracing_test::traced_test;

    #[tokio::test(start_paused = true)]
    #[traced_test]
    async fn test_retries_are_logged() {
        let attempts = Arc::new(AtomicU32::new(0));

        let _ = RetryWhile::from_millis(1000, 500)
            .run(
                {
                    let attempts = attempts.clone();
                    move || {
                        let attempts = attempts.clone();
                        async move {
                            let n = attempts.fetch_add(1, Ordering::SeqCst);
                            Err::<(), _>(TestError::Transient(n))
                        }
                    }
                },
                is_transient,
            )
            .await;

        assert!(logs_contain("attempt failed, retrying"));
        assert!(logs_contain("attempt failed, giving up"));
    }
}

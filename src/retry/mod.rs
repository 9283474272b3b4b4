//! Time-budgeted retries for async operations.
//!
//! [`RetryWhile`] keeps calling an operation while it fails with errors the
//! caller considers transient, until a wall-clock budget measured from the
//! first attempt runs out:
//!
//! - **Pure policy**: `RetryWhile` is just data (budget + fixed pause) with a
//!   pure decision function, [`RetryWhile::next_pause`].
//! - **Sequential attempts**: one attempt in flight at a time, with a fixed
//!   pause (no backoff) between a failure and the next attempt.
//! - **Unwrapped errors**: the last attempt's error is returned as is.
//!
//! # Quick Start
//!
//! ```rust
//! use alertkit::RetryWhile;
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let policy = RetryWhile::new(Duration::from_secs(30)).with_pause(Duration::from_millis(10));
//!
//! let value = policy
//!     .run(|| async { Ok::<_, String>(42) }, |_err| true)
//!     .await;
//!
//! assert_eq!(value, Ok(42));
//! # });
//! ```
//!
//! # Budget semantics
//!
//! The elapsed time is checked only after a failure. A call therefore makes at
//! least one attempt even with a zero budget, and an attempt that starts just
//! before the deadline may finish after it; its failure is then final.

#[cfg(feature = "async")]
mod executor;
mod policy;

#[cfg(feature = "async")]
pub use executor::retry_while;
pub use policy::{RetryEvent, RetryWhile, DEFAULT_PAUSE};

#[cfg(all(test, feature = "async"))]
mod tests;

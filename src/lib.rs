//! Policy-driven retries for fallible operations, sync or async.
//!
//! A [`RetryPolicy`] fixes the attempt budget and backoff schedule; a
//! [`Retry`] wrapper drives the loop, logging each retried failure and
//! propagating the final error unchanged when the budget is spent.
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use reattempt::policy::RetryPolicy;
//! use reattempt::retry::Retry;
//!
//! # fn fetch() -> Result<String, std::io::Error> { unimplemented!() }
//! # fn example() -> Result<String, std::io::Error> {
//! let policy = RetryPolicy::new(3, Duration::from_millis(500), 2.0)
//!     .expect("valid policy");
//!
//! Retry::new(policy).call(fetch)
//! # }
//! ```
//!
//! By default every failure is retryable; [`Retry::retry_if`] narrows the
//! filter to specific error kinds.

pub mod error;
pub mod policy;
pub mod predicate;
pub mod retry;

pub use error::ConfigError;
pub use policy::{Backoff, RetryPolicy};
pub use predicate::{AlwaysRetry, ClosurePredicate, RetryPredicate};
pub use retry::{Retry, retry, retry_async};

use std::fmt::Display;
use std::future::Future;
use std::thread;
use std::time::Duration;

use tracing::{error, warn};

use crate::policy::{Backoff, RetryPolicy};
use crate::predicate::{AlwaysRetry, RetryPredicate};

/// Re-invokes fallible operations according to a [`RetryPolicy`].
///
/// The policy and failure filter are fixed at construction. Every call owns
/// its own attempt counter and delay schedule, so one `Retry` value can
/// drive any number of concurrent calls without shared state.
///
/// Sync operations go through [`call`](Retry::call) and block between
/// attempts; async operations go through [`call_async`](Retry::call_async)
/// and suspend cooperatively, letting other tasks progress during both the
/// attempt and the wait.
#[derive(Debug, Clone)]
pub struct Retry<P = AlwaysRetry> {
    policy: RetryPolicy,
    predicate: P,
}

impl Retry<AlwaysRetry> {
    /// Creates a wrapper that retries every failure kind.
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            predicate: AlwaysRetry,
        }
    }
}

impl<P> Retry<P> {
    /// Replaces the failure filter.
    ///
    /// Failures rejected by `predicate` propagate on first occurrence,
    /// bypassing backoff and logging entirely.
    pub fn retry_if<P2>(self, predicate: P2) -> Retry<P2> {
        Retry {
            policy: self.policy,
            predicate,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Runs `op` until it succeeds, a failure is rejected by the filter, or
    /// the attempt budget is spent. The final failure is returned unchanged.
    ///
    /// Waits between attempts block the calling thread.
    pub fn call<T, E, F>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        E: Display,
        P: RetryPredicate<E>,
    {
        let mut backoff = self.policy.backoff();
        let mut attempt = 1_u32;

        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) => {
                    let delay = self.next_delay(attempt, err, &mut backoff)?;
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                    attempt += 1;
                }
            }
        }
    }

    /// Async counterpart of [`call`](Retry::call): obtains a future from
    /// `op` for each attempt and awaits it; waits between attempts use the
    /// tokio timer instead of blocking.
    ///
    /// Dropping the returned future (for example under
    /// `tokio::time::timeout`) cancels the run mid-attempt or mid-delay; no
    /// further attempts are made.
    pub async fn call_async<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
        P: RetryPredicate<E>,
    {
        let mut backoff = self.policy.backoff();
        let mut attempt = 1_u32;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    let delay = self.next_delay(attempt, err, &mut backoff)?;
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
            }
        }
    }

    /// Wraps `op` so that every invocation of the returned closure runs a
    /// full retry loop with fresh attempt state.
    pub fn wrap<T, E, F>(self, mut op: F) -> impl FnMut() -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        E: Display,
        P: RetryPredicate<E>,
    {
        move || self.call(&mut op)
    }

    /// Async counterpart of [`wrap`](Retry::wrap).
    pub fn wrap_async<T, E, F, Fut>(self, mut op: F) -> impl AsyncFnMut() -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
        P: RetryPredicate<E>,
    {
        async move || self.call_async(&mut op).await
    }

    // Shared bookkeeping for both loops: decide whether `err` is terminal,
    // and if not, log the retry and produce the wait before the next
    // attempt.
    fn next_delay<E>(&self, attempt: u32, err: E, backoff: &mut Backoff) -> Result<Duration, E>
    where
        E: Display,
        P: RetryPredicate<E>,
    {
        if !self.predicate.should_retry(&err) {
            return Err(err);
        }

        if attempt >= self.policy.max_attempts {
            error!(attempts = attempt, error = %err, "all attempts failed");
            return Err(err);
        }

        let delay = backoff.next().unwrap_or_default();
        warn!(
            attempt,
            max_attempts = self.policy.max_attempts,
            retry_in_s = delay.as_secs_f64(),
            error = %err,
            "attempt failed; retrying"
        );

        Ok(delay)
    }
}

/// Runs `op` under `policy`, treating every failure as retryable.
pub fn retry<T, E, F>(policy: &RetryPolicy, op: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: Display,
{
    Retry::new(policy.clone()).call(op)
}

/// Async counterpart of [`retry`].
pub async fn retry_async<T, E, F, Fut>(policy: &RetryPolicy, op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    Retry::new(policy.clone()).call_async(op).await
}

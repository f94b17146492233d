use std::time::Duration;

use crate::error::ConfigError;

/// Immutable retry configuration: how many attempts to make and how long to
/// wait between them.
///
/// The delay before the first retry is `initial_delay`; after every failed
/// attempt it is multiplied by `backoff_factor`. A factor of `1.0` keeps the
/// delay constant, `2.0` doubles it each time, `0.0` waits once and then
/// retries immediately.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub backoff_factor: f64,
}

impl RetryPolicy {
    /// Builds a validated policy.
    ///
    /// Rejects `max_attempts == 0` and a `backoff_factor` that is negative
    /// or not finite.
    pub fn new(
        max_attempts: u32,
        initial_delay: Duration,
        backoff_factor: f64,
    ) -> Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        if !backoff_factor.is_finite() || backoff_factor < 0.0 {
            return Err(ConfigError::InvalidBackoffFactor(backoff_factor));
        }

        Ok(Self {
            max_attempts,
            initial_delay,
            backoff_factor,
        })
    }

    /// The delay schedule this policy produces, starting at `initial_delay`.
    pub fn backoff(&self) -> Backoff {
        Backoff {
            delay: self.initial_delay,
            factor: self.backoff_factor,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::ZERO,
            backoff_factor: 1.0,
        }
    }
}

/// Infinite sequence of inter-attempt delays.
///
/// Yields `initial_delay`, then multiplies by the backoff factor after each
/// step. Saturates at `Duration::MAX` instead of overflowing.
#[derive(Debug, Clone)]
pub struct Backoff {
    delay: Duration,
    factor: f64,
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let current = self.delay;
        self.delay = Duration::try_from_secs_f64(current.as_secs_f64() * self.factor)
            .unwrap_or(Duration::MAX);
        Some(current)
    }
}

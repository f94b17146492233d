use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("`max_attempts` must be at least 1")]
    NoAttempts,
    #[error("`backoff_factor` must be finite and non-negative, got {0}")]
    InvalidBackoffFactor(f64),
}

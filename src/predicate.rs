/// Decides whether a failure is eligible for another attempt.
///
/// Failures the predicate rejects propagate to the caller on first
/// occurrence, with no delay and no logging.
pub trait RetryPredicate<E: ?Sized> {
    fn should_retry(&self, error: &E) -> bool;
}

/// Treats every failure as retryable. This is the default filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysRetry;

impl<E: ?Sized> RetryPredicate<E> for AlwaysRetry {
    fn should_retry(&self, _error: &E) -> bool {
        true
    }
}

/// Adapts a closure into a [`RetryPredicate`].
///
/// A `matches!` over error variants expresses both a single retryable kind
/// and a set of them:
///
/// ```rust,no_run
/// # enum FetchError { Connection, Payload }
/// use reattempt::predicate::ClosurePredicate;
///
/// let only_transient = ClosurePredicate::new(|err: &FetchError| {
///     matches!(err, FetchError::Connection)
/// });
/// ```
#[derive(Debug, Clone)]
pub struct ClosurePredicate<F> {
    predicate: F,
}

impl<F> ClosurePredicate<F> {
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<E: ?Sized, F> RetryPredicate<E> for ClosurePredicate<F>
where
    F: Fn(&E) -> bool,
{
    fn should_retry(&self, error: &E) -> bool {
        (self.predicate)(error)
    }
}

use std::time::{Duration, Instant};

use assert_matches::assert_matches;
use thiserror::Error;

use reattempt::policy::RetryPolicy;
use reattempt::predicate::ClosurePredicate;
use reattempt::retry::{Retry, retry};

#[derive(Debug, Error)]
enum FetchError {
    #[error("connection reset by peer")]
    Connection,
    #[error("unexpected payload: {0}")]
    Payload(String),
}

fn immediate(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(max_attempts, Duration::ZERO, 1.0).expect("policy should validate")
}

fn transient_only() -> ClosurePredicate<impl Fn(&FetchError) -> bool> {
    ClosurePredicate::new(|err: &FetchError| matches!(err, FetchError::Connection))
}

#[test]
fn always_failing_op_runs_exactly_max_attempts() {
    let mut calls = 0_u32;

    let result: Result<(), FetchError> = Retry::new(immediate(3)).call(|| {
        calls += 1;
        Err(FetchError::Connection)
    });

    assert_eq!(calls, 3);
    assert_matches!(result, Err(FetchError::Connection));
}

#[test]
fn final_failure_is_the_last_one_observed() {
    let mut calls = 0_u32;

    let result: Result<(), FetchError> = Retry::new(immediate(3)).call(|| {
        calls += 1;
        Err(FetchError::Payload(format!("attempt {calls}")))
    });

    assert_matches!(result, Err(FetchError::Payload(msg)) if msg == "attempt 3");
}

#[test]
fn success_on_attempt_k_stops_there() {
    let mut calls = 0_u32;

    let result = Retry::new(immediate(5)).call(|| {
        calls += 1;
        if calls < 3 {
            Err(FetchError::Connection)
        } else {
            Ok("ok")
        }
    });

    assert_eq!(calls, 3);
    assert_eq!(result.expect("should succeed"), "ok");
}

#[test]
fn first_attempt_success_runs_once() {
    let mut calls = 0_u32;

    let result: Result<&str, FetchError> = Retry::new(immediate(5)).call(|| {
        calls += 1;
        Ok("ok")
    });

    assert_eq!(calls, 1);
    assert_eq!(result.expect("should succeed"), "ok");
}

#[test]
fn non_retryable_failure_propagates_without_delay() {
    let policy = RetryPolicy::new(3, Duration::from_secs(5), 2.0).expect("policy should validate");
    let mut calls = 0_u32;
    let started = Instant::now();

    let result: Result<(), FetchError> = Retry::new(policy).retry_if(transient_only()).call(|| {
        calls += 1;
        Err(FetchError::Payload("not json".to_string()))
    });

    assert_eq!(calls, 1);
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_matches!(result, Err(FetchError::Payload(msg)) if msg == "not json");
}

#[test]
fn retryable_kind_recovers_under_narrow_filter() {
    let mut calls = 0_u32;

    let result = Retry::new(immediate(3)).retry_if(transient_only()).call(|| {
        calls += 1;
        if calls < 3 {
            Err(FetchError::Connection)
        } else {
            Ok("ok")
        }
    });

    assert_eq!(calls, 3);
    assert_eq!(result.expect("should succeed"), "ok");
}

#[test]
fn blocking_waits_follow_the_schedule() {
    let policy =
        RetryPolicy::new(3, Duration::from_millis(10), 2.0).expect("policy should validate");
    let started = Instant::now();

    let result: Result<(), FetchError> = Retry::new(policy).call(|| Err(FetchError::Connection));

    // Two waits: 10ms then 20ms.
    assert!(started.elapsed() >= Duration::from_millis(30));
    assert_matches!(result, Err(FetchError::Connection));
}

#[test]
fn wrapped_callable_retries_on_every_invocation() {
    let mut calls = 0_u32;
    let mut wrapped = Retry::new(immediate(3)).wrap(move || {
        calls += 1;
        if calls % 3 == 0 {
            Ok(calls)
        } else {
            Err::<u32, FetchError>(FetchError::Connection)
        }
    });

    assert_eq!(wrapped().expect("first call should succeed"), 3);
    assert_eq!(wrapped().expect("second call should succeed"), 6);
}

#[test]
fn convenience_fn_uses_default_filter() {
    let mut calls = 0_u32;

    let result = retry(&immediate(2), || {
        calls += 1;
        if calls == 1 {
            Err(FetchError::Payload("garbled".to_string()))
        } else {
            Ok("ok")
        }
    });

    // Every failure kind is retryable without an explicit filter.
    assert_eq!(calls, 2);
    assert_eq!(result.expect("should succeed"), "ok");
}

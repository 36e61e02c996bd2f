//! Retry wrapper integration tests
//!
//! Uses tokio's paused clock, so backoff delays elapse instantly and
//! timing assertions are exact.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use aloud::retry::{RetryPolicy, retry_with_backoff};

#[tokio::test(start_paused = true)]
async fn always_failing_op_is_attempted_exactly_five_times() {
    let calls = AtomicU32::new(0);
    let policy = RetryPolicy::new(5, Duration::from_millis(1000));

    let result: Result<(), String> = retry_with_backoff(&policy, || {
        let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
        async move { Err(format!("attempt {n}")) }
    })
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 5);
    // The last attempt's error propagates unchanged
    assert_eq!(result.unwrap_err(), "attempt 5");
}

#[tokio::test(start_paused = true)]
async fn immediate_success_is_attempted_once() {
    let calls = AtomicU32::new(0);
    let policy = RetryPolicy::new(5, Duration::from_millis(1000));
    let start = tokio::time::Instant::now();

    let result: Result<&str, &str> = retry_with_backoff(&policy, || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Ok("done") }
    })
    .await;

    assert_eq!(result, Ok("done"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn backoff_delays_double_and_sum_before_success() {
    let calls = AtomicU32::new(0);
    let policy = RetryPolicy::new(5, Duration::from_millis(1000));
    let start = tokio::time::Instant::now();

    // Fail attempts 0-3, succeed on attempt 4
    let result: Result<u32, &str> = retry_with_backoff(&policy, || {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move { if n < 4 { Err("transient") } else { Ok(n) } }
    })
    .await;

    assert_eq!(result, Ok(4));
    assert_eq!(calls.load(Ordering::SeqCst), 5);
    // 1000 + 2000 + 4000 + 8000
    assert_eq!(start.elapsed(), Duration::from_millis(15_000));
}

#[tokio::test(start_paused = true)]
async fn single_attempt_policy_never_retries() {
    let calls = AtomicU32::new(0);
    let policy = RetryPolicy::new(1, Duration::from_millis(1000));
    let start = tokio::time::Instant::now();

    let result: Result<(), &str> = retry_with_backoff(&policy, || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err("boom") }
    })
    .await;

    assert_eq!(result, Err("boom"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn success_midway_stops_further_attempts() {
    let calls = AtomicU32::new(0);
    let policy = RetryPolicy::new(5, Duration::from_millis(100));

    let result: Result<u32, &str> = retry_with_backoff(&policy, || {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move { if n < 2 { Err("transient") } else { Ok(n) } }
    })
    .await;

    assert_eq!(result, Ok(2));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn attempts_are_strictly_sequential() {
    let policy = RetryPolicy::new(3, Duration::from_millis(500));
    let start = tokio::time::Instant::now();
    let elapsed_per_attempt = std::sync::Mutex::new(Vec::new());

    let _: Result<(), &str> = retry_with_backoff(&policy, || {
        elapsed_per_attempt.lock().unwrap().push(start.elapsed());
        async { Err("transient") }
    })
    .await;

    // Attempt i+1 starts only after attempt i's backoff has elapsed
    let observed = elapsed_per_attempt.into_inner().unwrap();
    assert_eq!(
        observed,
        vec![
            Duration::ZERO,
            Duration::from_millis(500),
            Duration::from_millis(1500),
        ]
    );
}

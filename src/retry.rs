//! Retry with exponential backoff for cloud API calls
//!
//! TTS and LLM endpoints fail transiently often enough that every outbound
//! call goes through [`retry_with_backoff`]. The policy is deliberately
//! simple: doubling delays, no jitter, no cap. Only the final attempt's
//! error is observable.

use std::future::Future;
use std::time::Duration;

/// Retry policy for outbound API calls
///
/// Controls how many attempts a failed call gets and how long to wait
/// between them. The delay doubles after each failed attempt.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first)
    pub max_attempts: u32,
    /// Delay before the first retry (doubles each attempt)
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Create a policy. `max_attempts` is clamped to at least 1.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Compute the delay after failed attempt `attempt` (0-based):
    /// `base_delay * 2^attempt`.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Run `op`, retrying failures with exponential backoff.
///
/// Makes at most `policy.max_attempts` sequential attempts. The first
/// success is returned immediately with no further attempts. The last
/// attempt's error propagates unchanged; earlier failures are discarded.
///
/// With `max_attempts == 1` a single attempt is made and any failure
/// propagates without waiting.
///
/// # Errors
///
/// Returns the final attempt's error once the retry budget is exhausted.
pub async fn retry_with_backoff<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt + 1 >= max_attempts => return Err(err),
            Err(_) => {
                let delay = policy.delay_for_attempt(attempt);
                tracing::debug!(attempt, ?delay, "attempt failed, backing off");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

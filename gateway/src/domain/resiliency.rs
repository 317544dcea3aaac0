//! Retry policy for outbound upstream calls.
//!
//! The policy is adapter agnostic: it decides which outcomes are transient
//! and how long to wait before the next attempt. Outbound adapters apply it
//! around their single call path.

use std::time::Duration;

use async_trait::async_trait;

/// Retries allowed after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Delay before the first retry; each later retry doubles it.
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(200);

/// Bounded exponential backoff.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use gateway::domain::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.delay_before_retry(1), Duration::from_millis(200));
/// assert_eq!(policy.delay_before_retry(3), Duration::from_millis(800));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
        }
    }
}

impl RetryPolicy {
    /// Total attempts including the first.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before retry number `retry` (one-based).
    #[must_use]
    pub fn delay_before_retry(&self, retry: u32) -> Duration {
        let exponent = 2_u32.saturating_pow(retry.saturating_sub(1));
        let base_ms = u64::try_from(self.initial_backoff.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(base_ms.saturating_mul(u64::from(exponent)))
    }

    /// Whether an upstream response status is transient.
    ///
    /// Server errors and `429 Too Many Requests` are retried. Every other
    /// status, including `404` and `422`, is final.
    #[must_use]
    pub const fn is_transient_status(status: u16) -> bool {
        status == 429 || (status >= 500 && status <= 599)
    }
}

/// Async sleeping abstraction so retry delays can be observed in tests.
#[async_trait]
pub trait RetrySleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio-based sleeper.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl RetrySleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for backoff and transient classification.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::first(1, 200)]
    #[case::second(2, 400)]
    #[case::third(3, 800)]
    fn default_backoff_doubles(#[case] retry: u32, #[case] expected_ms: u64) {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.delay_before_retry(retry),
            Duration::from_millis(expected_ms)
        );
    }

    #[test]
    fn default_allows_four_attempts() {
        assert_eq!(RetryPolicy::default().max_attempts(), 4);
    }

    #[test]
    fn large_retry_numbers_saturate() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.delay_before_retry(64),
            Duration::from_millis(200_u64.saturating_mul(u64::from(u32::MAX)))
        );
    }

    #[rstest]
    #[case::too_many_requests(429, true)]
    #[case::internal(500, true)]
    #[case::bad_gateway(502, true)]
    #[case::unavailable(503, true)]
    #[case::not_found(404, false)]
    #[case::unprocessable(422, false)]
    #[case::bad_request(400, false)]
    #[case::ok(200, false)]
    fn classifies_transient_statuses(#[case] status: u16, #[case] expected: bool) {
        assert_eq!(RetryPolicy::is_transient_status(status), expected);
    }

    #[tokio::test]
    async fn tokio_sleeper_waits_for_duration() {
        let started = tokio::time::Instant::now();
        TokioSleeper.sleep(Duration::from_millis(20)).await;
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}

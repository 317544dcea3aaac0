//! Transport decorator applying the [`RetryPolicy`].
//!
//! Connection failures, timeouts, server errors and `429` responses are
//! retried with exponential backoff. When the budget runs out the last
//! outcome is returned unchanged so the caller maps it to a domain error.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::transport::{TransportError, UpstreamRequest, UpstreamResponse, UpstreamTransport};
use crate::domain::ports::{UpstreamAttemptOutcome, UpstreamCallMetrics};
use crate::domain::{RetryPolicy, RetrySleeper};

/// Retrying wrapper around an inner transport.
pub struct RetryingTransport<T> {
    inner: T,
    policy: RetryPolicy,
    sleeper: Arc<dyn RetrySleeper>,
    metrics: Arc<dyn UpstreamCallMetrics>,
}

impl<T> RetryingTransport<T> {
    /// Wrap `inner` with `policy`.
    #[must_use]
    pub fn new(
        inner: T,
        policy: RetryPolicy,
        sleeper: Arc<dyn RetrySleeper>,
        metrics: Arc<dyn UpstreamCallMetrics>,
    ) -> Self {
        Self {
            inner,
            policy,
            sleeper,
            metrics,
        }
    }

    async fn record(&self, outcome: UpstreamAttemptOutcome) {
        if let Err(error) = self.metrics.record_attempt(outcome).await {
            debug!(%error, outcome = outcome.as_label(), "failed to record upstream attempt");
        }
    }
}

fn is_transient(result: &Result<UpstreamResponse, TransportError>) -> bool {
    match result {
        Ok(response) => RetryPolicy::is_transient_status(response.status.as_u16()),
        Err(_) => true,
    }
}

fn final_outcome(result: &Result<UpstreamResponse, TransportError>) -> UpstreamAttemptOutcome {
    match result {
        Ok(response) if !response.status.is_success() => UpstreamAttemptOutcome::Rejected,
        _ => UpstreamAttemptOutcome::Success,
    }
}

fn describe(result: &Result<UpstreamResponse, TransportError>) -> String {
    match result {
        Ok(response) => format!("status {}", response.status.as_u16()),
        Err(error) => error.to_string(),
    }
}

#[async_trait]
impl<T> UpstreamTransport for RetryingTransport<T>
where
    T: UpstreamTransport,
{
    async fn execute(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 1_u32;
        loop {
            let result = self.inner.execute(request.clone()).await;
            if !is_transient(&result) {
                self.record(final_outcome(&result)).await;
                return result;
            }
            if attempt >= max_attempts {
                self.record(UpstreamAttemptOutcome::Exhausted).await;
                warn!(
                    attempts = attempt,
                    url = %request.url,
                    outcome = %describe(&result),
                    "upstream retries exhausted"
                );
                return result;
            }

            self.record(UpstreamAttemptOutcome::Retried).await;
            let delay = self.policy.delay_before_retry(attempt);
            debug!(
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                outcome = %describe(&result),
                "retrying upstream call"
            );
            self.sleeper.sleep(delay).await;
            attempt = attempt.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for retry decisions and backoff delays.

    use super::*;
    use crate::domain::ports::{MockUpstreamCallMetrics, NoOpUpstreamCallMetrics};
    use crate::outbound::govuk::transport::MockUpstreamTransport;
    use reqwest::{StatusCode, Url};
    use rstest::rstest;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingSleeper {
        delays: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        fn delays(&self) -> Vec<Duration> {
            self.delays.lock().expect("delays mutex").clone()
        }
    }

    #[async_trait]
    impl RetrySleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.delays.lock().expect("delays mutex").push(duration);
        }
    }

    fn response(status: StatusCode) -> UpstreamResponse {
        UpstreamResponse {
            status,
            body: Vec::new(),
        }
    }

    fn request() -> UpstreamRequest {
        UpstreamRequest::get(Url::parse("https://www.gov.uk/api/search.json").expect("url"))
    }

    fn retrying(
        inner: MockUpstreamTransport,
        sleeper: Arc<RecordingSleeper>,
    ) -> RetryingTransport<MockUpstreamTransport> {
        RetryingTransport::new(
            inner,
            RetryPolicy::default(),
            sleeper,
            Arc::new(NoOpUpstreamCallMetrics),
        )
    }

    #[rstest]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR)]
    #[case::unavailable(StatusCode::SERVICE_UNAVAILABLE)]
    #[case::too_many_requests(StatusCode::TOO_MANY_REQUESTS)]
    #[tokio::test]
    async fn transient_statuses_exhaust_the_budget(#[case] status: StatusCode) {
        let mut inner = MockUpstreamTransport::new();
        inner
            .expect_execute()
            .times(4)
            .returning(move |_| Ok(response(status)));
        let sleeper = Arc::new(RecordingSleeper::default());

        let result = retrying(inner, Arc::clone(&sleeper))
            .execute(request())
            .await
            .expect("last response is returned");

        assert_eq!(result.status, status);
        assert_eq!(
            sleeper.delays(),
            vec![
                Duration::from_millis(200),
                Duration::from_millis(400),
                Duration::from_millis(800),
            ]
        );
    }

    #[rstest]
    #[case::not_found(StatusCode::NOT_FOUND)]
    #[case::unprocessable(StatusCode::UNPROCESSABLE_ENTITY)]
    #[case::bad_request(StatusCode::BAD_REQUEST)]
    #[case::ok(StatusCode::OK)]
    #[tokio::test]
    async fn final_statuses_are_attempted_once(#[case] status: StatusCode) {
        let mut inner = MockUpstreamTransport::new();
        inner
            .expect_execute()
            .times(1)
            .returning(move |_| Ok(response(status)));
        let sleeper = Arc::new(RecordingSleeper::default());

        let result = retrying(inner, Arc::clone(&sleeper))
            .execute(request())
            .await
            .expect("response is returned");

        assert_eq!(result.status, status);
        assert!(sleeper.delays().is_empty());
    }

    #[tokio::test]
    async fn recovers_after_transport_failures() {
        let mut inner = MockUpstreamTransport::new();
        let mut seq = mockall::Sequence::new();
        inner
            .expect_execute()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(TransportError::Connection {
                    message: "refused".to_owned(),
                })
            });
        inner
            .expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(response(StatusCode::OK)));
        let sleeper = Arc::new(RecordingSleeper::default());

        let result = retrying(inner, Arc::clone(&sleeper))
            .execute(request())
            .await
            .expect("third attempt succeeds");

        assert_eq!(result.status, StatusCode::OK);
        assert_eq!(
            sleeper.delays(),
            vec![Duration::from_millis(200), Duration::from_millis(400)]
        );
    }

    #[tokio::test]
    async fn surfaces_last_transport_error() {
        let mut inner = MockUpstreamTransport::new();
        inner.expect_execute().times(4).returning(|_| {
            Err(TransportError::Timeout {
                message: "deadline".to_owned(),
            })
        });

        let error = retrying(inner, Arc::new(RecordingSleeper::default()))
            .execute(request())
            .await
            .expect_err("budget exhausted");
        assert!(matches!(error, TransportError::Timeout { .. }));
    }

    #[tokio::test]
    async fn reports_each_attempt_outcome() {
        let mut inner = MockUpstreamTransport::new();
        let mut seq = mockall::Sequence::new();
        inner
            .expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(response(StatusCode::BAD_GATEWAY)));
        inner
            .expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(response(StatusCode::OK)));

        let mut metrics = MockUpstreamCallMetrics::new();
        metrics
            .expect_record_attempt()
            .with(mockall::predicate::eq(UpstreamAttemptOutcome::Retried))
            .times(1)
            .returning(|_| Ok(()));
        metrics
            .expect_record_attempt()
            .with(mockall::predicate::eq(UpstreamAttemptOutcome::Success))
            .times(1)
            .returning(|_| Ok(()));

        let transport = RetryingTransport::new(
            inner,
            RetryPolicy::default(),
            Arc::new(RecordingSleeper::default()),
            Arc::new(metrics),
        );
        transport.execute(request()).await.expect("recovers");
    }

    #[tokio::test]
    async fn reports_rejections_separately() {
        let mut inner = MockUpstreamTransport::new();
        inner
            .expect_execute()
            .times(1)
            .returning(|_| Ok(response(StatusCode::UNPROCESSABLE_ENTITY)));
        let mut metrics = MockUpstreamCallMetrics::new();
        metrics
            .expect_record_attempt()
            .with(mockall::predicate::eq(UpstreamAttemptOutcome::Rejected))
            .times(1)
            .returning(|_| Ok(()));

        let transport = RetryingTransport::new(
            inner,
            RetryPolicy::default(),
            Arc::new(RecordingSleeper::default()),
            Arc::new(metrics),
        );
        let result = transport.execute(request()).await.expect("response");
        assert_eq!(result.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn zero_retries_attempts_once() {
        let mut inner = MockUpstreamTransport::new();
        inner
            .expect_execute()
            .times(1)
            .returning(|_| Ok(response(StatusCode::SERVICE_UNAVAILABLE)));
        let sleeper = Arc::new(RecordingSleeper::default());
        let transport = RetryingTransport::new(
            inner,
            RetryPolicy {
                max_retries: 0,
                initial_backoff: Duration::from_millis(200),
            },
            Arc::clone(&sleeper) as Arc<dyn RetrySleeper>,
            Arc::new(NoOpUpstreamCallMetrics),
        );

        let result = transport.execute(request()).await.expect("response");
        assert_eq!(result.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(sleeper.delays().is_empty());
    }
}

//! Prometheus adapter for upstream attempt counters.
//!
//! Registered on the same registry that backs `/metrics/prom`, so attempt
//! outcomes appear next to the per-route HTTP metrics.

use async_trait::async_trait;
use prometheus::{CounterVec, Opts, Registry};

use crate::domain::ports::{
    UpstreamAttemptOutcome, UpstreamCallMetrics, UpstreamCallMetricsError,
};

/// Prometheus-backed upstream attempt recorder.
///
/// # Metric Specification
///
/// - **Name**: `gateway_upstream_attempts_total`
/// - **Type**: Counter
/// - **Labels**:
///   - `outcome`: `success`, `rejected`, `retried`, or `exhausted`
pub struct PrometheusUpstreamCallMetrics {
    attempts_total: CounterVec,
}

impl PrometheusUpstreamCallMetrics {
    /// Create and register metrics with the given registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the metric cannot be registered (e.g., if a metric
    /// with the same name already exists in the registry).
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let attempts_total = CounterVec::new(
            Opts::new(
                "gateway_upstream_attempts_total",
                "Total upstream call attempts by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(attempts_total.clone()))?;
        Ok(Self { attempts_total })
    }
}

#[async_trait]
impl UpstreamCallMetrics for PrometheusUpstreamCallMetrics {
    async fn record_attempt(
        &self,
        outcome: UpstreamAttemptOutcome,
    ) -> Result<(), UpstreamCallMetricsError> {
        self.attempts_total
            .with_label_values(&[outcome.as_label()])
            .inc();
        Ok(())
    }
}

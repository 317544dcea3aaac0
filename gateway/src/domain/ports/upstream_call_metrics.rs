//! Domain port surface for upstream call attempt counters.
//!
//! The retry decorator reports each attempt outcome here so adapters can
//! export counters without the decorator knowing about Prometheus.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording upstream call metrics.
    pub enum UpstreamCallMetricsError {
        /// Metric exporter rejected the write.
        Export {
            /// Exporter error description.
            message: String,
        } => "upstream call metrics exporter failed: {message}",
    }
}

/// Outcome label for one upstream attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamAttemptOutcome {
    /// The attempt produced a successful response.
    Success,
    /// Upstream answered with a final client error such as `404` or `422`.
    Rejected,
    /// The attempt failed transiently and another attempt follows.
    Retried,
    /// The attempt failed transiently and no retries remain.
    Exhausted,
}

impl UpstreamAttemptOutcome {
    /// Metric label value.
    #[must_use]
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Rejected => "rejected",
            Self::Retried => "retried",
            Self::Exhausted => "exhausted",
        }
    }
}

/// Metrics recording port for upstream attempts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamCallMetrics: Send + Sync {
    /// Record the outcome of one attempt.
    async fn record_attempt(
        &self,
        outcome: UpstreamAttemptOutcome,
    ) -> Result<(), UpstreamCallMetricsError>;
}

/// No-op implementation used when metrics are disabled or in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpUpstreamCallMetrics;

#[async_trait]
impl UpstreamCallMetrics for NoOpUpstreamCallMetrics {
    async fn record_attempt(
        &self,
        _outcome: UpstreamAttemptOutcome,
    ) -> Result<(), UpstreamCallMetricsError> {
        Ok(())
    }
}

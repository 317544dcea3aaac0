//! Per-request counters owned by an explicitly constructed context.
//!
//! One [`RequestTelemetry`] is built at startup and shared with the request
//! path. Totals use atomics; the per-status and per-path breakdowns sit
//! behind one mutex so a sample lands in both maps together.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Outcome of one handled request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSample {
    /// Request path without query string.
    pub path: String,
    /// Final response status.
    pub status: u16,
    /// Wall-clock handling time.
    pub elapsed: Duration,
}

impl RequestSample {
    /// Statuses at or above 400 count as errors.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.status >= 400
    }
}

#[derive(Debug, Default)]
struct Breakdown {
    by_status: BTreeMap<u16, u64>,
    by_path: HashMap<String, u64>,
}

/// Process-lifetime request counters.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use gateway::domain::{RequestSample, RequestTelemetry};
///
/// let telemetry = RequestTelemetry::new();
/// telemetry.record(&RequestSample {
///     path: "/healthz".to_owned(),
///     status: 200,
///     elapsed: Duration::from_millis(3),
/// });
/// let snapshot = telemetry.snapshot();
/// assert_eq!(snapshot.total_requests, 1);
/// assert_eq!(snapshot.total_errors, 0);
/// ```
#[derive(Debug, Default)]
pub struct RequestTelemetry {
    total_requests: AtomicU64,
    total_errors: AtomicU64,
    total_latency_micros: AtomicU64,
    breakdown: Mutex<Breakdown>,
}

/// Read-only view of the counters.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySnapshot {
    /// Requests handled since start-up.
    pub total_requests: u64,
    /// Requests that ended with a status of 400 or above.
    pub total_errors: u64,
    /// Mean latency in milliseconds, rounded to two decimals.
    pub avg_ms: f64,
    /// Counts per status code, ascending by code.
    pub status_counts: Vec<(u16, u64)>,
    /// Counts per path, busiest first, ties by path.
    pub path_counts: Vec<(String, u64)>,
}

impl RequestTelemetry {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one handled request.
    pub fn record(&self, sample: &RequestSample) {
        let micros = u64::try_from(sample.elapsed.as_micros()).unwrap_or(u64::MAX);
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.total_latency_micros
            .fetch_add(micros, Ordering::Relaxed);
        if sample.is_error() {
            self.total_errors.fetch_add(1, Ordering::Relaxed);
        }

        let mut breakdown = self
            .breakdown
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *breakdown.by_status.entry(sample.status).or_insert(0) += 1;
        *breakdown.by_path.entry(sample.path.clone()).or_insert(0) += 1;
    }

    /// Capture the current counters.
    #[must_use]
    pub fn snapshot(&self) -> TelemetrySnapshot {
        let (status_counts, path_counts) = {
            let breakdown = self
                .breakdown
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let statuses: Vec<(u16, u64)> = breakdown
                .by_status
                .iter()
                .map(|(status, count)| (*status, *count))
                .collect();
            let mut paths: Vec<(String, u64)> = breakdown
                .by_path
                .iter()
                .map(|(path, count)| (path.clone(), *count))
                .collect();
            paths.sort_by(|(left_path, left), (right_path, right)| {
                right.cmp(left).then_with(|| left_path.cmp(right_path))
            });
            (statuses, paths)
        };

        let total_requests = self.total_requests.load(Ordering::Relaxed);
        TelemetrySnapshot {
            total_requests,
            total_errors: self.total_errors.load(Ordering::Relaxed),
            avg_ms: average_ms(
                self.total_latency_micros.load(Ordering::Relaxed),
                total_requests,
            ),
            status_counts,
            path_counts,
        }
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    clippy::integer_division,
    reason = "avg_ms is a display value rounded to hundredths of a millisecond"
)]
fn average_ms(total_micros: u64, requests: u64) -> f64 {
    if requests == 0 {
        return 0.0;
    }
    let divisor = requests.saturating_mul(10);
    let hundredths = total_micros.saturating_add(requests.saturating_mul(5)) / divisor;
    hundredths as f64 / 100.0
}

//! Outbound adapters for metrics exporting.
//!
//! Prometheus-backed implementations of domain metrics ports.

mod prometheus_upstream_calls;

pub use prometheus_upstream_calls::PrometheusUpstreamCallMetrics;

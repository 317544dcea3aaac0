//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod content_source;
mod guidance_query;
mod upstream_call_metrics;

#[cfg(test)]
pub use content_source::MockContentSource;
pub use content_source::{ContentSource, ContentSourceError, FixtureContentSource};
#[cfg(test)]
pub use guidance_query::MockGuidanceQuery;
pub use guidance_query::GuidanceQuery;
#[cfg(test)]
pub use upstream_call_metrics::MockUpstreamCallMetrics;
pub use upstream_call_metrics::{
    NoOpUpstreamCallMetrics, UpstreamAttemptOutcome, UpstreamCallMetrics,
    UpstreamCallMetricsError,
};

//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::GuidanceQuery;
use crate::domain::{RequestTelemetry, SourceProfile};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Search and content use cases.
    pub guidance: Arc<dyn GuidanceQuery>,
    /// Descriptor served by the source metadata endpoint.
    pub profile: Arc<SourceProfile>,
    /// Counters read by the JSON metrics endpoint.
    pub telemetry: Arc<RequestTelemetry>,
}

impl HttpState {
    /// Bundle the handler dependencies.
    #[must_use]
    pub const fn new(
        guidance: Arc<dyn GuidanceQuery>,
        profile: Arc<SourceProfile>,
        telemetry: Arc<RequestTelemetry>,
    ) -> Self {
        Self {
            guidance,
            profile,
            telemetry,
        }
    }
}

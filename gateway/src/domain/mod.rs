//! Domain primitives, use cases and ports for the guidance gateway.
//!
//! Nothing in this module depends on the HTTP framework. Inbound adapters
//! turn requests into these types; outbound adapters implement the ports.

pub mod content;
pub mod correlation;
pub mod error;
pub mod guidance_service;
pub mod ports;
pub mod projector;
pub mod resiliency;
pub mod search;
pub mod source_profile;
pub mod telemetry;
pub mod timestamp;

pub use self::content::{
    ContentEnvelope, ContentId, ContentItem, ContentLookupKey, ContentOptions, ContentPath,
    ContentRequest, Enrichment,
};
pub use self::correlation::{CORRELATION_ID_HEADER, CorrelationId};
pub use self::error::{DomainError, Error, ErrorCode};
pub use self::guidance_service::GuidanceService;
pub use self::resiliency::{RetryPolicy, RetrySleeper, TokioSleeper};
pub use self::search::{
    Paging, SearchFilters, SearchPage, SearchQuery, SearchRequest, SearchResultItem,
    SearchResultSet, TimestampRange,
};
pub use self::source_profile::SourceProfile;
pub use self::telemetry::{RequestSample, RequestTelemetry, TelemetrySnapshot};

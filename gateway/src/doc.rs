//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every tool endpoint plus the health and JSON metrics
//! checks. The generated document backs Swagger UI in debug builds and is
//! exported by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::health::HealthResponse;
use crate::inbound::http::metrics::MetricsResponse;
use crate::inbound::http::tools::catalogue::{
    ErrorTaxonomyResponse, RefreshResponse, SourceMetadataResponse, TaxonomyEntry,
};
use crate::inbound::http::tools::content::{
    ContentByIdRequest, ContentByPathRequest, ContentEnvelopeResponse, ContentOptionsBody,
    EnrichmentBody,
};
use crate::inbound::http::tools::search::{
    SearchFiltersBody, SearchGuidanceRequest, SearchGuidanceResponse, SearchResultBody,
};

/// OpenAPI document for the gateway.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Guidance gateway API",
        description = "Tool-style endpoints over GOV.UK Charity Commission guidance."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::tools::search::search_guidance,
        crate::inbound::http::tools::content::get_content_by_path,
        crate::inbound::http::tools::content::get_content_by_id,
        crate::inbound::http::tools::catalogue::get_source_metadata,
        crate::inbound::http::tools::catalogue::get_error_taxonomy,
        crate::inbound::http::tools::catalogue::force_refresh,
        crate::inbound::http::health::healthz,
        crate::inbound::http::metrics::metrics,
    ),
    components(schemas(
        Error,
        ErrorCode,
        SearchGuidanceRequest,
        SearchFiltersBody,
        SearchGuidanceResponse,
        SearchResultBody,
        ContentByPathRequest,
        ContentByIdRequest,
        ContentOptionsBody,
        ContentEnvelopeResponse,
        EnrichmentBody,
        SourceMetadataResponse,
        ErrorTaxonomyResponse,
        TaxonomyEntry,
        RefreshResponse,
        HealthResponse,
        MetricsResponse,
    )),
    tags(
        (name = "tools", description = "Guidance search and content tools"),
        (name = "health", description = "Health checks and counters")
    )
)]
pub struct ApiDoc;

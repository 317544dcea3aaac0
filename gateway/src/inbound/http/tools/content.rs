//! Content lookup endpoints.
//!
//! ```text
//! POST /tools/get_content_by_path
//! POST /tools/get_content_by_id
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ContentEnvelope, ContentLookupKey, ContentOptions, ContentRequest, Enrichment, Error,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Options shared by both content lookups.
#[derive(Debug, Default, Clone, Copy, Deserialize, ToSchema)]
pub struct ContentOptionsBody {
    /// Attach the enrichment block.
    #[serde(default)]
    pub include_enrichment: bool,
    /// Report a miss as `404 NOT_FOUND_OR_REDIRECTED` instead of a
    /// placeholder envelope.
    #[serde(default)]
    pub strict_upstream_errors: bool,
}

impl From<ContentOptionsBody> for ContentOptions {
    fn from(body: ContentOptionsBody) -> Self {
        Self {
            include_enrichment: body.include_enrichment,
            strict_upstream_errors: body.strict_upstream_errors,
        }
    }
}

/// Request body for a lookup by path.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ContentByPathRequest {
    /// Site path; a leading `/` is added when missing.
    #[schema(example = "/guidance/charity-trustee-whats-involved")]
    #[serde(default)]
    pub path: Option<String>,
    /// Lookup options.
    #[serde(default)]
    pub options: Option<ContentOptionsBody>,
}

/// Request body for a lookup by content identifier.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ContentByIdRequest {
    /// Upstream content identifier.
    #[serde(default)]
    pub content_id: Option<String>,
    /// Lookup options.
    #[serde(default)]
    pub options: Option<ContentOptionsBody>,
}

impl From<ContentByPathRequest> for ContentRequest {
    fn from(body: ContentByPathRequest) -> Self {
        Self {
            key: ContentLookupKey::path(body.path.as_deref()),
            options: body.options.unwrap_or_default().into(),
        }
    }
}

impl From<ContentByIdRequest> for ContentRequest {
    fn from(body: ContentByIdRequest) -> Self {
        Self {
            key: ContentLookupKey::id(body.content_id.as_deref()),
            options: body.options.unwrap_or_default().into(),
        }
    }
}

/// Enrichment marker block.
#[derive(Debug, Serialize, ToSchema)]
pub struct EnrichmentBody {
    /// Always `true`.
    pub is_enrichment: bool,
    /// Notes describing the enrichment.
    pub notes: String,
}

impl From<Enrichment> for EnrichmentBody {
    fn from(enrichment: Enrichment) -> Self {
        Self {
            is_enrichment: enrichment.is_enrichment,
            notes: enrichment.notes,
        }
    }
}

/// Content response with provenance.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContentEnvelopeResponse {
    /// Upstream content document, or `{}` when nothing was found.
    #[schema(value_type = Object)]
    pub content: serde_json::Value,
    /// Absolute URL of the content.
    pub url: String,
    /// Publish timestamp.
    #[schema(example = "2024-04-01T10:00:00Z")]
    pub public_updated_at: String,
    /// Licence attribution.
    pub attribution: String,
    /// Legal disclaimer.
    pub disclaimer: String,
    /// Upstream or requested content identifier.
    pub content_id: String,
    /// Present only when enrichment was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<EnrichmentBody>,
}

impl From<ContentEnvelope> for ContentEnvelopeResponse {
    fn from(envelope: ContentEnvelope) -> Self {
        Self {
            content: envelope.content,
            url: envelope.url,
            public_updated_at: envelope.public_updated_at,
            attribution: envelope.attribution,
            disclaimer: envelope.disclaimer,
            content_id: envelope.content_id,
            enrichment: envelope.enrichment.map(EnrichmentBody::from),
        }
    }
}

async fn lookup(
    state: &HttpState,
    request: ContentRequest,
) -> ApiResult<web::Json<ContentEnvelopeResponse>> {
    let envelope = state.guidance.content(request).await?;
    Ok(web::Json(ContentEnvelopeResponse::from(envelope)))
}

/// Fetch guidance content by site path.
#[utoipa::path(
    post,
    path = "/tools/get_content_by_path",
    request_body = ContentByPathRequest,
    responses(
        (status = 200, description = "Content envelope", body = ContentEnvelopeResponse),
        (status = 400, description = "Invalid request or parameters", body = Error),
        (status = 404, description = "Not found under strict mode", body = Error),
        (status = 503, description = "Upstream unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tools"],
    operation_id = "getContentByPath"
)]
#[post("/tools/get_content_by_path")]
pub async fn get_content_by_path(
    state: web::Data<HttpState>,
    payload: web::Json<ContentByPathRequest>,
) -> ApiResult<web::Json<ContentEnvelopeResponse>> {
    lookup(&state, payload.into_inner().into()).await
}

/// Fetch guidance content by upstream content identifier.
#[utoipa::path(
    post,
    path = "/tools/get_content_by_id",
    request_body = ContentByIdRequest,
    responses(
        (status = 200, description = "Content envelope", body = ContentEnvelopeResponse),
        (status = 400, description = "Invalid request or parameters", body = Error),
        (status = 404, description = "Not found under strict mode", body = Error),
        (status = 503, description = "Upstream unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tools"],
    operation_id = "getContentById"
)]
#[post("/tools/get_content_by_id")]
pub async fn get_content_by_id(
    state: web::Data<HttpState>,
    payload: web::Json<ContentByIdRequest>,
) -> ApiResult<web::Json<ContentEnvelopeResponse>> {
    lookup(&state, payload.into_inner().into()).await
}

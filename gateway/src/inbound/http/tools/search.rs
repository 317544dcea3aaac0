//! Guidance search endpoint.
//!
//! ```text
//! POST /tools/search_guidance
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, SearchQuery, SearchRequest, SearchResultItem, SearchResultSet};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for a guidance search.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SearchGuidanceRequest {
    /// Free-text query. Required and non-blank.
    #[schema(example = "trustee duties")]
    #[serde(default)]
    pub query: Option<String>,
    /// One-based page number. Values below 1 are treated as 1.
    #[schema(example = 1)]
    #[serde(default)]
    pub page: Option<i64>,
    /// Results per page, clamped to 1..=100. Defaults to 20.
    #[schema(example = 20)]
    #[serde(default, rename = "pageSize")]
    pub page_size: Option<i64>,
    /// Optional narrowing filters.
    #[serde(default)]
    pub filters: Option<SearchFiltersBody>,
}

/// Narrowing filters for a guidance search.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SearchFiltersBody {
    /// Publishing organisation slug.
    #[schema(example = "charity-commission")]
    #[serde(default)]
    pub organisation: Option<String>,
    /// Document format.
    #[schema(example = "guidance")]
    #[serde(default)]
    pub format: Option<String>,
    /// Earliest publish timestamp, inclusive.
    #[schema(example = "2024-01-01T00:00:00Z")]
    #[serde(default)]
    pub public_timestamp_from: Option<String>,
    /// Latest publish timestamp, inclusive.
    #[serde(default)]
    pub public_timestamp_to: Option<String>,
}

impl From<SearchGuidanceRequest> for SearchRequest {
    fn from(body: SearchGuidanceRequest) -> Self {
        let filters = body.filters.unwrap_or_default();
        Self {
            query: body.query,
            page: body.page,
            page_size: body.page_size,
            organisation: filters.organisation,
            format: filters.format,
            public_timestamp_from: filters.public_timestamp_from,
            public_timestamp_to: filters.public_timestamp_to,
        }
    }
}

/// One search hit.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResultBody {
    /// Document title.
    pub title: String,
    /// Absolute URL on the public site.
    #[schema(example = "https://www.gov.uk/guidance/charity-trustee-whats-involved")]
    pub url: String,
    /// Short description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Publish timestamp as reported upstream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_updated_at: Option<String>,
    /// Upstream content identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
}

impl From<SearchResultItem> for SearchResultBody {
    fn from(item: SearchResultItem) -> Self {
        Self {
            title: item.title,
            url: item.url,
            summary: item.summary,
            public_updated_at: item.public_updated_at,
            content_id: item.content_id,
        }
    }
}

/// Search response: results newest first plus paging.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchGuidanceResponse {
    /// Results ordered by publish timestamp, newest first.
    pub results: Vec<SearchResultBody>,
    /// Page echoed after clamping.
    pub page: u32,
    /// Page size echoed after clamping.
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    /// Upstream-reported total match count.
    pub total: u64,
}

impl From<SearchResultSet> for SearchGuidanceResponse {
    fn from(set: SearchResultSet) -> Self {
        Self {
            results: set.items.into_iter().map(SearchResultBody::from).collect(),
            page: set.paging.page(),
            page_size: set.paging.page_size(),
            total: set.total,
        }
    }
}

/// Search Charity Commission guidance.
#[utoipa::path(
    post,
    path = "/tools/search_guidance",
    description = "Search guidance on GOV.UK. Results are ordered newest first.",
    request_body = SearchGuidanceRequest,
    responses(
        (status = 200, description = "Search results", body = SearchGuidanceResponse),
        (status = 400, description = "Invalid request or parameters", body = Error),
        (status = 503, description = "Upstream unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tools"],
    operation_id = "searchGuidance"
)]
#[post("/tools/search_guidance")]
pub async fn search_guidance(
    state: web::Data<HttpState>,
    payload: web::Json<SearchGuidanceRequest>,
) -> ApiResult<web::Json<SearchGuidanceResponse>> {
    let query = SearchQuery::try_from(SearchRequest::from(payload.into_inner()))?;
    let results = state.guidance.search(query).await?;
    Ok(web::Json(SearchGuidanceResponse::from(results)))
}

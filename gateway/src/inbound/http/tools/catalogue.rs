//! Static tool endpoints: source metadata, error taxonomy and refresh.
//!
//! ```text
//! GET  /tools/get_source_metadata
//! GET  /tools/get_error_taxonomy
//! POST /tools/force_refresh
//! ```

use actix_web::{get, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ErrorCode, SourceProfile};
use crate::inbound::http::state::HttpState;

/// Descriptor of the upstream source.
#[derive(Debug, Serialize, ToSchema)]
pub struct SourceMetadataResponse {
    /// Publishing organisation slug.
    #[schema(example = "charity-commission")]
    pub organisation: String,
    /// Human-readable source name.
    #[schema(example = "GOV.UK Content API")]
    pub source: String,
    /// Base URL of the upstream API.
    #[schema(example = "https://www.gov.uk/api")]
    pub base_url: String,
    /// Where the upstream API is documented.
    pub documentation_url: String,
}

impl From<&SourceProfile> for SourceMetadataResponse {
    fn from(profile: &SourceProfile) -> Self {
        Self {
            organisation: profile.organisation.clone(),
            source: profile.source.clone(),
            base_url: profile.base_url.clone(),
            documentation_url: profile.documentation_url.clone(),
        }
    }
}

/// One published error code.
#[derive(Debug, Serialize, ToSchema)]
pub struct TaxonomyEntry {
    /// Stable error code.
    pub code: ErrorCode,
    /// What the code means to a caller.
    pub description: String,
}

/// Published error codes.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorTaxonomyResponse {
    /// Every published code, in a fixed order.
    pub errors: Vec<TaxonomyEntry>,
}

impl ErrorTaxonomyResponse {
    fn published() -> Self {
        Self {
            errors: ErrorCode::TAXONOMY
                .into_iter()
                .map(|code| TaxonomyEntry {
                    code,
                    description: code.description().to_owned(),
                })
                .collect(),
        }
    }
}

/// Acknowledgement returned by the refresh endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    /// Always `ok`.
    #[schema(example = "ok")]
    pub status: String,
    /// Always `false`; the gateway keeps no cache.
    pub cached: bool,
}

/// Describe the upstream source.
#[utoipa::path(
    get,
    path = "/tools/get_source_metadata",
    responses((status = 200, description = "Source descriptor", body = SourceMetadataResponse)),
    tags = ["tools"],
    operation_id = "getSourceMetadata"
)]
#[get("/tools/get_source_metadata")]
pub async fn get_source_metadata(
    state: web::Data<HttpState>,
) -> web::Json<SourceMetadataResponse> {
    web::Json(SourceMetadataResponse::from(state.profile.as_ref()))
}

/// List the published error codes.
#[utoipa::path(
    get,
    path = "/tools/get_error_taxonomy",
    responses((status = 200, description = "Error taxonomy", body = ErrorTaxonomyResponse)),
    tags = ["tools"],
    operation_id = "getErrorTaxonomy"
)]
#[get("/tools/get_error_taxonomy")]
pub async fn get_error_taxonomy() -> web::Json<ErrorTaxonomyResponse> {
    web::Json(ErrorTaxonomyResponse::published())
}

/// Acknowledge a refresh request. Any body is accepted and ignored.
#[utoipa::path(
    post,
    path = "/tools/force_refresh",
    responses((status = 200, description = "Refresh acknowledged", body = RefreshResponse)),
    tags = ["tools"],
    operation_id = "forceRefresh"
)]
#[post("/tools/force_refresh")]
pub async fn force_refresh() -> web::Json<RefreshResponse> {
    web::Json(RefreshResponse {
        status: "ok".to_owned(),
        cached: false,
    })
}

//! Guidance use cases: search projection and content envelopes.
//!
//! The service drives the [`ContentSource`] port, reorders search pages and
//! builds provenance envelopes. A content miss becomes a placeholder envelope
//! unless the caller asked for strict upstream errors and named something to
//! look up. A blank identifier always yields a placeholder.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::warn;
use uuid::Uuid;

use super::content::{ContentEnvelope, ContentItem, ContentLookupKey, ContentRequest, Enrichment};
use super::ports::{ContentSource, ContentSourceError, GuidanceQuery};
use super::projector::project;
use super::search::{SearchQuery, SearchResultSet};
use super::source_profile::SourceProfile;
use super::timestamp::format_provenance_timestamp;
use super::{Error, ErrorCode};

/// Default [`GuidanceQuery`] implementation.
pub struct GuidanceService {
    source: Arc<dyn ContentSource>,
    clock: Arc<dyn Clock + Send + Sync>,
    profile: Arc<SourceProfile>,
}

impl GuidanceService {
    /// Build the service from its collaborators.
    pub fn new(
        source: Arc<dyn ContentSource>,
        clock: Arc<dyn Clock + Send + Sync>,
        profile: Arc<SourceProfile>,
    ) -> Self {
        Self {
            source,
            clock,
            profile,
        }
    }

    async fn resolve(&self, key: &ContentLookupKey) -> Result<Option<ContentItem>, Error> {
        let result = match key {
            ContentLookupKey::Path(Some(path)) => self.source.fetch_by_path(path).await,
            ContentLookupKey::Id(Some(id)) => self.source.fetch_by_id(id).await,
            ContentLookupKey::Path(None) | ContentLookupKey::Id(None) => Ok(None),
        };
        result.map_err(map_source_error)
    }

    fn envelope(&self, request: &ContentRequest, item: Option<ContentItem>) -> ContentEnvelope {
        let requested_id = request
            .key
            .requested_id()
            .map(|id| id.as_str().to_owned());
        let (content, url, public_updated_at, content_id) = match item {
            Some(item) => (
                item.document_object(),
                item.url,
                item.public_updated_at,
                item.content_id,
            ),
            None => (serde_json::Value::Object(serde_json::Map::new()), None, None, None),
        };

        ContentEnvelope {
            content,
            url: url.unwrap_or_else(|| self.profile.site_root.clone()),
            public_updated_at: public_updated_at
                .unwrap_or_else(|| format_provenance_timestamp(&self.clock.utc())),
            attribution: self.profile.attribution.clone(),
            disclaimer: self.profile.disclaimer.clone(),
            content_id: content_id
                .or(requested_id)
                .unwrap_or_else(|| Uuid::nil().to_string()),
            enrichment: request
                .options
                .include_enrichment
                .then(Enrichment::stub),
        }
    }
}

#[async_trait]
impl GuidanceQuery for GuidanceService {
    async fn search(&self, query: SearchQuery) -> Result<SearchResultSet, Error> {
        let page = self
            .source
            .search(&query)
            .await
            .map_err(map_source_error)?;
        Ok(project(page, query.paging()))
    }

    async fn content(&self, request: ContentRequest) -> Result<ContentEnvelope, Error> {
        let item = self.resolve(&request.key).await?;
        if item.is_none()
            && request.options.strict_upstream_errors
            && request.key.reports_strict_miss()
        {
            return Err(Error::not_found_or_redirected(
                request.key.not_found_message(),
            ));
        }
        Ok(self.envelope(&request, item))
    }
}

fn map_source_error(error: ContentSourceError) -> Error {
    let mapped = if error.is_transport_failure() {
        Error::upstream_unavailable(ErrorCode::UpstreamRateLimited.description())
    } else if matches!(error, ContentSourceError::ParameterRejected { .. }) {
        Error::upstream_parameter(ErrorCode::UpstreamParameterError.description())
    } else {
        Error::internal(error.to_string())
    };
    warn!(
        kind = error.kind(),
        code = %mapped.code(),
        error = %error,
        "upstream content source failed"
    );
    mapped
}

//! GOV.UK search and content API adapter.
//!
//! This adapter owns the upstream dialect: URL construction, status
//! interpretation and JSON decoding. Transport concerns (timeouts, retries,
//! correlation headers) live in the [`UpstreamTransport`] it is given.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};

use super::dto::{SearchResponseDto, decode_content};
use super::query::{
    content_id_params, content_url, normalize_base, search_params, search_url,
};
use super::site::PublicSite;
use super::transport::{TransportError, UpstreamRequest, UpstreamResponse, UpstreamTransport};
use crate::domain::ports::{ContentSource, ContentSourceError};
use crate::domain::{ContentId, ContentItem, ContentPath, SearchPage, SearchQuery};

/// [`ContentSource`] backed by the GOV.UK APIs.
pub struct GovUkContentApi<T> {
    transport: T,
    base: Url,
    site: PublicSite,
}

impl<T> GovUkContentApi<T>
where
    T: UpstreamTransport,
{
    /// Build an adapter calling `upstream_base` and resolving links against
    /// `site`.
    #[must_use]
    pub fn new(transport: T, upstream_base: Url, site: PublicSite) -> Self {
        Self {
            transport,
            base: normalize_base(upstream_base),
            site,
        }
    }

    async fn get(&self, url: Url) -> Result<UpstreamResponse, ContentSourceError> {
        self.transport
            .execute(UpstreamRequest::get(url))
            .await
            .map_err(map_transport_error)
    }
}

#[async_trait]
impl<T> ContentSource for GovUkContentApi<T>
where
    T: UpstreamTransport,
{
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, ContentSourceError> {
        let url = search_url(&self.base, &search_params(query))?;
        let response = self.get(url).await?;
        ensure_success(&response, Lookup::Search)?;
        Ok(SearchResponseDto::decode(&response.body)?.into_search_page(&self.site))
    }

    async fn fetch_by_path(
        &self,
        path: &ContentPath,
    ) -> Result<Option<ContentItem>, ContentSourceError> {
        let url = content_url(&self.base, path)?;
        let response = self.get(url).await?;
        if response.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        ensure_success(&response, Lookup::Content)?;
        decode_content(&response.body, path, &self.site).map(Some)
    }

    async fn fetch_by_id(&self, id: &ContentId) -> Result<Option<ContentItem>, ContentSourceError> {
        let url = search_url(&self.base, &content_id_params(id))?;
        let response = self.get(url).await?;
        if response.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        ensure_success(&response, Lookup::Content)?;
        let dto = SearchResponseDto::decode(&response.body)?;
        let Some(path) = dto.first_link().and_then(|link| self.site.content_path(link)) else {
            return Ok(None);
        };
        self.fetch_by_path(&path).await
    }
}

/// Which kind of call produced a response.
///
/// Only free-text search reports `422` as rejected parameters; content
/// lookups treat every unexpected status as an upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Search,
    Content,
}

fn ensure_success(response: &UpstreamResponse, lookup: Lookup) -> Result<(), ContentSourceError> {
    if response.status.is_success() {
        Ok(())
    } else {
        Err(map_status_error(response.status, &response.body, lookup))
    }
}

fn map_transport_error(error: TransportError) -> ContentSourceError {
    ContentSourceError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8], lookup: Lookup) -> ContentSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };

    match status {
        StatusCode::UNPROCESSABLE_ENTITY if lookup == Lookup::Search => {
            ContentSourceError::parameter_rejected(message)
        }
        StatusCode::TOO_MANY_REQUESTS => ContentSourceError::rate_limited(message),
        _ => ContentSourceError::unavailable(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let mut preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        preview.push_str("...");
    }
    preview
}

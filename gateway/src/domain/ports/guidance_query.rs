//! Driving port used by inbound adapters to serve guidance requests.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::content::{ContentEnvelope, ContentRequest};
use crate::domain::search::{SearchQuery, SearchResultSet};

/// Use-case surface for search and content lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuidanceQuery: Send + Sync {
    /// Search guidance and return results ordered newest first.
    async fn search(&self, query: SearchQuery) -> Result<SearchResultSet, Error>;

    /// Resolve content by path or identifier into a provenance envelope.
    async fn content(&self, request: ContentRequest) -> Result<ContentEnvelope, Error>;
}

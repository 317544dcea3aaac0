//! Driven port for the upstream content and search API.
//!
//! The domain asks for search pages and content documents through this trait;
//! the outbound adapter owns query dialect, status interpretation, retries and
//! JSON decoding.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::content::{ContentId, ContentItem, ContentPath};
use crate::domain::search::{SearchPage, SearchQuery};

define_port_error! {
    /// Errors raised by content source adapters.
    pub enum ContentSourceError {
        /// Upstream rejected the derived search parameters (HTTP 422).
        ParameterRejected {
            /// Upstream status line and body preview.
            message: String,
        } => "upstream rejected parameters: {message}",
        /// Upstream throttled the call and retries were exhausted.
        RateLimited {
            /// Upstream status line and body preview.
            message: String,
        } => "upstream rate limited: {message}",
        /// Upstream returned a non-success status.
        Unavailable {
            /// HTTP status code.
            status: u16,
            /// Upstream status line and body preview.
            message: String,
        } => "upstream returned status {status}: {message}",
        /// Network failure or timeout after retries were exhausted.
        Transport {
            /// Client error description.
            message: String,
        } => "upstream transport failed: {message}",
        /// A success response could not be decoded.
        Decode {
            /// Decoder error description.
            message: String,
        } => "upstream payload could not be decoded: {message}",
        /// The adapter could not build a valid upstream request.
        InvalidRequest {
            /// URL construction failure.
            message: String,
        } => "upstream request could not be built: {message}",
    }
}

impl ContentSourceError {
    /// True when the failure reflects upstream availability rather than
    /// the request or payload.
    #[must_use]
    pub const fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Unavailable { .. } | Self::Transport { .. }
        )
    }
}

/// Upstream content and search capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch one page of search results in upstream order.
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, ContentSourceError>;

    /// Fetch a content document by path. `Ok(None)` when upstream has none.
    async fn fetch_by_path(
        &self,
        path: &ContentPath,
    ) -> Result<Option<ContentItem>, ContentSourceError>;

    /// Resolve a content document by identifier. `Ok(None)` when unresolved.
    async fn fetch_by_id(&self, id: &ContentId) -> Result<Option<ContentItem>, ContentSourceError>;
}

/// Fixture source returning no results; used when no upstream is wired.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureContentSource;

#[async_trait]
impl ContentSource for FixtureContentSource {
    async fn search(&self, _query: &SearchQuery) -> Result<SearchPage, ContentSourceError> {
        Ok(SearchPage::default())
    }

    async fn fetch_by_path(
        &self,
        _path: &ContentPath,
    ) -> Result<Option<ContentItem>, ContentSourceError> {
        Ok(None)
    }

    async fn fetch_by_id(
        &self,
        _id: &ContentId,
    ) -> Result<Option<ContentItem>, ContentSourceError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error classification.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::rate_limited(ContentSourceError::rate_limited("429"), true)]
    #[case::unavailable(ContentSourceError::unavailable(503_u16, "busy"), true)]
    #[case::transport(ContentSourceError::transport("refused"), true)]
    #[case::parameter(ContentSourceError::parameter_rejected("bad filter"), false)]
    #[case::decode(ContentSourceError::decode("eof"), false)]
    #[case::invalid(ContentSourceError::invalid_request("bad url"), false)]
    fn classifies_transport_failures(#[case] error: ContentSourceError, #[case] expected: bool) {
        assert_eq!(error.is_transport_failure(), expected);
    }

    #[tokio::test]
    async fn fixture_source_returns_nothing() {
        let source = FixtureContentSource;
        let path = ContentPath::new("/x").expect("path");
        assert!(source.fetch_by_path(&path).await.expect("ok").is_none());
        let id = ContentId::new("abc").expect("id");
        assert!(source.fetch_by_id(&id).await.expect("ok").is_none());
    }
}

//! Upstream JSON payloads and their conversion into domain records.

use serde::Deserialize;
use serde_json::Value;

use super::site::PublicSite;
use crate::domain::ports::ContentSourceError;
use crate::domain::{ContentItem, ContentPath, SearchPage, SearchResultItem};

/// Search envelope returned by `/api/search.json`.
#[derive(Debug, Deserialize)]
pub(super) struct SearchResponseDto {
    #[serde(default)]
    results: Vec<SearchResultDto>,
    #[serde(default)]
    total: Option<u64>,
}

/// One search hit as upstream reports it.
#[derive(Debug, Deserialize)]
pub(super) struct SearchResultDto {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    public_timestamp: Option<String>,
    #[serde(default)]
    content_id: Option<String>,
}

impl SearchResponseDto {
    /// Decode a search envelope.
    pub(super) fn decode(body: &[u8]) -> Result<Self, ContentSourceError> {
        serde_json::from_slice(body).map_err(|error| {
            ContentSourceError::decode(format!("invalid search JSON payload: {error}"))
        })
    }

    /// Convert into a domain page, dropping hits without a title or URL.
    pub(super) fn into_search_page(self, site: &PublicSite) -> SearchPage {
        let items = self
            .results
            .into_iter()
            .filter_map(|result| result.into_domain(site))
            .collect();
        SearchPage {
            items,
            total: self.total.unwrap_or(0),
        }
    }

    /// Link of the first hit, if any.
    pub(super) fn first_link(&self) -> Option<&str> {
        self.results
            .first()
            .and_then(|result| result.link.as_deref())
            .filter(|link| !link.trim().is_empty())
    }
}

impl SearchResultDto {
    fn into_domain(self, site: &PublicSite) -> Option<SearchResultItem> {
        let title = self.title.filter(|title| !title.trim().is_empty())?;
        let url = self.link.as_deref().and_then(|link| site.absolute_url(link))?;
        Some(SearchResultItem {
            title,
            url,
            summary: self.description,
            public_updated_at: self.public_timestamp,
            content_id: self.content_id,
        })
    }
}

/// Decode a content document, keeping the raw JSON alongside the fields the
/// gateway reads.
pub(super) fn decode_content(
    body: &[u8],
    requested: &ContentPath,
    site: &PublicSite,
) -> Result<ContentItem, ContentSourceError> {
    let document: Value = serde_json::from_slice(body).map_err(|error| {
        ContentSourceError::decode(format!("invalid content JSON payload: {error}"))
    })?;
    let text_field = |name: &str| {
        document
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_owned)
    };

    let canonical_path = text_field("base_path")
        .filter(|path| !path.trim().is_empty())
        .unwrap_or_else(|| requested.as_str().to_owned());
    Ok(ContentItem {
        url: site.absolute_url(&canonical_path),
        public_updated_at: text_field("public_updated_at"),
        content_id: text_field("content_id"),
        document,
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for payload decoding.

    use super::*;
    use reqwest::Url;
    use serde_json::json;

    fn site() -> PublicSite {
        PublicSite::new(Url::parse("https://www.gov.uk").expect("url"))
    }

    #[test]
    fn search_results_keep_upstream_order_and_drop_incomplete_hits() {
        let body = json!({
            "results": [
                {
                    "title": "Charity trustee: what's involved",
                    "link": "/guidance/charity-trustee-whats-involved",
                    "description": "Duties of trustees",
                    "public_timestamp": "2023-01-01T00:00:00Z",
                    "content_id": "cid-1"
                },
                { "title": "", "link": "/guidance/empty-title" },
                { "title": "No link" },
                { "title": "Blank link", "link": " " },
                { "title": "Minimal", "link": "/guidance/minimal" }
            ],
            "total": 812
        });
        let dto = SearchResponseDto::decode(body.to_string().as_bytes()).expect("decodes");
        let page = dto.into_search_page(&site());

        assert_eq!(page.total, 812);
        assert_eq!(page.items.len(), 2);
        let first = page.items.first().expect("first item");
        assert_eq!(
            first.url,
            "https://www.gov.uk/guidance/charity-trustee-whats-involved"
        );
        assert_eq!(first.summary.as_deref(), Some("Duties of trustees"));
        assert_eq!(first.content_id.as_deref(), Some("cid-1"));
        let second = page.items.get(1).expect("second item");
        assert_eq!(second.title, "Minimal");
        assert!(second.public_updated_at.is_none());
    }

    #[test]
    fn missing_total_defaults_to_zero() {
        let dto = SearchResponseDto::decode(br#"{"results": []}"#).expect("decodes");
        assert_eq!(dto.into_search_page(&site()).total, 0);
    }

    #[test]
    fn first_link_skips_blank_values() {
        let dto = SearchResponseDto::decode(br#"{"results": [{"link": ""}]}"#).expect("decodes");
        assert!(dto.first_link().is_none());
        let dto = SearchResponseDto::decode(br#"{"results": [{"link": "/guidance/x"}]}"#)
            .expect("decodes");
        assert_eq!(dto.first_link(), Some("/guidance/x"));
    }

    #[test]
    fn malformed_search_payloads_are_decode_errors() {
        let error = SearchResponseDto::decode(b"<html>").expect_err("not JSON");
        assert!(matches!(error, ContentSourceError::Decode { .. }));
    }

    #[test]
    fn content_prefers_base_path_for_url() {
        let requested = ContentPath::new("/old-path").expect("path");
        let body = json!({
            "base_path": "/guidance/new-path",
            "content_id": "cid-9",
            "public_updated_at": "2024-04-01T10:00:00Z",
            "details": { "body": "<p>Hello</p>" }
        });
        let item =
            decode_content(body.to_string().as_bytes(), &requested, &site()).expect("decodes");
        assert_eq!(
            item.url.as_deref(),
            Some("https://www.gov.uk/guidance/new-path")
        );
        assert_eq!(item.content_id.as_deref(), Some("cid-9"));
        assert_eq!(
            item.public_updated_at.as_deref(),
            Some("2024-04-01T10:00:00Z")
        );
        assert_eq!(item.document, body);
    }

    #[test]
    fn content_falls_back_to_requested_path() {
        let requested = ContentPath::new("/guidance/x").expect("path");
        let item = decode_content(br#"{"base_path": null}"#, &requested, &site()).expect("decodes");
        assert_eq!(item.url.as_deref(), Some("https://www.gov.uk/guidance/x"));
        assert!(item.content_id.is_none());
    }
}

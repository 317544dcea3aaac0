//! Search query validation and result types.
//!
//! A [`SearchQuery`] can only be built from a [`SearchRequest`] that passed
//! validation, so an invalid query never reaches the upstream port.

use chrono::{DateTime, Utc};

use super::Error;
use super::timestamp::parse_timestamp;

/// Page size used when the caller supplies none.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Largest page size forwarded upstream.
pub const MAX_PAGE_SIZE: u32 = 100;

/// One-based page number and page size after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    page: u32,
    page_size: u32,
}

impl Paging {
    /// Clamp raw caller values.
    ///
    /// `page` below 1 becomes 1. `page_size` is clamped into
    /// `1..=MAX_PAGE_SIZE` and defaults to [`DEFAULT_PAGE_SIZE`].
    ///
    /// # Examples
    /// ```
    /// use gateway::domain::Paging;
    ///
    /// let paging = Paging::from_raw(Some(0), Some(500));
    /// assert_eq!((paging.page(), paging.page_size()), (1, 100));
    /// ```
    #[must_use]
    pub fn from_raw(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = page.map_or(1, |value| {
            u32::try_from(value.max(1)).unwrap_or(u32::MAX)
        });
        let page_size = page_size.map_or(DEFAULT_PAGE_SIZE, |value| {
            let clamped = value.clamp(1, i64::from(MAX_PAGE_SIZE));
            u32::try_from(clamped).unwrap_or(MAX_PAGE_SIZE)
        });
        Self { page, page_size }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of results per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Zero-based offset of the first result on this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)).saturating_mul(u64::from(self.page_size))
    }
}

impl Default for Paging {
    fn default() -> Self {
        Self::from_raw(None, None)
    }
}

/// Inclusive publish-timestamp window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimestampRange {
    /// Lower bound, inclusive.
    pub from: Option<DateTime<Utc>>,
    /// Upper bound, inclusive.
    pub to: Option<DateTime<Utc>>,
}

/// Optional narrowing filters forwarded upstream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchFilters {
    /// Publishing organisation slug.
    pub organisation: Option<String>,
    /// Document format slug.
    pub format: Option<String>,
    /// Publish timestamp window.
    pub public_timestamp: TimestampRange,
}

/// Unvalidated search input as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free-text query.
    pub query: Option<String>,
    /// Requested page.
    pub page: Option<i64>,
    /// Requested page size.
    pub page_size: Option<i64>,
    /// Organisation filter.
    pub organisation: Option<String>,
    /// Format filter.
    pub format: Option<String>,
    /// Lower publish timestamp bound as supplied.
    pub public_timestamp_from: Option<String>,
    /// Upper publish timestamp bound as supplied.
    pub public_timestamp_to: Option<String>,
}

/// Validated search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    paging: Paging,
    filters: SearchFilters,
}

impl SearchQuery {
    /// Free-text query, never blank.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Clamped paging.
    #[must_use]
    pub const fn paging(&self) -> Paging {
        self.paging
    }

    /// Narrowing filters.
    #[must_use]
    pub const fn filters(&self) -> &SearchFilters {
        &self.filters
    }
}

impl TryFrom<SearchRequest> for SearchQuery {
    type Error = Error;

    fn try_from(request: SearchRequest) -> Result<Self, Self::Error> {
        let text = request
            .query
            .filter(|query| !query.trim().is_empty())
            .ok_or_else(|| Error::invalid_request("query is required"))?;

        let from = parse_bound(
            request.public_timestamp_from.as_deref(),
            "public_timestamp_from",
        )?;
        let to = parse_bound(request.public_timestamp_to.as_deref(), "public_timestamp_to")?;

        Ok(Self {
            text,
            paging: Paging::from_raw(request.page, request.page_size),
            filters: SearchFilters {
                organisation: non_blank(request.organisation),
                format: non_blank(request.format),
                public_timestamp: TimestampRange { from, to },
            },
        })
    }
}

fn parse_bound(raw: Option<&str>, field: &str) -> Result<Option<DateTime<Utc>>, Error> {
    raw.map(|value| {
        parse_timestamp(value).ok_or_else(|| Error::upstream_parameter(format!("Invalid {field}")))
    })
    .transpose()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|inner| !inner.trim().is_empty())
}

/// One search hit in public form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultItem {
    /// Document title, never empty.
    pub title: String,
    /// Absolute URL of the document.
    pub url: String,
    /// Short description.
    pub summary: Option<String>,
    /// Publish timestamp exactly as upstream reported it.
    pub public_updated_at: Option<String>,
    /// Upstream content identifier.
    pub content_id: Option<String>,
}

/// One upstream page before projection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPage {
    /// Items in upstream order.
    pub items: Vec<SearchResultItem>,
    /// Upstream-reported total match count.
    pub total: u64,
}

/// Projected result set returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultSet {
    /// Items ordered newest first.
    pub items: Vec<SearchResultItem>,
    /// Upstream-reported total match count.
    pub total: u64,
    /// Paging echoed back to the caller.
    pub paging: Paging,
}

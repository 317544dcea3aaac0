//! Deterministic ordering of upstream search results.
//!
//! Upstream ordering is only a hint, so every page is re-sorted by publish
//! timestamp, newest first. The sort is stable and items whose timestamp is
//! absent or unparsable rank below every dated item, keeping their upstream
//! relative order.

use chrono::{DateTime, Utc};

use super::search::{Paging, SearchPage, SearchResultItem, SearchResultSet};
use super::timestamp::parse_timestamp;

/// Order items newest first.
///
/// # Examples
/// ```
/// use gateway::domain::SearchResultItem;
/// use gateway::domain::projector::order_by_recency;
///
/// let item = |title: &str, ts: Option<&str>| SearchResultItem {
///     title: title.to_owned(),
///     url: format!("https://www.gov.uk/{title}"),
///     summary: None,
///     public_updated_at: ts.map(str::to_owned),
///     content_id: None,
/// };
/// let ordered = order_by_recency(vec![
///     item("old", Some("2020-01-01T00:00:00Z")),
///     item("undated", None),
///     item("new", Some("2021-01-01T00:00:00Z")),
/// ]);
/// let titles: Vec<_> = ordered.iter().map(|i| i.title.as_str()).collect();
/// assert_eq!(titles, ["new", "old", "undated"]);
/// ```
#[must_use]
pub fn order_by_recency(items: Vec<SearchResultItem>) -> Vec<SearchResultItem> {
    let mut keyed: Vec<(Option<DateTime<Utc>>, SearchResultItem)> = items
        .into_iter()
        .map(|item| {
            let key = item.public_updated_at.as_deref().and_then(parse_timestamp);
            (key, item)
        })
        .collect();
    // `None` compares below every `Some`, so reversing puts undated items last.
    keyed.sort_by(|(left, _), (right, _)| right.cmp(left));
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Project one upstream page into the public result set.
#[must_use]
pub fn project(page: SearchPage, paging: Paging) -> SearchResultSet {
    SearchResultSet {
        items: order_by_recency(page.items),
        total: page.total,
        paging,
    }
}

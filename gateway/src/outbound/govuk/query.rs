//! Upstream URL and query-string construction.
//!
//! ```text
//! GET {base}/api/search.json?q=..&start=..&count=..&order=-public_timestamp
//! GET {base}/api/content{path}
//! ```

use reqwest::Url;

use crate::domain::ports::ContentSourceError;
use crate::domain::search::{SearchQuery, TimestampRange};
use crate::domain::timestamp::format_filter_timestamp;
use crate::domain::{ContentId, ContentPath};

const SEARCH_PATH: &str = "api/search.json";
const CONTENT_PREFIX: &str = "api/content";
const NEWEST_FIRST: &str = "-public_timestamp";

/// Ensure the base URL ends with `/` so joins append rather than replace.
pub(super) fn normalize_base(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

/// Query parameters for a search page, absent filters omitted.
pub(super) fn search_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let paging = query.paging();
    let filters = query.filters();
    let mut params = vec![
        ("q", query.text().to_owned()),
        ("start", paging.offset().to_string()),
        ("count", paging.page_size().to_string()),
    ];
    if let Some(organisation) = &filters.organisation {
        params.push(("filter_organisations", organisation.clone()));
    }
    if let Some(format) = &filters.format {
        params.push(("filter_format", format.clone()));
    }
    if let Some(window) = timestamp_filter(&filters.public_timestamp) {
        params.push(("filter_public_timestamp", window));
    }
    params.push(("order", NEWEST_FIRST.to_owned()));
    params
}

/// Query parameters for the narrowed identifier search.
pub(super) fn content_id_params(id: &ContentId) -> Vec<(&'static str, String)> {
    vec![
        ("filter_content_id", id.as_str().to_owned()),
        ("count", "1".to_owned()),
    ]
}

/// Combined publish-timestamp filter expression.
pub(super) fn timestamp_filter(range: &TimestampRange) -> Option<String> {
    match (range.from.as_ref(), range.to.as_ref()) {
        (None, None) => None,
        (Some(from), None) => Some(format!(">={}", format_filter_timestamp(from))),
        (None, Some(to)) => Some(format!("<={}", format_filter_timestamp(to))),
        (Some(from), Some(to)) => Some(format!(
            ">={},<={}",
            format_filter_timestamp(from),
            format_filter_timestamp(to)
        )),
    }
}

/// Search endpoint URL with the given parameters.
pub(super) fn search_url(
    base: &Url,
    params: &[(&'static str, String)],
) -> Result<Url, ContentSourceError> {
    let mut url = base
        .join(SEARCH_PATH)
        .map_err(|error| ContentSourceError::invalid_request(error.to_string()))?;
    url.query_pairs_mut()
        .extend_pairs(params.iter().map(|(key, value)| (*key, value.as_str())));
    Ok(url)
}

/// Content endpoint URL for a normalized path.
///
/// Each path segment is percent-encoded and dot segments are dropped, so a
/// caller path always stays below the content prefix.
pub(super) fn content_url(base: &Url, path: &ContentPath) -> Result<Url, ContentSourceError> {
    let mut url = base
        .join(CONTENT_PREFIX)
        .map_err(|error| ContentSourceError::invalid_request(error.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| ContentSourceError::invalid_request(format!("{base} cannot be a base URL")))?
        .extend(path.as_str().split('/').skip(1));
    Ok(url)
}

//! Resolution of upstream links against the public site.

use reqwest::Url;

use crate::domain::ContentPath;

/// Public site that upstream links are relative to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicSite {
    root: Url,
}

impl PublicSite {
    /// Site rooted at `root`.
    #[must_use]
    pub const fn new(root: Url) -> Self {
        Self { root }
    }

    /// Absolute `http(s)` URL for an upstream link or path.
    ///
    /// Relative links resolve against the site root; absolute `http(s)`
    /// links are kept. Blank links and other schemes yield `None`.
    #[must_use]
    pub fn absolute_url(&self, link: &str) -> Option<String> {
        let trimmed = link.trim();
        if trimmed.is_empty() {
            return None;
        }
        match Url::parse(trimmed) {
            Ok(url) if is_web(&url) => Some(url.into()),
            Ok(_) => None,
            Err(_) => self.root.join(trimmed).ok().map(Into::into),
        }
    }

    /// Content path addressed by an upstream link.
    #[must_use]
    pub fn content_path(&self, link: &str) -> Option<ContentPath> {
        match Url::parse(link.trim()) {
            Ok(url) if is_web(&url) => ContentPath::new(url.path()),
            Ok(_) => None,
            Err(_) => ContentPath::new(link.trim()),
        }
    }
}

fn is_web(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

#[cfg(test)]
mod tests {
    //! Regression coverage for link resolution.

    use super::*;
    use rstest::rstest;

    fn site() -> PublicSite {
        PublicSite::new(Url::parse("https://www.gov.uk").expect("url"))
    }

    #[rstest]
    #[case::rooted("/guidance/x", Some("https://www.gov.uk/guidance/x"))]
    #[case::bare("guidance/x", Some("https://www.gov.uk/guidance/x"))]
    #[case::absolute("https://example.org/a", Some("https://example.org/a"))]
    #[case::blank("  ", None)]
    #[case::other_scheme("mailto:someone@example.org", None)]
    fn resolves_links(#[case] link: &str, #[case] expected: Option<&str>) {
        assert_eq!(site().absolute_url(link).as_deref(), expected);
    }

    #[rstest]
    #[case::rooted("/guidance/x", Some("/guidance/x"))]
    #[case::absolute("https://www.gov.uk/guidance/x", Some("/guidance/x"))]
    #[case::blank("", None)]
    fn extracts_content_paths(#[case] link: &str, #[case] expected: Option<&str>) {
        let path = site().content_path(link);
        assert_eq!(path.as_ref().map(ContentPath::as_str), expected);
    }
}

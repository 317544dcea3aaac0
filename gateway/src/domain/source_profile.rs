//! Fixed descriptor of the upstream source and the provenance stamped on
//! every content response.

/// Descriptor for the upstream source served by this gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceProfile {
    /// Publishing organisation slug.
    pub organisation: String,
    /// Human-readable source name.
    pub source: String,
    /// Base URL of the upstream API.
    pub base_url: String,
    /// Where the upstream API is documented.
    pub documentation_url: String,
    /// Licence attribution line.
    pub attribution: String,
    /// Legal disclaimer line.
    pub disclaimer: String,
    /// Public site root used when no content URL is known.
    pub site_root: String,
}

impl SourceProfile {
    /// Profile for Charity Commission guidance published on GOV.UK.
    #[must_use]
    pub fn charity_commission() -> Self {
        Self {
            organisation: "charity-commission".to_owned(),
            source: "GOV.UK Content API".to_owned(),
            base_url: "https://www.gov.uk/api".to_owned(),
            documentation_url: "https://www.gov.uk/api".to_owned(),
            attribution: "Source: GOV.UK, Charity Commission guidance, OGL v3.0".to_owned(),
            disclaimer: "This guidance is not legal advice.".to_owned(),
            site_root: "https://www.gov.uk/".to_owned(),
        }
    }

    /// Replace the public site root.
    #[must_use]
    pub fn with_site_root(mut self, site_root: impl Into<String>) -> Self {
        self.site_root = site_root.into();
        self
    }
}

impl Default for SourceProfile {
    fn default() -> Self {
        Self::charity_commission()
    }
}

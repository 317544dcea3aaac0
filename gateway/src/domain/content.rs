//! Content lookup keys, upstream content items and the public envelope.

use serde_json::{Map, Value};

/// Content path normalized to begin with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPath(String);

impl ContentPath {
    /// Normalize a caller-supplied path. Blank input yields `None`.
    ///
    /// # Examples
    /// ```
    /// use gateway::domain::ContentPath;
    ///
    /// let path = ContentPath::new("guidance/trustees").expect("non-blank");
    /// assert_eq!(path.as_str(), "/guidance/trustees");
    /// assert!(ContentPath::new("  ").is_none());
    /// ```
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        if raw.starts_with('/') {
            Some(Self(raw.to_owned()))
        } else {
            Some(Self(format!("/{raw}")))
        }
    }

    /// Borrow the normalized path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Opaque upstream content identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentId(String);

impl ContentId {
    /// Accept a caller-supplied identifier. Blank input yields `None`.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.to_owned()))
        }
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Which identity a caller asked to resolve.
///
/// The inner value is `None` when the caller supplied nothing usable; such a
/// lookup is treated as a miss without contacting upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentLookupKey {
    /// Resolve directly by path.
    Path(Option<ContentPath>),
    /// Resolve by identifier through a narrowed search.
    Id(Option<ContentId>),
}

impl ContentLookupKey {
    /// Build a path key from raw input.
    #[must_use]
    pub fn path(raw: Option<&str>) -> Self {
        Self::Path(raw.and_then(ContentPath::new))
    }

    /// Build an identifier key from raw input.
    #[must_use]
    pub fn id(raw: Option<&str>) -> Self {
        Self::Id(raw.and_then(ContentId::new))
    }

    /// Message used when strict mode reports a miss.
    #[must_use]
    pub const fn not_found_message(&self) -> &'static str {
        match self {
            Self::Path(_) => "Requested path not found or redirected",
            Self::Id(_) => "Requested content not found or redirected",
        }
    }

    /// Whether strict mode turns a miss for this key into an error.
    ///
    /// A blank identifier still yields a placeholder; a blank path does not.
    #[must_use]
    pub const fn reports_strict_miss(&self) -> bool {
        !matches!(self, Self::Id(None))
    }

    /// The identifier requested, for identifier lookups.
    #[must_use]
    pub fn requested_id(&self) -> Option<&ContentId> {
        match self {
            Self::Id(id) => id.as_ref(),
            Self::Path(_) => None,
        }
    }
}

/// Per-request content options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentOptions {
    /// Attach the enrichment block to the envelope.
    pub include_enrichment: bool,
    /// Report a miss as an error instead of a placeholder.
    pub strict_upstream_errors: bool,
}

/// A content lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    /// What to resolve.
    pub key: ContentLookupKey,
    /// How to shape the response.
    pub options: ContentOptions,
}

/// Content document resolved from upstream. Never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    /// Absolute URL of the canonical path.
    pub url: Option<String>,
    /// Publish timestamp as upstream reported it.
    pub public_updated_at: Option<String>,
    /// Upstream content identifier.
    pub content_id: Option<String>,
    /// Raw upstream document.
    pub document: Value,
}

impl ContentItem {
    /// The raw document when it is a JSON object, otherwise an empty object.
    #[must_use]
    pub fn document_object(&self) -> Value {
        match &self.document {
            Value::Object(_) => self.document.clone(),
            _ => Value::Object(Map::new()),
        }
    }
}

/// Marker block attached when enrichment is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    /// Always true; lets clients tell enrichment apart from upstream fields.
    pub is_enrichment: bool,
    /// Free-form notes about the enrichment.
    pub notes: String,
}

impl Enrichment {
    /// Enrichment block for this gateway; no enrichment source is wired yet.
    #[must_use]
    pub fn stub() -> Self {
        Self {
            is_enrichment: true,
            notes: "stubbed enrichment".to_owned(),
        }
    }
}

/// Public content response with provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentEnvelope {
    /// Upstream document object, or `{}`.
    pub content: Value,
    /// Absolute URL of the content, or the site root for placeholders.
    pub url: String,
    /// Upstream publish timestamp, or the current time for placeholders.
    pub public_updated_at: String,
    /// Licence attribution line.
    pub attribution: String,
    /// Legal disclaimer line.
    pub disclaimer: String,
    /// Upstream or requested identifier, or the nil UUID.
    pub content_id: String,
    /// Present when enrichment was requested.
    pub enrichment: Option<Enrichment>,
}

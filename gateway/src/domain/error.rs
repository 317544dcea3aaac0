//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map each
//! [`ErrorCode`] onto a status code and render the `{code, error}` envelope.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable machine-readable error code describing the failure category.
///
/// The first five variants form the published taxonomy served by
/// `GET /tools/get_error_taxonomy`. `StaleCacheServed` and `ContentOutOfScope`
/// are reserved: no code path produces them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The upstream API was unreachable, throttled or failing after retries.
    UpstreamRateLimited,
    /// The requested content does not exist or has moved.
    NotFoundOrRedirected,
    /// A stale cached copy was served because the upstream failed.
    StaleCacheServed,
    /// The content exists but falls outside the guidance scope.
    ContentOutOfScope,
    /// The upstream API rejected the parameters derived from the request.
    UpstreamParameterError,
    /// The inbound request is malformed or fails validation.
    InvalidRequest,
    /// An unexpected failure inside the gateway.
    InternalError,
}

impl ErrorCode {
    /// Codes advertised to clients through the error taxonomy endpoint.
    pub const TAXONOMY: [Self; 5] = [
        Self::UpstreamRateLimited,
        Self::NotFoundOrRedirected,
        Self::StaleCacheServed,
        Self::ContentOutOfScope,
        Self::UpstreamParameterError,
    ];

    /// Wire representation of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UpstreamRateLimited => "UPSTREAM_RATE_LIMITED",
            Self::NotFoundOrRedirected => "NOT_FOUND_OR_REDIRECTED",
            Self::StaleCacheServed => "STALE_CACHE_SERVED",
            Self::ContentOutOfScope => "CONTENT_OUT_OF_SCOPE",
            Self::UpstreamParameterError => "UPSTREAM_PARAMETER_ERROR",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Human-readable description published in the taxonomy.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::UpstreamRateLimited => "GOV.UK API rate limit exceeded",
            Self::NotFoundOrRedirected => "Requested path not found or redirected",
            Self::StaleCacheServed => "Stale cache served due to upstream failure",
            Self::ContentOutOfScope => "Content is not part of Charity Commission guidance",
            Self::UpstreamParameterError => "Invalid parameters supplied to upstream GOV.UK API",
            Self::InvalidRequest => "Request body is missing required fields or is malformed",
            Self::InternalError => "Unexpected gateway failure",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain error payload rendered as `{"code": ..., "error": ...}`.
///
/// # Examples
/// ```
/// use gateway::domain::{Error, ErrorCode};
///
/// let err = Error::invalid_request("query is required");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.message(), "query is required");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = Error)]
pub struct DomainError {
    #[schema(example = "UPSTREAM_PARAMETER_ERROR")]
    code: ErrorCode,
    #[serde(rename = "error")]
    #[schema(example = "Invalid public_timestamp_from")]
    message: String,
}

impl DomainError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::UpstreamParameterError`].
    pub fn upstream_parameter(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamParameterError, message)
    }

    /// Convenience constructor for [`ErrorCode::UpstreamRateLimited`].
    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamRateLimited, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFoundOrRedirected`].
    pub fn not_found_or_redirected(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFoundOrRedirected, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for DomainError {}

/// Alias used by adapters.
pub type Error = DomainError;

//! Request-scoped correlation identifier.
//!
//! `CorrelationId` links one inbound request to every outbound upstream call
//! made while serving it. The identifier lives in task-local storage so the
//! outbound adapter can read it without threading it through every port.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`CorrelationId::scope`] when spawning new tasks so the active identifier
//! propagates.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

/// Header carrying the correlation identifier on inbound and outbound calls.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

task_local! {
    static CORRELATION_ID: CorrelationId;
}

/// Opaque correlation token.
///
/// Caller-supplied values are kept verbatim so they can be echoed unchanged.
///
/// # Examples
/// ```
/// use gateway::domain::CorrelationId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id = CorrelationId::from_header("abc-123").expect("non-blank");
/// let observed = CorrelationId::scope(id.clone(), async { CorrelationId::current() }).await;
/// assert_eq!(observed, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Generate a new random identifier as 32 lowercase hex characters.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Accept a caller-supplied header value unless it is blank.
    #[must_use]
    pub fn from_header(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.to_owned()))
        }
    }

    /// Accept raw header bytes unless they are blank.
    ///
    /// Bytes that are not valid UTF-8 are decoded lossily; callers echoing
    /// the header should keep the original bytes.
    #[must_use]
    pub fn from_header_bytes(raw: &[u8]) -> Option<Self> {
        Self::from_header(&String::from_utf8_lossy(raw))
    }

    /// Returns the identifier in scope for the current task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CORRELATION_ID.try_with(Clone::clone).ok()
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Execute `fut` with `id` as the current correlation identifier.
    pub async fn scope<Fut>(id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CORRELATION_ID.scope(id, fut).await
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

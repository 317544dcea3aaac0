//! Transport decorator forwarding the request correlation identifier.

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use tracing::warn;

use super::transport::{TransportError, UpstreamRequest, UpstreamResponse, UpstreamTransport};
use crate::domain::{CORRELATION_ID_HEADER, CorrelationId};

/// Adds `X-Correlation-ID` to every outbound request made while a
/// [`CorrelationId`] is in scope.
pub struct CorrelatingTransport<T> {
    inner: T,
}

impl<T> CorrelatingTransport<T> {
    /// Wrap `inner`.
    pub const fn new(inner: T) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<T> UpstreamTransport for CorrelatingTransport<T>
where
    T: UpstreamTransport,
{
    async fn execute(
        &self,
        mut request: UpstreamRequest,
    ) -> Result<UpstreamResponse, TransportError> {
        if let Some(id) = CorrelationId::current() {
            match HeaderValue::from_str(id.as_str()) {
                Ok(value) => {
                    request
                        .headers
                        .insert(HeaderName::from_static(CORRELATION_ID_HEADER), value);
                }
                Err(error) => {
                    warn!(%error, correlation_id = %id, "correlation id is not a valid header value");
                }
            }
        }
        self.inner.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for correlation header forwarding.

    use super::*;
    use crate::outbound::govuk::transport::MockUpstreamTransport;
    use reqwest::{StatusCode, Url};

    fn ok_response() -> UpstreamResponse {
        UpstreamResponse {
            status: StatusCode::OK,
            body: b"{}".to_vec(),
        }
    }

    fn request() -> UpstreamRequest {
        UpstreamRequest::get(Url::parse("https://www.gov.uk/api/search.json").expect("url"))
    }

    #[tokio::test]
    async fn forwards_scoped_identifier() {
        let mut inner = MockUpstreamTransport::new();
        inner
            .expect_execute()
            .withf(|req| {
                req.headers
                    .get(CORRELATION_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    == Some("req-42")
            })
            .times(1)
            .returning(|_| Ok(ok_response()));
        let transport = CorrelatingTransport::new(inner);

        let id = CorrelationId::from_header("req-42").expect("non-blank");
        let response = CorrelationId::scope(id, transport.execute(request()))
            .await
            .expect("call succeeds");
        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn leaves_headers_alone_out_of_scope() {
        let mut inner = MockUpstreamTransport::new();
        inner
            .expect_execute()
            .withf(|req| !req.headers.contains_key(CORRELATION_ID_HEADER))
            .times(1)
            .returning(|_| Ok(ok_response()));
        let transport = CorrelatingTransport::new(inner);

        transport.execute(request()).await.expect("call succeeds");
    }

    #[tokio::test]
    async fn skips_identifiers_that_are_not_header_safe() {
        let mut inner = MockUpstreamTransport::new();
        inner
            .expect_execute()
            .withf(|req| !req.headers.contains_key(CORRELATION_ID_HEADER))
            .times(1)
            .returning(|_| Ok(ok_response()));
        let transport = CorrelatingTransport::new(inner);

        let id = CorrelationId::from_header("bad\nvalue").expect("non-blank");
        CorrelationId::scope(id, transport.execute(request()))
            .await
            .expect("call succeeds");
    }
}

//! The single outbound call path to the upstream API.
//!
//! Every upstream request goes through an [`UpstreamTransport`]. Cross-cutting
//! behaviour (correlation headers, retries) is layered on as decorators that
//! implement the same trait, so the adapter issuing requests stays unaware of
//! them.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, Url};

/// Outbound `GET` request.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    /// Fully-qualified request URL including query string.
    pub url: Url,
    /// Extra headers added by decorators.
    pub headers: HeaderMap,
}

impl UpstreamRequest {
    /// Build a `GET` request for `url` with no extra headers.
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self {
            url,
            headers: HeaderMap::new(),
        }
    }
}

/// Fully-buffered upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response body bytes.
    pub body: Vec<u8>,
}

/// Failures that never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request exceeded the client timeout.
    #[error("upstream request timed out: {message}")]
    Timeout {
        /// Underlying client message.
        message: String,
    },
    /// Connection, TLS or body read failure.
    #[error("upstream connection failed: {message}")]
    Connection {
        /// Underlying client message.
        message: String,
    },
}

/// One outbound HTTP exchange.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    /// Execute `request` and buffer the response.
    async fn execute(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError>;
}

#[async_trait]
impl<T> UpstreamTransport for Arc<T>
where
    T: UpstreamTransport + ?Sized,
{
    async fn execute(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        (**self).execute(request).await
    }
}

/// Reqwest-backed transport with a per-request timeout.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests abort after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UpstreamTransport for ReqwestTransport {
    async fn execute(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        let response = self
            .client
            .get(request.url)
            .headers(request.headers)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(UpstreamResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout {
            message: error.to_string(),
        }
    } else {
        TransportError::Connection {
            message: error.to_string(),
        }
    }
}

//! Outbound adapter for the GOV.UK search and content APIs.
//!
//! The call path is a stack of [`UpstreamTransport`] layers:
//!
//! ```text
//! GovUkContentApi -> RetryingTransport -> CorrelatingTransport -> ReqwestTransport
//! ```

mod content_api;
mod correlation;
mod dto;
mod query;
mod retry;
mod site;
mod transport;

pub use content_api::GovUkContentApi;
pub use correlation::CorrelatingTransport;
pub use retry::RetryingTransport;
pub use site::PublicSite;
pub use transport::{
    ReqwestTransport, TransportError, UpstreamRequest, UpstreamResponse, UpstreamTransport,
};

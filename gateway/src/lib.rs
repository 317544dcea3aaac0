//! Guidance gateway library.
//!
//! An HTTP gateway in front of the GOV.UK search and content APIs, scoped to
//! Charity Commission guidance. The crate is organised hexagonally:
//!
//! - [`domain`]: framework-free types, use cases, ports and policies.
//! - [`inbound`]: actix-web handlers and middleware.
//! - [`outbound`]: the upstream HTTP adapter and Prometheus exporters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;

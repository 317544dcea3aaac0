//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **govuk**: HTTP adapter for the GOV.UK search and content APIs
//! - **metrics**: Prometheus-backed metrics exporters
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod govuk;
pub mod metrics;

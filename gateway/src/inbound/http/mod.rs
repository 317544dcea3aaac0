//! HTTP inbound adapter exposing the tool endpoints.
//!
//! [`configure`] registers every route together with the JSON extractor
//! settings; [`Correlation`] and [`RequestObserver`] are the middleware the
//! server wraps around it.

pub mod correlation;
pub mod error;
pub mod health;
pub mod metrics;
pub mod observe;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tools;

pub use correlation::Correlation;
pub use error::ApiResult;
pub use observe::RequestObserver;

use actix_web::web;
use tracing::debug;

use crate::domain::Error;

/// Register the gateway routes and JSON extractor configuration.
///
/// Malformed or mistyped JSON bodies are answered with
/// `400 INVALID_REQUEST`.
///
/// # Examples
/// ```
/// use actix_web::App;
///
/// let app = App::new().configure(gateway::inbound::http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json = web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected request body");
        Error::invalid_request(format!("Invalid request body: {err}")).into()
    });

    cfg.app_data(json)
        .service(tools::search_guidance)
        .service(tools::get_content_by_path)
        .service(tools::get_content_by_id)
        .service(tools::get_source_metadata)
        .service(tools::get_error_taxonomy)
        .service(tools::force_refresh)
        .service(health::healthz)
        .service(metrics::metrics);
}

//! Server construction and middleware wiring.

mod config;

pub use config::GatewaySettings;

use std::io;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use mockable::DefaultClock;
use prometheus::Registry;
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use gateway::ApiDoc;
use gateway::domain::{GuidanceService, RequestTelemetry, SourceProfile, TokioSleeper};
use gateway::inbound::http::state::HttpState;
use gateway::inbound::http::{Correlation, RequestObserver, configure};
use gateway::outbound::govuk::{
    CorrelatingTransport, GovUkContentApi, PublicSite, ReqwestTransport, RetryingTransport,
};
use gateway::outbound::metrics::PrometheusUpstreamCallMetrics;

/// Build the Prometheus middleware serving `/metrics/prom` from `registry`.
fn make_metrics(registry: Registry) -> io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("gateway")
        .endpoint("/metrics/prom")
        .registry(registry)
        .build()
        .map_err(|e| io::Error::other(format!("configure Prometheus metrics: {e}")))
}

/// Wire the upstream adapter, use cases and handler state.
fn build_http_state(
    settings: &GatewaySettings,
    registry: &Registry,
    telemetry: Arc<RequestTelemetry>,
) -> io::Result<HttpState> {
    let upstream_base = settings.upstream_base_url().map_err(io::Error::other)?;
    let public_base = settings.public_base_url().map_err(io::Error::other)?;
    let upstream_metrics = PrometheusUpstreamCallMetrics::new(registry)
        .map_err(|e| io::Error::other(format!("upstream metrics registration failed: {e}")))?;
    let client = ReqwestTransport::new(settings.upstream_timeout())
        .map_err(|e| io::Error::other(format!("build upstream client: {e}")))?;

    let transport = RetryingTransport::new(
        CorrelatingTransport::new(client),
        settings.retry_policy(),
        Arc::new(TokioSleeper),
        Arc::new(upstream_metrics),
    );
    let profile =
        Arc::new(SourceProfile::charity_commission().with_site_root(public_base.as_str()));
    let source = GovUkContentApi::new(transport, upstream_base, PublicSite::new(public_base));
    let guidance = GuidanceService::new(
        Arc::new(source),
        Arc::new(DefaultClock),
        Arc::clone(&profile),
    );
    Ok(HttpState::new(Arc::new(guidance), profile, telemetry))
}

/// Construct the HTTP server from `settings`.
///
/// # Errors
/// Propagates [`std::io::Error`] when a setting is invalid, metric
/// registration fails, or binding the socket fails.
pub fn create_server(settings: &GatewaySettings) -> io::Result<Server> {
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let registry = Registry::new();
    let telemetry = Arc::new(RequestTelemetry::new());
    let http_state = web::Data::new(build_http_state(
        settings,
        &registry,
        Arc::clone(&telemetry),
    )?);
    let prometheus = make_metrics(registry)?;

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(http_state.clone())
            .configure(configure);

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );

        // Outermost last: the observer sees the status Prometheus serves.
        app.wrap(prometheus.clone())
            .wrap(RequestObserver::new(Arc::clone(&telemetry)))
            .wrap(Correlation)
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "gateway listening");
    Ok(server)
}

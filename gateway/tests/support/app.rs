//! Gateway app assembly shared by integration tests.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use actix_web_prom::PrometheusMetricsBuilder;
use chrono::{DateTime, Local, TimeZone, Utc};
use gateway::domain::ports::ContentSource;
use gateway::domain::{GuidanceService, RequestTelemetry, SourceProfile};
use gateway::inbound::http::state::HttpState;
use gateway::inbound::http::{Correlation, RequestObserver, configure};
use mockable::Clock;
use prometheus::Registry;

/// Clock pinned to one instant so placeholder timestamps are predictable.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Instant returned by [`FixedClock`] in these tests.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Initialise the gateway with the production middleware stack over
/// `source`, returning the service and its telemetry context.
pub async fn init_gateway(
    source: Arc<dyn ContentSource>,
) -> (
    impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    Arc<RequestTelemetry>,
) {
    let profile = Arc::new(SourceProfile::charity_commission());
    let telemetry = Arc::new(RequestTelemetry::new());
    let guidance = GuidanceService::new(
        source,
        Arc::new(FixedClock(fixed_now())),
        Arc::clone(&profile),
    );
    let state = HttpState::new(Arc::new(guidance), profile, Arc::clone(&telemetry));
    let prometheus = PrometheusMetricsBuilder::new("gateway")
        .endpoint("/metrics/prom")
        .registry(Registry::new())
        .build()
        .expect("prometheus middleware builds");
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure)
            .wrap(prometheus)
            .wrap(RequestObserver::new(Arc::clone(&telemetry)))
            .wrap(Correlation),
    )
    .await;
    (app, telemetry)
}

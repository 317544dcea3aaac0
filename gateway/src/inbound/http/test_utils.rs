//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use super::configure;
use super::state::HttpState;
use crate::domain::ports::MockGuidanceQuery;
use crate::domain::{RequestTelemetry, SourceProfile};

/// Handler state backed by `guidance` and the default source profile.
pub fn state_with(guidance: MockGuidanceQuery) -> HttpState {
    HttpState::new(
        Arc::new(guidance),
        Arc::new(SourceProfile::default()),
        Arc::new(RequestTelemetry::new()),
    )
}

/// App exposing every gateway route over `state`, without middleware.
pub fn tools_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure)
}

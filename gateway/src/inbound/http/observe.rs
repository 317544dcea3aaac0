//! Middleware recording every completed request into [`RequestTelemetry`].
//!
//! Runs inside [`super::Correlation`] so the completion log line carries the
//! request span.

use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::info;

use crate::domain::{RequestSample, RequestTelemetry};

/// Telemetry middleware factory.
#[derive(Clone)]
pub struct RequestObserver {
    telemetry: Arc<RequestTelemetry>,
}

impl RequestObserver {
    /// Record into `telemetry`.
    #[must_use]
    pub const fn new(telemetry: Arc<RequestTelemetry>) -> Self {
        Self { telemetry }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestObserver
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestObserverMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestObserverMiddleware {
            service,
            telemetry: Arc::clone(&self.telemetry),
        }))
    }
}

/// Service wrapper produced by [`RequestObserver`].
pub struct RequestObserverMiddleware<S> {
    service: S,
    telemetry: Arc<RequestTelemetry>,
}

impl<S, B> Service<ServiceRequest> for RequestObserverMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.path().to_owned();
        let telemetry = Arc::clone(&self.telemetry);
        let started = Instant::now();
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let status = match &result {
                Ok(res) => res.status(),
                Err(error) => error.as_response_error().status_code(),
            };
            let sample = RequestSample {
                path,
                status: status.as_u16(),
                elapsed: started.elapsed(),
            };
            telemetry.record(&sample);
            info!(
                status = sample.status,
                elapsed_ms = u64::try_from(sample.elapsed.as_millis()).unwrap_or(u64::MAX),
                "request completed"
            );
            result
        })
    }
}

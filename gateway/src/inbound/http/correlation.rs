//! Middleware assigning a correlation identifier to every request.
//!
//! The identifier comes from the inbound `X-Correlation-ID` header when it is
//! present and non-blank, otherwise a fresh one is generated. It is scoped in
//! task-local storage for the lifetime of the request and attached to a
//! `request` tracing span. An inbound header is echoed on the response byte
//! for byte.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, error, info_span};

use crate::domain::{CORRELATION_ID_HEADER, CorrelationId};

/// Correlation middleware factory.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use gateway::inbound::http::Correlation;
///
/// let app = App::new().wrap(Correlation);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Correlation;

impl<S, B> Transform<S, ServiceRequest> for Correlation
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CorrelationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorrelationMiddleware { service }))
    }
}

/// Service wrapper produced by [`Correlation`].
pub struct CorrelationMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CorrelationMiddleware<S>
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
        let inbound = req.headers().get(CORRELATION_ID_HEADER).and_then(|value| {
            CorrelationId::from_header_bytes(value.as_bytes()).map(|id| (id, value.clone()))
        });
        let (correlation_id, header_value) = inbound.map_or_else(
            || {
                let id = CorrelationId::generate();
                let value = HeaderValue::from_str(id.as_str());
                (id, value)
            },
            |(id, raw)| (id, Ok(raw)),
        );
        let span = info_span!(
            "request",
            correlation_id = %correlation_id,
            method = %req.method(),
            path = %req.path(),
        );
        let fut = self.service.call(req);

        Box::pin(
            CorrelationId::scope(correlation_id, async move {
                let mut res = fut.await?;
                match header_value {
                    Ok(value) => {
                        res.response_mut()
                            .headers_mut()
                            .insert(HeaderName::from_static(CORRELATION_ID_HEADER), value);
                    }
                    Err(error) => {
                        error!(%error, "failed to encode correlation identifier header");
                    }
                }
                Ok(res)
            })
            .instrument(span),
        )
    }
}

use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{header::{HeaderName, HeaderValue, RETRY_AFTER}, StatusCode},
    Error,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{
    handlers::json_error::json_error,
    limiter::rate_limiter::RateHybridLimiterStore,
    utils::get_client_ip::get_client_ip,
};

/// Rejects clients that exceed their per-IP budget with 429.
#[derive(Clone)]
pub struct RateLimitMiddleware {
    store: RateHybridLimiterStore,
    trust_x_forwarded_for: bool,
}

impl RateLimitMiddleware {
    pub fn new(store: RateHybridLimiterStore, trust_x_forwarded_for: bool) -> Self {
        RateLimitMiddleware { store, trust_x_forwarded_for }
    }
}

impl<S> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            store: self.store.clone(),
            trust_x_forwarded_for: self.trust_x_forwarded_for,
        })
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    store: RateHybridLimiterStore,
    trust_x_forwarded_for: bool,
}

impl<S> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let client_ip = get_client_ip(req.request(), self.trust_x_forwarded_for);
        let decision = self.store.check(&client_ip);

        Box::pin(async move {
            if !decision.allowed {
                let retry_after = decision.retry_after.unwrap_or(1);
                tracing::warn!(%client_ip, retry_after, "Rate limit exceeded");

                let mut response = json_error(
                    StatusCode::TOO_MANY_REQUESTS,
                    "Too many requests",
                    &format!("Retry after {retry_after} seconds"),
                );
                response.headers_mut().insert(RETRY_AFTER, HeaderValue::from(retry_after));
                return Ok(req.into_response(response));
            }

            let mut res = service.call(req).await?;
            res.headers_mut().insert(
                HeaderName::from_static("x-ratelimit-limit"),
                HeaderValue::from(decision.limit),
            );
            res.headers_mut().insert(
                HeaderName::from_static("x-ratelimit-remaining"),
                HeaderValue::from(decision.remaining.floor().max(0.0) as u64),
            );
            Ok(res)
        })
    }
}

use actix_web::web;

use crate::{handlers::auth, middlewares::rate_limit::RateLimitMiddleware};

pub fn config_routes(cfg: &mut web::ServiceConfig, limiter: RateLimitMiddleware) {
    cfg.service(
        web::scope("/auth")
            .wrap(limiter)
            .service(auth::sign_up)
            .service(auth::sign_in)
            .service(auth::refresh_token)
            .service(auth::sign_out)
    );
}

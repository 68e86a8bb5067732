use actix_web::web;

use crate::{handlers::chat, middlewares::rate_limit::RateLimitMiddleware};

pub fn config_routes(cfg: &mut web::ServiceConfig, limiter: RateLimitMiddleware) {
    cfg.service(
        web::scope("/chat")
            .wrap(limiter)
            .service(
                web::resource("")
                    .route(web::get().to(chat::greeting))
            )
            .service(
                web::resource("/messages")
                    .route(web::post().to(chat::send_message))
            )
    );
}

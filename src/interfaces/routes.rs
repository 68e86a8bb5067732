use actix_web::web;

use crate::{handlers::home::api_banner, middlewares::rate_limit::RateLimitMiddleware};

mod admin;
mod auth;
mod blog;
mod chat;
mod json_error;
mod pages;
mod projects;
mod uploads;
mod users;

/// Mounts the JSON API under `/api/v1`, the uploaded file route and the
/// browser pages. `limiter` guards the credential and chat endpoints.
pub fn configure_routes(cfg: &mut web::ServiceConfig, limiter: RateLimitMiddleware) {
    let chat_limiter = limiter.clone();

    cfg.configure(json_error::config_routes);

    cfg.service(
        web::scope("/api/v1")
            .service(web::resource("").route(web::get().to(api_banner)))
            .configure(|cfg| auth::config_routes(cfg, limiter))
            .configure(users::config_routes)
            .configure(blog::config_routes)
            .configure(projects::config_routes)
            .configure(uploads::config_routes)
            .configure(|cfg| chat::config_routes(cfg, chat_limiter))
            .configure(admin::config_routes)
    );

    cfg.configure(uploads::config_public_routes);
    cfg.configure(pages::config_routes);
}

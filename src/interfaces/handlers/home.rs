use actix_web::{web, HttpResponse, Responder};

use crate::AppState;

pub async fn api_banner(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Welcome to {}!", state.config.name),
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "owner": state.config.site_owner,
        "pages": ["/", "/blog", "/projects", "/project-demo", "/auth", "/admin"]
    }))
}

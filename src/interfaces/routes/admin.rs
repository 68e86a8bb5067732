use actix_web::web;

use crate::handlers::{dashboard, system::health_check, tasks};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(health_check)
            .service(
                web::resource("/dashboard")
                    .route(web::get().to(dashboard::get_dashboard))
            )
            .service(
                web::resource("/tasks")
                    .route(web::get().to(tasks::list_tasks))
                    .route(web::post().to(tasks::create_task))
            )
            .service(
                web::resource("/tasks/{task_id}")
                    .route(web::patch().to(tasks::update_task_status))
                    .route(web::delete().to(tasks::delete_task))
            )
    );
}

use actix_web::web;

use crate::handlers::pages;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::landing))
        .route("/auth", web::get().to(pages::auth_page))
        .route("/admin", web::get().to(pages::admin_page))
        .route("/admin/tasks/new", web::get().to(pages::new_task_page))
        .route("/blog", web::get().to(pages::blog_list_page))
        // Registered before `/blog/{slug}` so "create" is never read as a slug.
        .route("/blog/create", web::get().to(pages::blog_create_page))
        .route("/blog/{slug}", web::get().to(pages::blog_post_page))
        .route("/blog/{slug}/edit", web::get().to(pages::blog_edit_page))
        .route("/projects", web::get().to(pages::projects_page))
        .route("/projects/create", web::get().to(pages::project_create_page))
        .route("/project-demo", web::get().to(pages::project_demo_page));
}

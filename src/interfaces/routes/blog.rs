use actix_web::web;

use crate::handlers::{blog_posts, categories};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/blog")
            .service(
                web::resource("/posts")
                    .route(web::post().to(blog_posts::create_blog_post))
                    .route(web::get().to(blog_posts::get_all_blog_posts))
            )
            .service(
                web::resource("/posts/{slug}")
                    .route(web::get().to(blog_posts::get_blog_post_by_slug))
                    .route(web::patch().to(blog_posts::update_blog_post))
                    .route(web::delete().to(blog_posts::delete_blog_post))
            )
            .service(
                web::resource("/categories")
                    .route(web::get().to(categories::list_categories))
                    .route(web::post().to(categories::create_category))
            )
    );
}

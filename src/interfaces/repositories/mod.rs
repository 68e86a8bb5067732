pub mod blog_post;
pub mod category;
pub mod post_view;
pub mod project;
pub mod sqlx_repo;
pub mod storage;
pub mod task;
pub mod token;
pub mod user;

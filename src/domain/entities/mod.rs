pub mod blog_post;
pub mod category;
pub mod chat;
pub mod dashboard;
pub mod image;
pub mod option_fields;
pub mod pages;
pub mod post_view;
pub mod project;
pub mod task;
pub mod token;
pub mod user;

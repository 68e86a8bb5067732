pub mod auth;
pub mod blog_posts;
pub mod categories;
pub mod chat;
pub mod dashboard;
pub mod home;
pub mod pages;
pub mod projects;
pub mod system;
pub mod tasks;
pub mod uploads;
pub mod users;
pub mod json_error;

pub mod auth;
pub mod blog;
pub mod chat;
pub mod dashboard;
pub mod extractors;
pub mod images;
pub mod pages;
pub mod projects;
pub mod tasks;

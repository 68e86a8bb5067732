#![allow(dead_code)]

use chrono::Utc;
use uuid::Uuid;

use portfolio_site::{
    auth::{jwt::JwtService, password::hash_password},
    entities::{
        blog_post::BlogPost,
        project::Project,
        task::{Task, TaskPriority, TaskStatus},
        user::User,
    },
    repositories::token::TokenServiceRepository,
    settings::AppConfig,
};

pub const VALID_PASSWORD: &str = "Vx9!qTz#Lm2pRw";

pub fn user(email: &str, is_admin: bool) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password_hash: hash_password(VALID_PASSWORD).expect("Failed to hash password"),
        is_admin,
        created_at: now,
        updated_at: now,
    }
}

pub fn admin_user() -> User {
    user("admin@example.com", true)
}

pub fn regular_user() -> User {
    user("reader@example.com", false)
}

pub fn access_token(config: &AppConfig, user: &User) -> String {
    JwtService::new(config).create_jwt(user).expect("Failed to create access token")
}

pub fn refresh_token(config: &AppConfig, user: &User) -> String {
    JwtService::new(config).create_refresh_jwt(&user.id).expect("Failed to create refresh token")
}

pub fn blog_post(title: &str, slug: &str) -> BlogPost {
    let now = Utc::now();
    BlogPost {
        id: Uuid::new_v4(),
        title: title.to_string(),
        slug: slug.to_string(),
        description: "A short description".to_string(),
        content: "# Heading\n\nBody with <script>alert(1)</script> text.".to_string(),
        category_id: None,
        category_name: None,
        category_slug: None,
        author_id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
    }
}

pub fn task(title: &str, created_by: Uuid) -> Task {
    Task {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        priority: TaskPriority::Medium,
        status: TaskStatus::Pending,
        created_by,
        created_at: Utc::now(),
    }
}

pub fn project(title: &str, created_by: Uuid) -> Project {
    Project {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: "A thing I built".to_string(),
        github_url: Some("https://github.com/example/thing".to_string()),
        demo_url: None,
        image_url: None,
        tech_stack: vec!["Rust".to_string(), "Postgres".to_string()],
        created_by,
        created_at: Utc::now(),
    }
}

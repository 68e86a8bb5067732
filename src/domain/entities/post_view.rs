use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct PostViewInsert {
    pub post_slug: String,
    pub ip_address: String,
    pub viewed_at: DateTime<Utc>,
}

impl PostViewInsert {
    pub fn new(post_slug: &str, ip_address: &str) -> Self {
        Self {
            post_slug: post_slug.to_string(),
            ip_address: ip_address.to_string(),
            viewed_at: Utc::now(),
        }
    }
}

/// Views grouped by post.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, PartialEq)]
pub struct PostViewCount {
    pub post_slug: String,
    pub view_count: i64,
}

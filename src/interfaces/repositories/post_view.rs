use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::post_view::{PostViewCount, PostViewInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxPostViewRepo,
};

#[async_trait]
pub trait PostViewRepository: Send + Sync {
    async fn record_view(&self, view: &PostViewInsert) -> Result<(), AppError>;
    async fn count_views(&self, post_slug: &str) -> Result<i64, AppError>;
    async fn views_per_post(&self) -> Result<Vec<PostViewCount>, AppError>;
}

impl SqlxPostViewRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxPostViewRepo { pool }
    }
}

#[async_trait]
impl PostViewRepository for SqlxPostViewRepo {
    async fn record_view(&self, view: &PostViewInsert) -> Result<(), AppError> {
        sqlx::query("INSERT INTO post_views (post_slug, ip_address, viewed_at) VALUES ($1, $2, $3)")
            .bind(&view.post_slug)
            .bind(&view.ip_address)
            .bind(view.viewed_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count_views(&self, post_slug: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM post_views WHERE post_slug = $1")
            .bind(post_slug)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn views_per_post(&self) -> Result<Vec<PostViewCount>, AppError> {
        let counts = sqlx::query_as::<_, PostViewCount>(
            "SELECT post_slug, COUNT(*) AS view_count FROM post_views GROUP BY post_slug",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }
}

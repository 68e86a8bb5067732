use async_trait::async_trait;
use uuid::Uuid;
use sqlx::{self, PgPool, QueryBuilder};

use crate::{
    entities::blog_post::{BlogPost, BlogPostChanges, BlogPostInsert, BlogPostSummary},
    errors::AppError,
    repositories::sqlx_repo::SqlxBlogPostRepo,
};

const SELECT_POST: &str = r#"
    SELECT p.id, p.title, p.slug, p.description, p.content, p.category_id,
           c.name AS category_name, c.slug AS category_slug,
           p.author_id, p.created_at, p.updated_at
    FROM blog_posts p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

/// Helper to compute OFFSET safely from 1-based `page` and `per_page`.
fn page_offset(page: u32, per_page: u32) -> i64 {
    let page = page.saturating_sub(1);
    (page as i64) * (per_page as i64)
}

fn slug_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("blog_posts_slug_key") {
            return AppError::Conflict("Slug already exists".into());
        }
    }
    AppError::from(e)
}

#[async_trait]
pub trait BlogPostRepository: Sync + Send {
    async fn create_blog_post(&self, post: &BlogPostInsert) -> Result<Uuid, AppError>;
    async fn get_blog_post_by_slug(&self, slug: &str) -> Result<BlogPost, AppError>;
    async fn update_blog_post(&self, id: &Uuid, changes: &BlogPostChanges) -> Result<BlogPost, AppError>;
    async fn delete_blog_post(&self, slug: &str) -> Result<(), AppError>;
    async fn get_all_blog_posts(&self, page: u32, per_page: u32) -> Result<Vec<BlogPost>, AppError>;
    async fn count_blog_posts(&self) -> Result<i64, AppError>;
    async fn get_recent_blog_posts(&self, limit: u32) -> Result<Vec<BlogPost>, AppError>;
    async fn get_post_summaries(&self) -> Result<Vec<BlogPostSummary>, AppError>;
}

impl SqlxBlogPostRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxBlogPostRepo { pool }
    }
}

#[async_trait]
impl BlogPostRepository for SqlxBlogPostRepo {
    async fn create_blog_post(&self, post: &BlogPostInsert) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO blog_posts (
                title, slug, description, content, category_id, author_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.description)
        .bind(&post.content)
        .bind(post.category_id)
        .bind(post.author_id)
        .bind(post.created_at)
        .bind(post.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(slug_conflict)?;

        Ok(id)
    }

    async fn get_blog_post_by_slug(&self, slug: &str) -> Result<BlogPost, AppError> {
        let post = sqlx::query_as::<_, BlogPost>(&format!("{SELECT_POST} WHERE p.slug = $1"))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blog post '{slug}' not found")))?;

        Ok(post)
    }

    async fn update_blog_post(&self, id: &Uuid, changes: &BlogPostChanges) -> Result<BlogPost, AppError> {
        // post_views follow a slug change through ON UPDATE CASCADE
        let updated_post = sqlx::query_as::<_, BlogPost>(
            r#"
            WITH updated AS (
                UPDATE blog_posts SET
                    title = $1,
                    slug = $2,
                    description = $3,
                    content = $4,
                    category_id = $5,
                    updated_at = NOW()
                WHERE id = $6
                RETURNING *
            )
            SELECT u.id, u.title, u.slug, u.description, u.content, u.category_id,
                   c.name AS category_name, c.slug AS category_slug,
                   u.author_id, u.created_at, u.updated_at
            FROM updated u
            LEFT JOIN categories c ON c.id = u.category_id
            "#,
        )
        .bind(&changes.title)
        .bind(&changes.slug)
        .bind(&changes.description)
        .bind(&changes.content)
        .bind(changes.category_id)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(slug_conflict)?;

        Ok(updated_post)
    }

    async fn delete_blog_post(&self, slug: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE slug = $1")
            .bind(slug)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Blog post '{slug}' not found")));
        }

        Ok(())
    }

    async fn get_all_blog_posts(&self, page: u32, per_page: u32) -> Result<Vec<BlogPost>, AppError> {
        let limit = per_page as i64;
        let offset = page_offset(page, per_page);

        let mut builder = QueryBuilder::new(SELECT_POST);
        builder.push(" ORDER BY p.created_at DESC");
        builder.push(" LIMIT ").push_bind(limit);
        builder.push(" OFFSET ").push_bind(offset);

        let query = builder.build_query_as::<BlogPost>();
        let posts: Vec<BlogPost> = query.fetch_all(&self.pool).await?;

        Ok(posts)
    }

    async fn count_blog_posts(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blog_posts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn get_recent_blog_posts(&self, limit: u32) -> Result<Vec<BlogPost>, AppError> {
        let mut builder = QueryBuilder::new(SELECT_POST);
        builder.push(" ORDER BY p.created_at DESC LIMIT ");
        builder.push_bind(limit as i64);

        let query = builder.build_query_as::<BlogPost>();
        let posts: Vec<BlogPost> = query.fetch_all(&self.pool).await?;

        Ok(posts)
    }

    async fn get_post_summaries(&self) -> Result<Vec<BlogPostSummary>, AppError> {
        let posts = sqlx::query_as::<_, BlogPostSummary>(
            "SELECT slug, title, created_at FROM blog_posts ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }
}

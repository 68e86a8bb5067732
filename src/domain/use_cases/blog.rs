use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{
        blog_post::{
            BlogPostCreatedResponse, BlogPostDetailResponse, BlogPostListItem, BlogPostPage,
            ListPostsQuery, NewBlogPostRequest, UpdateBlogPostRequest,
        },
        category::{Category, NewCategoryRequest},
        option_fields::OptionField,
        post_view::PostViewInsert,
    },
    errors::AppError,
    repositories::{
        blog_post::BlogPostRepository, category::CategoryRepository, post_view::PostViewRepository,
    },
};

pub struct BlogPostHandler {
    pub blog_post_repo: Arc<dyn BlogPostRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub post_view_repo: Arc<dyn PostViewRepository>,
}

impl BlogPostHandler {
    pub fn new(
        blog_post_repo: Arc<dyn BlogPostRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        post_view_repo: Arc<dyn PostViewRepository>,
    ) -> Self {
        BlogPostHandler { blog_post_repo, category_repo, post_view_repo }
    }

    /// Creates a new blog post with the provided data
    pub async fn create_blog_post(
        &self,
        author_id: Uuid,
        post: NewBlogPostRequest,
    ) -> Result<BlogPostCreatedResponse, AppError> {
        post.validate()?;

        let category_id = self.resolve_category(post.category.as_deref()).await?;
        let insert_post = post.into_insert(author_id, category_id)?;

        let id = self.blog_post_repo.create_blog_post(&insert_post).await?;
        tracing::info!(post_id = %id, slug = %insert_post.slug, "Blog post created");

        Ok(BlogPostCreatedResponse {
            id,
            url: format!("/blog/{}", insert_post.slug),
            edit_url: format!("/blog/{}/edit", insert_post.slug),
            slug: insert_post.slug,
        })
    }

    /// Newest first, one page at a time
    pub async fn get_all_blog_posts(&self, query: &ListPostsQuery) -> Result<BlogPostPage, AppError> {
        let (page, per_page) = (query.page(), query.per_page());

        let posts = self.blog_post_repo.get_all_blog_posts(page, per_page).await?;
        let total = self.blog_post_repo.count_blog_posts().await?;

        Ok(BlogPostPage {
            posts: posts.iter().map(|p| p.to_list_item()).collect(),
            page,
            per_page,
            total,
        })
    }

    pub async fn get_recent_blog_posts(&self, limit: u32) -> Result<Vec<BlogPostListItem>, AppError> {
        let posts = self.blog_post_repo.get_recent_blog_posts(limit).await?;
        Ok(posts.iter().map(|p| p.to_list_item()).collect())
    }

    /// Loads a post for reading and counts the visit.
    pub async fn view_blog_post(&self, slug: &str, client_ip: &str) -> Result<BlogPostDetailResponse, AppError> {
        let post = self.blog_post_repo.get_blog_post_by_slug(slug).await?;

        if let Err(e) = self.post_view_repo.record_view(&PostViewInsert::new(&post.slug, client_ip)).await {
            tracing::warn!(slug = %post.slug, "Failed to record post view: {}", e);
        }

        let view_count = self.post_view_repo.count_views(&post.slug).await.unwrap_or_else(|e| {
            tracing::warn!(slug = %post.slug, "Failed to count post views: {}", e);
            0
        });

        Ok(post.to_detail_response(view_count))
    }

    /// Loads a post without counting a visit, for the editor.
    pub async fn get_blog_post_by_slug(&self, slug: &str) -> Result<BlogPostDetailResponse, AppError> {
        let post = self.blog_post_repo.get_blog_post_by_slug(slug).await?;
        let view_count = self.post_view_repo.count_views(&post.slug).await?;
        Ok(post.to_detail_response(view_count))
    }

    /// Updates an existing blog post
    pub async fn update_blog_post(
        &self,
        slug: &str,
        patch: UpdateBlogPostRequest,
    ) -> Result<BlogPostDetailResponse, AppError> {
        patch.validate()?;

        let current = self.blog_post_repo.get_blog_post_by_slug(slug).await?;

        let category_id = match &patch.category {
            OptionField::Unchanged => current.category_id,
            OptionField::SetToNull => None,
            OptionField::SetToValue(category) => self.resolve_category(Some(category)).await?,
        };

        let changes = patch.resolve(&current, category_id);
        let updated = self.blog_post_repo.update_blog_post(&current.id, &changes).await?;
        let view_count = self.post_view_repo.count_views(&updated.slug).await?;

        Ok(updated.to_detail_response(view_count))
    }

    /// Deletes a post; its views go with it.
    pub async fn delete_blog_post(&self, slug: &str) -> Result<(), AppError> {
        self.blog_post_repo.delete_blog_post(slug).await?;
        tracing::info!(%slug, "Blog post deleted");
        Ok(())
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.category_repo.list_categories().await
    }

    pub async fn create_category(&self, request: NewCategoryRequest) -> Result<Category, AppError> {
        let insert = request.into_insert()?;
        self.category_repo.create_category(&insert).await
    }

    async fn resolve_category(&self, slug: Option<&str>) -> Result<Option<Uuid>, AppError> {
        let Some(slug) = slug.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };

        self.category_repo
            .get_category_by_slug(slug)
            .await?
            .map(|c| Some(c.id))
            .ok_or_else(|| AppError::field("category", "Unknown category"))
    }
}

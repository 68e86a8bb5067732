use std::sync::Arc;

use crate::{
    entities::{dashboard::DashboardStats, task::TaskStatusCounts},
    errors::AppError,
    repositories::{blog_post::BlogPostRepository, post_view::PostViewRepository, task::TaskRepository},
};

/// Computes the admin dashboard on every request; nothing is cached.
pub struct DashboardHandler {
    pub blog_post_repo: Arc<dyn BlogPostRepository>,
    pub post_view_repo: Arc<dyn PostViewRepository>,
    pub task_repo: Arc<dyn TaskRepository>,
}

impl DashboardHandler {
    pub fn new(
        blog_post_repo: Arc<dyn BlogPostRepository>,
        post_view_repo: Arc<dyn PostViewRepository>,
        task_repo: Arc<dyn TaskRepository>,
    ) -> Self {
        DashboardHandler { blog_post_repo, post_view_repo, task_repo }
    }

    pub async fn dashboard(&self) -> Result<DashboardStats, AppError> {
        let posts = self.blog_post_repo.get_post_summaries().await?;
        let views = self.post_view_repo.views_per_post().await?;
        let tasks = TaskStatusCounts::from_grouped(&self.task_repo.count_by_status().await?);

        Ok(DashboardStats::aggregate(posts, &views, tasks))
    }
}

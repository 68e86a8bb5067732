use std::sync::Arc;

use crate::repositories::{
    blog_post::BlogPostRepository,
    category::CategoryRepository,
    post_view::PostViewRepository,
    project::ProjectRepository,
    sqlx_repo::{
        SqlxBlogPostRepo, SqlxCategoryRepo, SqlxPostViewRepo, SqlxProjectRepo, SqlxTaskRepo, SqlxUserRepo,
    },
    task::TaskRepository,
    user::UserRepository,
};

#[derive(Clone)]
pub struct SharedRepositories {
    pub user_repo: Arc<dyn UserRepository>,
    pub blog_post_repo: Arc<dyn BlogPostRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub post_view_repo: Arc<dyn PostViewRepository>,
    pub task_repo: Arc<dyn TaskRepository>,
    pub project_repo: Arc<dyn ProjectRepository>,
}

impl SharedRepositories {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SharedRepositories {
            user_repo: Arc::new(SqlxUserRepo::new(pool.clone())),
            blog_post_repo: Arc::new(SqlxBlogPostRepo::new(pool.clone())),
            category_repo: Arc::new(SqlxCategoryRepo::new(pool.clone())),
            post_view_repo: Arc::new(SqlxPostViewRepo::new(pool.clone())),
            task_repo: Arc::new(SqlxTaskRepo::new(pool.clone())),
            project_repo: Arc::new(SqlxProjectRepo::new(pool)),
        }
    }
}

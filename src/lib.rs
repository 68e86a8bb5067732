use std::{sync::Arc, time::Duration};

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod shared_repos;
pub mod telemetry;

pub use domain::{entities, password, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, cache, db, limiter, storage, utils};

use auth::jwt::JwtService;
use cache::redis::RedisDenyList;
use repositories::{storage::ObjectStorage, token::{TokenDenyList, TokenServiceRepository}, user::UserRepository};
use settings::AppConfig;
use shared_repos::SharedRepositories;
use use_cases::{
    auth::AuthHandler,
    blog::BlogPostHandler,
    chat::ChatHandler,
    dashboard::DashboardHandler,
    images::ImageHandler,
    projects::ProjectHandler,
    tasks::TaskHandler,
};

pub struct AppState {
    pub config: AppConfig,
    pub auth_handler: AuthHandler,
    pub blog_handler: BlogPostHandler,
    pub task_handler: TaskHandler,
    pub project_handler: ProjectHandler,
    pub image_handler: ImageHandler,
    pub dashboard_handler: DashboardHandler,
    pub chat_handler: ChatHandler,
    pub user_repo: Arc<dyn UserRepository>,
    pub deny_list: Option<Arc<dyn TokenDenyList>>,
}

impl AppState {
    pub fn new(config: &AppConfig, pool: sqlx::PgPool, redis_pool: Option<deadpool_redis::Pool>) -> Self {
        let deny_list = redis_pool
            .map(|pool| Arc::new(RedisDenyList::new(pool)) as Arc<dyn TokenDenyList>);

        Self::from_parts(
            config,
            SharedRepositories::new(pool),
            Arc::new(JwtService::new(config)),
            deny_list,
            storage::build_storage(config),
        )
    }

    /// Wires the use cases from already-built collaborators.
    pub fn from_parts(
        config: &AppConfig,
        repos: SharedRepositories,
        token_service: Arc<dyn TokenServiceRepository>,
        deny_list: Option<Arc<dyn TokenDenyList>>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        AppState {
            config: config.clone(),
            auth_handler: AuthHandler::new(repos.user_repo.clone(), token_service, deny_list.clone()),
            blog_handler: BlogPostHandler::new(
                repos.blog_post_repo.clone(),
                repos.category_repo.clone(),
                repos.post_view_repo.clone(),
            ),
            task_handler: TaskHandler::new(repos.task_repo.clone()),
            project_handler: ProjectHandler::new(repos.project_repo.clone()),
            image_handler: ImageHandler::new(storage),
            dashboard_handler: DashboardHandler::new(repos.blog_post_repo, repos.post_view_repo, repos.task_repo),
            chat_handler: ChatHandler::new(Duration::from_millis(config.chat_reply_delay_ms)),
            user_repo: repos.user_repo,
            deny_list,
        }
    }
}

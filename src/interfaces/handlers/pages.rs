use actix_web::{http::header, web, HttpRequest, HttpResponse};
use tracing::instrument;

use crate::{
    entities::{
        blog_post::ListPostsQuery,
        pages::{
            AdminPage, AuthPage, BlogFormPage, BlogListPage, BlogPostView, LandingPage, ProjectDemoPage,
            ProjectFormPage, ProjectsPage, TaskFormPage,
        },
    },
    errors::AppError,
    use_cases::{extractors::MaybeClaims, pages::PageGuard},
    utils::get_client_ip::get_client_ip,
    AppState,
};

const RECENT_POSTS_ON_LANDING: u32 = 3;
const RECENT_PROJECTS_ON_LANDING: u32 = 2;

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Runs the guard and short-circuits with a redirect when it says so.
macro_rules! guard_page {
    ($guard:expr, $viewer:expr) => {
        if let Some(location) = $guard.redirect_for($viewer.0.as_ref()) {
            tracing::debug!(%location, "Redirecting viewer");
            return Ok(see_other(location));
        }
    };
}

#[instrument(skip(state))]
pub async fn landing(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let recent_posts = state.blog_handler.get_recent_blog_posts(RECENT_POSTS_ON_LANDING).await?;
    let recent_projects = state.project_handler.get_recent_projects(RECENT_PROJECTS_ON_LANDING).await?;

    Ok(HttpResponse::Ok().json(LandingPage::new(
        &state.config.site_owner,
        &state.config.contact_email,
        recent_posts,
        recent_projects,
    )))
}

pub async fn auth_page(viewer: MaybeClaims) -> Result<HttpResponse, AppError> {
    guard_page!(PageGuard::AnonymousOnly, viewer);
    Ok(HttpResponse::Ok().json(AuthPage::default()))
}

#[instrument(skip(viewer, state))]
pub async fn admin_page(viewer: MaybeClaims, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    guard_page!(PageGuard::AdminOnly, viewer);

    let dashboard = state.dashboard_handler.dashboard().await?;
    let tasks = state.task_handler.list_tasks().await?;

    Ok(HttpResponse::Ok().json(AdminPage { dashboard, tasks }))
}

pub async fn new_task_page(viewer: MaybeClaims) -> Result<HttpResponse, AppError> {
    guard_page!(PageGuard::AdminOnly, viewer);
    Ok(HttpResponse::Ok().json(TaskFormPage::default()))
}

#[instrument(skip(viewer, state))]
pub async fn blog_list_page(
    viewer: MaybeClaims,
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse, AppError> {
    let page = state.blog_handler.get_all_blog_posts(&query).await?;
    let can_create = viewer.0.as_ref().is_some_and(|c| c.admin);

    Ok(HttpResponse::Ok().json(BlogListPage { page, can_create }))
}

#[instrument(skip(viewer, state))]
pub async fn blog_create_page(viewer: MaybeClaims, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    guard_page!(PageGuard::AdminOr("/blog"), viewer);

    let categories = state.blog_handler.list_categories().await?;
    Ok(HttpResponse::Ok().json(BlogFormPage { post: None, categories }))
}

#[instrument(skip(req, viewer, state))]
pub async fn blog_post_page(
    req: HttpRequest,
    viewer: MaybeClaims,
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let client_ip = get_client_ip(&req, state.config.trust_x_forwarded_for);
    let post = state.blog_handler.view_blog_post(&slug, &client_ip).await?;
    let can_edit = viewer.0.as_ref().is_some_and(|c| c.admin);

    Ok(HttpResponse::Ok().json(BlogPostView { post, can_edit }))
}

#[instrument(skip(viewer, state))]
pub async fn blog_edit_page(
    viewer: MaybeClaims,
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    guard_page!(PageGuard::AdminOr("/blog"), viewer);

    let post = state.blog_handler.get_blog_post_by_slug(&slug).await?;
    let categories = state.blog_handler.list_categories().await?;

    Ok(HttpResponse::Ok().json(BlogFormPage { post: Some(post), categories }))
}

#[instrument(skip(viewer, state))]
pub async fn projects_page(viewer: MaybeClaims, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let projects = state.project_handler.list_projects().await?;

    Ok(HttpResponse::Ok().json(ProjectsPage {
        projects,
        can_create: viewer.0.is_some(),
    }))
}

pub async fn project_create_page(viewer: MaybeClaims) -> Result<HttpResponse, AppError> {
    guard_page!(PageGuard::SignedIn, viewer);
    Ok(HttpResponse::Ok().json(ProjectFormPage::default()))
}

pub async fn project_demo_page() -> HttpResponse {
    HttpResponse::Ok().json(ProjectDemoPage::default())
}

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::blog_post::{ListPostsQuery, NewBlogPostRequest, UpdateBlogPostRequest},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    utils::{get_client_ip::get_client_ip, valid_uuid::valid_uuid},
    AppState,
};

#[instrument(skip(claims, state, data))]
pub async fn create_blog_post(
    claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewBlogPostRequest>
) -> Result<impl Responder, AppError> {
    let author_id = valid_uuid(&claims.0.sub)?;

    let response = state.blog_handler
        .create_blog_post(author_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(state))]
pub async fn get_all_blog_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> Result<impl Responder, AppError> {
    let posts = state.blog_handler.get_all_blog_posts(&query).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[instrument(skip(req, state))]
pub async fn get_blog_post_by_slug(
    req: HttpRequest,
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let client_ip = get_client_ip(&req, state.config.trust_x_forwarded_for);
    let post = state.blog_handler.view_blog_post(&slug, &client_ip).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_blog_post(
    _claims: AdminClaims,
    slug: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateBlogPostRequest>,
) -> Result<impl Responder, AppError> {
    let updated_post = state.blog_handler.update_blog_post(&slug, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated_post))
}

#[instrument(skip(_claims, state))]
pub async fn delete_blog_post(
    _claims: AdminClaims,
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.blog_handler.delete_blog_post(&slug).await?;
    Ok(HttpResponse::NoContent().finish())
}

use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::category::NewCategoryRequest, errors::AppError, use_cases::extractors::AdminClaims, AppState};

#[instrument(skip(state))]
pub async fn list_categories(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let categories = state.blog_handler.list_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_category(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewCategoryRequest>,
) -> Result<impl Responder, AppError> {
    let category = state.blog_handler.create_category(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(category))
}

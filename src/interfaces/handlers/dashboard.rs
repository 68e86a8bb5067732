use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, use_cases::extractors::AdminClaims, AppState};

#[instrument(skip(_claims, state))]
pub async fn get_dashboard(_claims: AdminClaims, state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let stats = state.dashboard_handler.dashboard().await?;
    Ok(HttpResponse::Ok().json(stats))
}
